//! The in-memory project produced by a generation run.
//!
//! A [`VirtualFileTree`] is a rooted tree of directories and files. Nothing is
//! written to disk; materialization is a separate port.
//!
//! Children keep insertion order. Because the builder walks the corpus in
//! lexical order, the same corpus and configuration always yield the same tree.

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::{common, project_config::ProjectConfig},
    error::DomainError,
};

/// Final content of a generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "encoding", content = "data", rename_all = "lowercase")]
pub enum FileContent {
    Text(String),
    #[serde(rename = "base64")]
    Binary(#[serde(with = "base64_bytes")] Vec<u8>),
}

impl FileContent {
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Binary(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary(_))
    }
}

mod base64_bytes {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualFile {
    path: String,
    name: String,
    content: FileContent,
    #[serde(skip_serializing_if = "Option::is_none")]
    extension: Option<String>,
    source_path: String,
}

impl VirtualFile {
    /// Full output path, `/`-separated.
    pub fn path(&self) -> &str {
        &self.path
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn content(&self) -> &FileContent {
        &self.content
    }
    /// Extension of `name` without the dot; `None` for dotfiles and bare names.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }
    /// Corpus path this file was generated from.
    pub fn source_path(&self) -> &str {
        &self.source_path
    }
}

/// A generated directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualDirectory {
    path: String,
    name: String,
    children: Vec<VirtualNode>,
}

impl VirtualDirectory {
    fn new(path: String, name: &str) -> Self {
        Self {
            path,
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Children in insertion order.
    pub fn children(&self) -> &[VirtualNode] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&VirtualNode> {
        self.children.iter().find(|c| c.name() == name)
    }
}

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VirtualNode {
    File(VirtualFile),
    Directory(VirtualDirectory),
}

impl VirtualNode {
    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => f.name(),
            Self::Directory(d) => d.name(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::File(f) => f.path(),
            Self::Directory(d) => d.path(),
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Directory(_) => "directory",
        }
    }
}

/// The generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualFileTree {
    root: VirtualDirectory,
    file_count: usize,
    directory_count: usize,
    config: ProjectConfig,
}

impl VirtualFileTree {
    /// Empty tree for `config`.
    pub fn new(config: ProjectConfig) -> Self {
        Self {
            root: VirtualDirectory::default(),
            file_count: 0,
            directory_count: 0,
            config,
        }
    }

    /// Place a file, creating intermediate directories on demand.
    ///
    /// # Errors
    ///
    /// - `InvalidFinalPath` if any segment of `path` is empty, `.` or `..`
    /// - `PathCollision` if a file sits where a directory is needed, a
    ///   directory sits where the file goes, or the file already exists
    pub fn insert_file(
        &mut self,
        path: &str,
        content: FileContent,
        source_path: &str,
    ) -> Result<(), DomainError> {
        let segments: Vec<&str> = path.split(common::SEPARATOR).collect();
        if segments
            .iter()
            .any(|s| s.is_empty() || *s == "." || *s == "..")
        {
            return Err(DomainError::InvalidFinalPath {
                path: path.to_string(),
                source_path: source_path.to_string(),
            });
        }

        let Some((file_name, dirs)) = segments.split_last() else {
            return Err(DomainError::InvalidFinalPath {
                path: path.to_string(),
                source_path: source_path.to_string(),
            });
        };

        let mut current = &mut self.root;
        for (depth, segment) in dirs.iter().enumerate() {
            let index = match current.children.iter().position(|c| c.name() == *segment) {
                Some(index) => index,
                None => {
                    let dir_path = segments[..=depth].join("/");
                    current
                        .children
                        .push(VirtualNode::Directory(VirtualDirectory::new(dir_path, segment)));
                    self.directory_count += 1;
                    current.children.len() - 1
                }
            };

            current = match &mut current.children[index] {
                VirtualNode::Directory(dir) => dir,
                VirtualNode::File(file) => {
                    return Err(DomainError::PathCollision {
                        path: file.path.clone(),
                        existing: "file",
                        incoming: "directory",
                    });
                }
            };
        }

        if let Some(existing) = current.child(file_name) {
            return Err(DomainError::PathCollision {
                path: path.to_string(),
                existing: existing.kind(),
                incoming: "file",
            });
        }

        current.children.push(VirtualNode::File(VirtualFile {
            path: path.to_string(),
            name: file_name.to_string(),
            extension: common::extension(file_name),
            content,
            source_path: source_path.to_string(),
        }));
        self.file_count += 1;

        Ok(())
    }

    /// The unnamed root directory.
    pub fn root(&self) -> &VirtualDirectory {
        &self.root
    }

    /// Node at `path`; the root itself is not a node.
    pub fn get(&self, path: &str) -> Option<&VirtualNode> {
        let mut segments = path.split(common::SEPARATOR).peekable();
        let mut current = &self.root;

        while let Some(segment) = segments.next() {
            let node = current.child(segment)?;
            if segments.peek().is_none() {
                return Some(node);
            }
            match node {
                VirtualNode::Directory(dir) => current = dir,
                VirtualNode::File(_) => return None,
            }
        }
        None
    }

    pub fn file(&self, path: &str) -> Option<&VirtualFile> {
        match self.get(path)? {
            VirtualNode::File(file) => Some(file),
            VirtualNode::Directory(_) => None,
        }
    }

    /// Directory at `path`; the empty path is the root.
    pub fn directory(&self, path: &str) -> Option<&VirtualDirectory> {
        if path.is_empty() {
            return Some(&self.root);
        }
        match self.get(path)? {
            VirtualNode::Directory(dir) => Some(dir),
            VirtualNode::File(_) => None,
        }
    }

    /// Every file, depth-first in insertion order.
    pub fn files(&self) -> Vec<&VirtualFile> {
        fn collect<'a>(dir: &'a VirtualDirectory, out: &mut Vec<&'a VirtualFile>) {
            for child in &dir.children {
                match child {
                    VirtualNode::File(file) => out.push(file),
                    VirtualNode::Directory(sub) => collect(sub, out),
                }
            }
        }

        let mut out = Vec::with_capacity(self.file_count);
        collect(&self.root, &mut out);
        out
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// Directories created, root excluded.
    pub fn directory_count(&self) -> usize {
        self.directory_count
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> VirtualFileTree {
        VirtualFileTree::new(ProjectConfig::builder("acme").build().unwrap())
    }

    fn text(s: &str) -> FileContent {
        FileContent::Text(s.into())
    }

    #[test]
    fn creates_intermediate_directories_once() {
        let mut tree = tree();
        tree.insert_file("apps/web/a.ts", text("a"), "apps/web/a.ts.hbs").unwrap();
        tree.insert_file("apps/web/b.ts", text("b"), "apps/web/b.ts").unwrap();
        tree.insert_file("apps/api/c.ts", text("c"), "apps/api/c.ts").unwrap();

        assert_eq!(tree.file_count(), 3);
        assert_eq!(tree.directory_count(), 3);
        assert_eq!(tree.directory("apps/web").unwrap().path(), "apps/web");
        assert_eq!(tree.file("apps/web/a.ts").unwrap().source_path(), "apps/web/a.ts.hbs");
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut tree = tree();
        for name in ["z.txt", "a.txt", "m.txt"] {
            tree.insert_file(name, text(""), name).unwrap();
        }
        let names: Vec<_> = tree.root().children().iter().map(VirtualNode::name).collect();
        assert_eq!(names, ["z.txt", "a.txt", "m.txt"]);
    }

    #[test]
    fn file_blocking_a_directory_collides() {
        let mut tree = tree();
        tree.insert_file("lib", text(""), "lib").unwrap();

        let err = tree.insert_file("lib/x.ts", text(""), "lib/x.ts").unwrap_err();
        assert_eq!(
            err,
            DomainError::PathCollision {
                path: "lib".into(),
                existing: "file",
                incoming: "directory",
            }
        );
    }

    #[test]
    fn directory_blocking_a_file_collides() {
        let mut tree = tree();
        tree.insert_file("lib/x.ts", text(""), "lib/x.ts").unwrap();

        let err = tree.insert_file("lib", text(""), "lib").unwrap_err();
        assert!(matches!(
            err,
            DomainError::PathCollision {
                existing: "directory",
                incoming: "file",
                ..
            }
        ));
    }

    #[test]
    fn duplicate_file_collides() {
        let mut tree = tree();
        tree.insert_file("a.txt", text("1"), "a.txt").unwrap();
        assert!(matches!(
            tree.insert_file("a.txt", text("2"), "if-payload/a.txt"),
            Err(DomainError::PathCollision { existing: "file", .. })
        ));
        assert_eq!(tree.file_count(), 1);
    }

    #[test]
    fn rejects_degenerate_paths() {
        let mut tree = tree();
        for bad in ["", "a//b", "./a", "a/../b", "/abs"] {
            assert!(
                matches!(
                    tree.insert_file(bad, text(""), "src"),
                    Err(DomainError::InvalidFinalPath { .. })
                ),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!(tree.file_count(), 0);
    }

    #[test]
    fn extension_is_derived_from_name() {
        let mut tree = tree();
        tree.insert_file(".gitignore", text(""), "_gitignore").unwrap();
        tree.insert_file("page.tsx", text(""), "page.tsx").unwrap();

        assert_eq!(tree.file(".gitignore").unwrap().extension(), None);
        assert_eq!(tree.file("page.tsx").unwrap().extension(), Some("tsx"));
    }

    #[test]
    fn serialises_binary_as_base64() {
        let mut tree = tree();
        tree.insert_file("logo.png", FileContent::Binary(vec![0, 1, 2]), "logo.png")
            .unwrap();

        let value = serde_json::to_value(&tree).unwrap();
        let file = &value["root"]["children"][0];
        assert_eq!(file["kind"], "file");
        assert_eq!(file["content"]["encoding"], "base64");
        assert_eq!(file["content"]["data"], "AAEC");
        assert_eq!(value["fileCount"], 1);
    }

    #[test]
    fn files_are_listed_depth_first() {
        let mut tree = tree();
        tree.insert_file("a/1.txt", text(""), "a/1.txt").unwrap();
        tree.insert_file("b.txt", text(""), "b.txt").unwrap();
        tree.insert_file("a/2.txt", text(""), "a/2.txt").unwrap();

        let paths: Vec<_> = tree.files().iter().map(|f| f.path()).collect();
        assert_eq!(paths, ["a/1.txt", "a/2.txt", "b.txt"]);
    }
}
