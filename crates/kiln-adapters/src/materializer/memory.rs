//! Materializer that records the tree instead of writing it.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::{Arc, RwLock},
};

use tracing::{debug, instrument};

use kiln_core::{
    application::{ApplicationError, ports::Materializer},
    domain::{FileContent, VirtualDirectory, VirtualFileTree, VirtualNode},
    error::KilnResult,
};

/// Records every directory and file handed over by the builder.
///
/// Directories are created before their contents; writing a file into a
/// directory that was never created fails, the same way a real disk writer
/// would. Clones share the recorded state.
#[derive(Debug, Clone, Default)]
pub struct MemoryMaterializer {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    directories: BTreeSet<String>,
    files: BTreeMap<String, FileContent>,
    /// Paths in visit order, directories and files interleaved.
    journal: Vec<String>,
}

impl MemoryMaterializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded content of `path`.
    pub fn read_file(&self, path: &str) -> Option<FileContent> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    pub fn has_directory(&self, path: &str) -> bool {
        self.inner
            .read()
            .is_ok_and(|inner| inner.directories.contains(path))
    }

    /// Recorded file paths, sorted.
    pub fn list_files(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Recorded directory paths, sorted.
    pub fn list_directories(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|inner| inner.directories.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Every path in the order it was materialized.
    pub fn journal(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|inner| inner.journal.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) -> KilnResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        *inner = Inner::default();
        Ok(())
    }
}

impl Inner {
    fn create_dir(&mut self, path: &str) {
        if self.directories.insert(path.to_string()) {
            self.journal.push(path.to_string());
        }
    }

    fn write_file(&mut self, path: &str, content: &FileContent) -> KilnResult<()> {
        if let Some((parent, _)) = path.rsplit_once('/') {
            if !self.directories.contains(parent) {
                return Err(ApplicationError::MaterializationFailed {
                    path: path.to_string(),
                    reason: "parent directory does not exist".into(),
                }
                .into());
            }
        }

        self.files.insert(path.to_string(), content.clone());
        self.journal.push(path.to_string());
        Ok(())
    }

    fn visit(&mut self, dir: &VirtualDirectory) -> KilnResult<()> {
        for child in dir.children() {
            match child {
                VirtualNode::Directory(sub) => {
                    self.create_dir(sub.path());
                    self.visit(sub)?;
                }
                VirtualNode::File(file) => self.write_file(file.path(), file.content())?,
            }
        }
        Ok(())
    }
}

impl Materializer for MemoryMaterializer {
    #[instrument(skip_all, fields(files = tree.file_count(), directories = tree.directory_count()))]
    fn materialize(&self, tree: &VirtualFileTree) -> KilnResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.visit(tree.root())?;

        debug!(recorded = inner.journal.len(), "Tree materialized in memory");
        Ok(())
    }
}
