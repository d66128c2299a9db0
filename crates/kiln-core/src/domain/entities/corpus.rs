//! The template corpus: every template entry bundled with the tool.

use std::collections::BTreeMap;

use crate::domain::{entities::common::normalize_path, error::DomainError, validation::DomainValidator};

/// Raw content of a corpus entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContent {
    /// UTF-8 template source; rendered during generation.
    Text(String),
    /// Decoded binary payload; copied through untouched.
    Binary(Vec<u8>),
}

impl EntryContent {
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Binary(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One template file. Identity is its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    path: String,
    content: EntryContent,
}

impl TemplateEntry {
    /// Text entry; `path` is normalised to `/` separators.
    pub fn text(path: impl AsRef<str>, content: impl Into<String>) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            content: EntryContent::Text(content.into()),
        }
    }

    /// Binary entry; `path` is normalised to `/` separators.
    pub fn binary(path: impl AsRef<str>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            content: EntryContent::Binary(bytes.into()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &EntryContent {
        &self.content
    }

    pub fn is_binary(&self) -> bool {
        matches!(self.content, EntryContent::Binary(_))
    }
}

/// Immutable, path-ordered set of template entries.
///
/// Iteration is lexical by path, which is what makes generation deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    entries: BTreeMap<String, TemplateEntry>,
}

impl Corpus {
    /// A corpus with nothing to generate.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a corpus, validating every entry.
    ///
    /// # Errors
    ///
    /// - `DuplicatePath` when two entries share a path
    /// - `AbsolutePathNotAllowed` / `InvalidCorpus` for malformed paths
    /// - `UnknownMarker` for an `if-` directory outside the known vocabulary
    pub fn from_entries(
        entries: impl IntoIterator<Item = TemplateEntry>,
    ) -> Result<Self, DomainError> {
        let mut map = BTreeMap::new();

        for entry in entries {
            DomainValidator::validate_entry(&entry)?;
            if map.contains_key(entry.path()) {
                return Err(DomainError::DuplicatePath {
                    path: entry.path().to_string(),
                });
            }
            map.insert(entry.path().to_string(), entry);
        }

        Ok(Self { entries: map })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&TemplateEntry> {
        self.entries.get(path)
    }

    /// Entries in lexical path order.
    pub fn iter(&self) -> impl Iterator<Item = &TemplateEntry> {
        self.entries.values()
    }

    pub fn binary_count(&self) -> usize {
        self.iter().filter(|e| e.is_binary()).count()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a TemplateEntry;
    type IntoIter = std::collections::btree_map::Values<'a, String, TemplateEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
