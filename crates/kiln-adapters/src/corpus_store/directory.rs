//! Corpus store reading a template directory from disk.
//!
//! Every regular file under the root becomes one entry, keyed by its
//! `/`-separated path relative to the root:
//!
//! ```text
//! templates/
//! ├── _gitignore.hbs
//! ├── package.json.hbs
//! ├── if-monorepo/
//! │   └── turbo.json.hbs
//! └── public/
//!     └── favicon.ico          ← binary, copied verbatim
//! ```
//!
//! Files whose extension is in [`BINARY_EXTENSIONS`](super::BINARY_EXTENSIONS)
//! are kept as bytes. Any other file that is not valid UTF-8 is also kept as
//! bytes, with a warning.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use kiln_core::{
    application::{ApplicationError, ports::CorpusStore},
    domain::{Corpus, TemplateEntry, entities::common::normalize_path},
    error::KilnResult,
};

use super::classify::is_binary_path;

/// Reads a template directory once and serves the cached corpus.
#[derive(Debug)]
pub struct DirectoryCorpusStore {
    root: PathBuf,
    cache: OnceLock<Arc<Corpus>>,
}

impl DirectoryCorpusStore {
    /// The directory does not need to exist yet; a missing directory loads as
    /// an empty corpus.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: OnceLock::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read the directory, failing if it is missing or cannot be walked.
    ///
    /// Used when packing an archive, where an empty result would be a silent
    /// mistake. Bypasses the cache.
    pub fn load_strict(&self) -> KilnResult<Corpus> {
        if !self.root.is_dir() {
            return Err(ApplicationError::CorpusUnavailable {
                location: self.root.display().to_string(),
                reason: "not a directory".into(),
            }
            .into());
        }

        let entries = self.collect_entries(true)?;
        Ok(Corpus::from_entries(entries)?)
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn read(&self) -> KilnResult<Corpus> {
        if !self.root.is_dir() {
            warn!("Template directory not found, continuing with an empty corpus");
            return Ok(Corpus::empty());
        }

        let corpus = Corpus::from_entries(self.collect_entries(false)?)?;
        info!(
            entries = corpus.len(),
            binary = corpus.binary_count(),
            "Template directory loaded"
        );
        Ok(corpus)
    }

    /// Walk the root. In strict mode an unreadable entry is an error; otherwise
    /// it is skipped with a warning.
    fn collect_entries(&self, strict: bool) -> KilnResult<Vec<TemplateEntry>> {
        let mut entries = Vec::new();

        for walk_entry in WalkDir::new(&self.root).min_depth(1) {
            let walk_entry = match walk_entry {
                Ok(entry) => entry,
                Err(e) if strict => return Err(self.unavailable(e.to_string())),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable template entry");
                    continue;
                }
            };

            if !walk_entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = walk_entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let path = normalize_path(&relative.to_string_lossy());

            let bytes = match fs::read(walk_entry.path()) {
                Ok(bytes) => bytes,
                Err(e) if strict => {
                    return Err(self.unavailable(format!("failed to read '{path}': {e}")));
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "Skipping unreadable template file");
                    continue;
                }
            };

            entries.push(classify_entry(path, bytes));
        }

        debug!(count = entries.len(), "Collected template files");
        Ok(entries)
    }

    fn unavailable(&self, reason: String) -> kiln_core::error::KilnError {
        ApplicationError::CorpusUnavailable {
            location: self.root.display().to_string(),
            reason,
        }
        .into()
    }
}

fn classify_entry(path: String, bytes: Vec<u8>) -> TemplateEntry {
    if is_binary_path(&path) {
        return TemplateEntry::binary(&path, bytes);
    }

    match String::from_utf8(bytes) {
        Ok(text) => TemplateEntry::text(&path, text),
        Err(e) => {
            warn!(path = %path, "File is not valid UTF-8, treating it as binary");
            TemplateEntry::binary(&path, e.into_bytes())
        }
    }
}

impl CorpusStore for DirectoryCorpusStore {
    fn load(&self) -> KilnResult<Arc<Corpus>> {
        if let Some(corpus) = self.cache.get() {
            return Ok(Arc::clone(corpus));
        }

        let corpus = Arc::new(self.read()?);
        Ok(Arc::clone(self.cache.get_or_init(|| corpus)))
    }
}
