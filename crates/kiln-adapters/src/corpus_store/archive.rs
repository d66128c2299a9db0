//! The bundled corpus archive and its codec.
//!
//! # Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": [
//!     { "path": "package.json.hbs", "binary": false, "content": "{ \"name\": \"{{projectNameKebab}}\" }" },
//!     { "path": "public/favicon.ico", "binary": true, "content": "AAABAAEAEBA..." }
//!   ]
//! }
//! ```
//!
//! Binary content is standard base64. Paths use `/`.
//!
//! # Failure policy
//!
//! An archive that cannot be read or decoded degrades to an empty corpus with
//! a warning. An archive that decodes but breaks corpus rules (duplicate path,
//! unknown conditional marker) is a hard error.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use kiln_core::{
    application::{ApplicationError, ports::CorpusStore},
    domain::{Corpus, DomainError, EntryContent, TemplateEntry},
    error::{Context as _, KilnError, KilnResult},
};

/// Archive format version written by [`pack_archive`].
pub const ARCHIVE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct ArchiveDocument {
    version: u32,
    entries: Vec<ArchiveEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ArchiveEntry {
    path: String,
    #[serde(default)]
    binary: bool,
    content: String,
}

/// Why an archive could not be turned into a corpus.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported archive version {found} (expected {ARCHIVE_VERSION})")]
    UnsupportedVersion { found: u32 },

    #[error("entry '{path}' has invalid base64 content: {source}")]
    InvalidBase64 {
        path: String,
        source: base64::DecodeError,
    },

    #[error(transparent)]
    Corpus(#[from] DomainError),
}

impl ArchiveError {
    /// Decoding problems degrade; corpus-rule violations do not.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Corpus(_))
    }
}

/// Serialise a corpus to the archive format.
pub fn pack_archive(corpus: &Corpus) -> KilnResult<String> {
    let document = ArchiveDocument {
        version: ARCHIVE_VERSION,
        entries: corpus
            .iter()
            .map(|entry| match entry.content() {
                EntryContent::Text(text) => ArchiveEntry {
                    path: entry.path().to_string(),
                    binary: false,
                    content: text.clone(),
                },
                EntryContent::Binary(bytes) => ArchiveEntry {
                    path: entry.path().to_string(),
                    binary: true,
                    content: STANDARD.encode(bytes),
                },
            })
            .collect(),
    };

    serde_json::to_string_pretty(&document).context("failed to serialise archive")
}

/// Decode an archive into a validated corpus.
pub fn unpack_archive(json: &str) -> Result<Corpus, ArchiveError> {
    let document: ArchiveDocument = serde_json::from_str(json)?;

    if document.version != ARCHIVE_VERSION {
        return Err(ArchiveError::UnsupportedVersion {
            found: document.version,
        });
    }

    let entries = document
        .entries
        .into_iter()
        .map(|entry| {
            if entry.binary {
                let bytes = STANDARD
                    .decode(entry.content.as_bytes())
                    .map_err(|source| ArchiveError::InvalidBase64 {
                        path: entry.path.clone(),
                        source,
                    })?;
                Ok(TemplateEntry::binary(&entry.path, bytes))
            } else {
                Ok(TemplateEntry::text(&entry.path, entry.content))
            }
        })
        .collect::<Result<Vec<_>, ArchiveError>>()?;

    Ok(Corpus::from_entries(entries)?)
}

#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Inline { label: String, json: String },
}

impl Source {
    fn label(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Inline { label, .. } => label.clone(),
        }
    }
}

/// Corpus store backed by the bundled archive.
///
/// The archive is read once; later `load` calls share the cached corpus.
#[derive(Debug)]
pub struct ArchiveCorpusStore {
    source: Source,
    cache: OnceLock<Arc<Corpus>>,
}

impl ArchiveCorpusStore {
    /// Store reading the archive at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::File(path.into()),
            cache: OnceLock::new(),
        }
    }

    /// Store over archive text already in memory (e.g. `include_str!`).
    pub fn from_json(label: impl Into<String>, json: impl Into<String>) -> Self {
        Self {
            source: Source::Inline {
                label: label.into(),
                json: json.into(),
            },
            cache: OnceLock::new(),
        }
    }

    /// Path of a file-backed archive.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::File(path) => Some(path),
            Source::Inline { .. } => None,
        }
    }

    /// Load without degrading: unreadable or malformed archives are errors.
    ///
    /// Used by inspection commands that should report a broken archive
    /// instead of silently showing nothing. Bypasses the cache.
    pub fn load_strict(&self) -> KilnResult<Corpus> {
        let text = self.read_source().map_err(|reason| ApplicationError::CorpusUnavailable {
            location: self.source.label(),
            reason,
        })?;

        unpack_archive(&text).map_err(|error| match error {
            ArchiveError::Corpus(domain) => KilnError::Domain(domain),
            other => ApplicationError::CorpusUnavailable {
                location: self.source.label(),
                reason: other.to_string(),
            }
            .into(),
        })
    }

    fn read_source(&self) -> Result<String, String> {
        match &self.source {
            Source::File(path) => fs::read_to_string(path).map_err(|e| e.to_string()),
            Source::Inline { json, .. } => Ok(json.clone()),
        }
    }

    #[instrument(skip(self), fields(source = %self.source.label()))]
    fn read(&self) -> KilnResult<Corpus> {
        let text = match self.read_source() {
            Ok(text) => text,
            Err(reason) => {
                warn!(%reason, "Corpus archive unavailable, continuing with an empty corpus");
                return Ok(Corpus::empty());
            }
        };

        match unpack_archive(&text) {
            Ok(corpus) => {
                info!(
                    entries = corpus.len(),
                    binary = corpus.binary_count(),
                    "Corpus archive loaded"
                );
                Ok(corpus)
            }
            Err(ArchiveError::Corpus(error)) => Err(error.into()),
            Err(error) => {
                debug_assert!(!error.is_fatal());
                warn!(%error, "Corpus archive is malformed, continuing with an empty corpus");
                Ok(Corpus::empty())
            }
        }
    }
}

impl CorpusStore for ArchiveCorpusStore {
    fn load(&self) -> KilnResult<Arc<Corpus>> {
        if let Some(corpus) = self.cache.get() {
            debug!("Corpus served from cache");
            return Ok(Arc::clone(corpus));
        }

        let corpus = Arc::new(self.read()?);
        Ok(Arc::clone(self.cache.get_or_init(|| corpus)))
    }
}
