//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A corpus source could not be read at all.
    ///
    /// Stores normally degrade to an empty corpus instead; this surfaces only
    /// where the caller asked for strict loading (e.g. `kiln pack`).
    #[error("Corpus unavailable at {location}: {reason}")]
    CorpusUnavailable { location: String, reason: String },

    /// Handing the tree to a materializer failed.
    #[error("Materialization failed at {path}: {reason}")]
    MaterializationFailed { path: String, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("In-memory store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::CorpusUnavailable { location, .. } => vec![
                format!("Could not read: {}", location),
                "Check the path passed with --corpus or the KILN_CORPUS variable".into(),
                "Rebuild the archive with: kiln pack <templates-dir> --output <file>".into(),
            ],
            Self::MaterializationFailed { path, .. } => vec![
                format!("Failed to materialize: {}", path),
                "Inspect the tree with: kiln tree --format list".into(),
            ],
            Self::StoreLockError => vec![
                "An in-memory store is in an inconsistent state".into(),
                "Restart the process".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CorpusUnavailable { .. } => ErrorCategory::Corpus,
            Self::MaterializationFailed { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
