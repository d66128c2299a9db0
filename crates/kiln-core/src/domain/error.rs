// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so a cached corpus failure can be reported twice)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project configuration: {0}")]
    InvalidConfig(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Corpus Errors
    // ========================================================================
    #[error("Invalid corpus entry: {0}")]
    InvalidCorpus(String),

    #[error("Duplicate path in corpus: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Unknown conditional marker '{marker}' in {path}")]
    UnknownMarker { marker: String, path: String },

    // ========================================================================
    // Structural Errors (tree assembly)
    // ========================================================================
    #[error("Path collision at '{path}': a {existing} already exists where a {incoming} is needed")]
    PathCollision {
        path: String,
        existing: &'static str,
        incoming: &'static str,
    },

    #[error("Template '{source_path}' resolves to an invalid output path '{path}'")]
    InvalidFinalPath { path: String, source_path: String },

    // ========================================================================
    // Internal
    // ========================================================================
    #[error("Render context could not be built: {0}")]
    ContextUnavailable(String),
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidConfig(msg) => vec![
                "Check your project configuration file".into(),
                format!("Details: {}", msg),
            ],
            Self::UnknownMarker { marker, .. } => vec![
                format!("'{}' is not a recognised conditional directory", marker),
                "Known markers: if-monorepo, if-standalone, if-payload, if-posthog, if-uploadthing"
                    .into(),
                "Rename the directory or drop the 'if-' prefix".into(),
            ],
            Self::PathCollision { path, .. } => vec![
                format!("Two templates claim '{}' with different node kinds", path),
                "Check the corpus for a file and a directory that render to the same name".into(),
            ],
            Self::DuplicatePath { path } => vec![
                format!("The corpus contains '{}' more than once", path),
                "Repack the corpus archive".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig(_) | Self::MissingRequiredField { .. } => {
                ErrorCategory::Validation
            }
            Self::PathCollision { .. } | Self::InvalidFinalPath { .. } => ErrorCategory::Conflict,
            Self::InvalidCorpus(_)
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::UnknownMarker { .. } => ErrorCategory::Corpus,
            Self::ContextUnavailable(_) => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Corpus,
    Internal,
}

/// A template failed to parse or evaluate.
///
/// Never fatal on its own: the builder recovers it by emitting the template
/// source verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct RenderError {
    pub line: usize,
    pub message: String,
}

impl RenderError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}
