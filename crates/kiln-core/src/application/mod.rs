//! Application layer for Kiln.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (VfsBuilder, NameTransformer)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{NameTransformer, VfsBuilder, build_tree, render_or_verbatim};

// Re-export port traits (for adapter implementation)
pub use ports::{CorpusStore, Materializer, TemplateRenderer};

pub use error::ApplicationError;
