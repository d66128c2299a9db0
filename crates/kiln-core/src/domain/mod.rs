// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Kiln.
//!
//! This module contains the pure generation model: configuration, corpus,
//! the inclusion and naming rules, and the virtual file tree. Template
//! rendering and corpus loading are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: observability lives in the application and CLI layers
//! - **Immutable inputs**: `ProjectConfig`, `Corpus` and `RenderContext` never
//!   change once built
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod markers;
pub mod naming;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    corpus::{Corpus, EntryContent, TemplateEntry},
    project_config::{DesignSystem, ProjectConfig, ProjectConfigBuilder},
    render_context::RenderContext,
    virtual_tree::{FileContent, VirtualDirectory, VirtualFile, VirtualFileTree, VirtualNode},
};

pub use error::{DomainError, ErrorCategory, RenderError};

pub use markers::ConditionalMarker;

pub use value_objects::{
    Addon, Analytics, Auth, MarketingSite, Payments, Structure, Theme, UiLibrary, Uploads,
};

pub use validation::DomainValidator;
