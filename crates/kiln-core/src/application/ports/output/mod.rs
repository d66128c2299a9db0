//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kiln-adapters` crate provides implementations.

use std::sync::Arc;

use crate::domain::{Corpus, RenderContext, RenderError, VirtualFileTree};
use crate::error::KilnResult;

/// Port for loading the template corpus.
///
/// Implemented by:
/// - `kiln_adapters::corpus_store::ArchiveCorpusStore` (bundled archive)
/// - `kiln_adapters::corpus_store::DirectoryCorpusStore` (template directory)
/// - `kiln_adapters::corpus_store::InMemoryCorpusStore` (tests, embedding)
///
/// ## Design Notes
///
/// - Loaded once per process; stores cache the result
/// - Unreadable sources degrade to an empty corpus, logged by the store
/// - Only a corpus that violates domain rules is an `Err`
#[cfg_attr(test, mockall::automock)]
pub trait CorpusStore: Send + Sync {
    fn load(&self) -> KilnResult<Arc<Corpus>>;
}

/// Port for the template language.
///
/// Implemented by:
/// - `kiln_adapters::renderer::StencilRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Render `template` against `context`.
    ///
    /// Pure: no I/O, no mutation of the context. Errors are recoverable; see
    /// [`render_or_verbatim`](crate::application::services::render_or_verbatim).
    fn try_render(&self, template: &str, context: &RenderContext) -> Result<String, RenderError>;
}

/// Port for whatever turns a finished tree into real files.
///
/// Implemented by:
/// - `kiln_adapters::materializer::MemoryMaterializer` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Materializer: Send + Sync {
    fn materialize(&self, tree: &VirtualFileTree) -> KilnResult<()>;
}
