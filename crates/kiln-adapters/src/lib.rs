//! Infrastructure adapters for Kiln.
//!
//! This crate implements the ports defined in `kiln-core::application::ports`:
//! the stencil template language, the corpus stores and an in-memory
//! materializer. All file I/O lives here.

pub mod corpus_store;
pub mod materializer;
pub mod renderer;

// Re-export commonly used adapters
pub use corpus_store::{ArchiveCorpusStore, DirectoryCorpusStore, InMemoryCorpusStore};
pub use materializer::MemoryMaterializer;
pub use renderer::StencilRenderer;
