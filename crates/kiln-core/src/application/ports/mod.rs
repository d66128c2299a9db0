//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `kiln-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `CorpusStore`: Template corpus loading
//!   - `TemplateRenderer`: The template language
//!   - `Materializer`: Consumer of the finished tree
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{CorpusStore, Materializer, TemplateRenderer};

#[cfg(test)]
pub use output::{MockCorpusStore, MockMaterializer, MockTemplateRenderer};
