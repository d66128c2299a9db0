//! Kiln Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Kiln's
//! template rendering and virtual project assembly engine.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            kiln-cli (CLI)               │
//! │     (inspects the virtual tree)         │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (VfsBuilder, NameTransformer)       │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (CorpusStore, TemplateRenderer,         │
//! │  Materializer)                          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     kiln-adapters (Infrastructure)      │
//! │ (ArchiveCorpusStore, StencilRenderer)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectConfig, Corpus, markers,        │
//! │  naming, VirtualFileTree)               │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kiln_core::{
//!     application::VfsBuilder,
//!     domain::{MarketingSite, ProjectConfig},
//! };
//!
//! // 1. Describe the project
//! let config = ProjectConfig::builder("my-app")
//!     .marketing_site(MarketingSite::Payload)
//!     .build()
//!     .unwrap();
//!
//! // 2. Build the tree with injected adapters
//! let builder = VfsBuilder::new(store, renderer);
//! let tree = builder.build(&config).unwrap();
//! println!("{} files", tree.file_count());
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        NameTransformer, VfsBuilder,
        ports::{CorpusStore, Materializer, TemplateRenderer},
    };
    pub use crate::domain::{
        Corpus, EntryContent, FileContent, ProjectConfig, RenderContext, RenderError,
        TemplateEntry, VirtualDirectory, VirtualFile, VirtualFileTree, VirtualNode,
    };
    pub use crate::error::{KilnError, KilnResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
