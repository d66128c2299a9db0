pub mod common;
pub mod corpus;
pub mod project_config;
pub mod render_context;
pub mod virtual_tree;

pub use crate::domain::DomainError;
pub use corpus::{Corpus, EntryContent, TemplateEntry};
pub use project_config::{DesignSystem, ProjectConfig, ProjectConfigBuilder};
pub use render_context::RenderContext;
pub use virtual_tree::{FileContent, VirtualDirectory, VirtualFile, VirtualFileTree, VirtualNode};
