//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "assemble the project tree for this config".

pub mod name_transformer;
pub mod vfs_builder;

pub use name_transformer::NameTransformer;
pub use vfs_builder::{VfsBuilder, build_tree};

use tracing::warn;

use crate::{application::ports::TemplateRenderer, domain::RenderContext};

/// Render `template`, or hand it back untouched if it does not render.
///
/// This is the fault-isolation boundary: one broken template (or templated
/// path) degrades to its source text and never aborts a run. `origin` names
/// the corpus entry in the warning.
pub fn render_or_verbatim(
    renderer: &dyn TemplateRenderer,
    template: &str,
    context: &RenderContext,
    origin: &str,
) -> String {
    match renderer.try_render(template, context) {
        Ok(rendered) => rendered,
        Err(error) => {
            warn!(
                source_path = %origin,
                line = error.line,
                error = %error.message,
                "Template failed to render, keeping source text"
            );
            template.to_string()
        }
    }
}
