//! Name Transformer - corpus path to output path.
//!
//! Runs the configuration-independent rules from `domain::naming`, then, if
//! the path still contains template delimiters, renders it against the
//! context:
//!
//! | Corpus path | Output path |
//! |-------------|-------------|
//! | `_gitignore.hbs` | `.gitignore` |
//! | `app/if-payload/page.tsx.hbs` | `app/page.tsx` |
//! | `packages/{{projectNameKebab}}/package.json` | `packages/acme/package.json` |

use tracing::instrument;

use crate::{
    application::{ports::TemplateRenderer, services::render_or_verbatim},
    domain::{RenderContext, naming},
};

/// Maps corpus paths to final output paths.
pub struct NameTransformer<'a> {
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> NameTransformer<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Final output path for `path`.
    ///
    /// A path that fails to render keeps its unrendered form (logged).
    #[instrument(level = "trace", skip(self, context))]
    pub fn transform(&self, path: &str, context: &RenderContext) -> String {
        let prepared = naming::prepare(path);

        if naming::has_delimiters(&prepared) {
            render_or_verbatim(self.renderer, &prepared, context, path)
        } else {
            prepared
        }
    }
}
