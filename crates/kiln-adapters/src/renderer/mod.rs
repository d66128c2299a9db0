//! The stencil template language.
//!
//! A Handlebars-style subset, implemented as lexer → parser → evaluator over
//! the immutable [`RenderContext`]:
//!
//! ```text
//! {{projectName}}                      interpolation ({{{ }}} is the same)
//! {{#if (eq marketingSite "payload")}} conditional, with {{else if}} / {{else}}
//! {{#unless uploads}} … {{/unless}}    negated conditional
//! {{! note }}  {{!-- note --}}         comments
//! {{~ x ~}}                            trim surrounding whitespace
//! \{{                                  literal "{{"
//! ```
//!
//! Helpers: `eq`, `ne`, `and`, `or`, `includes`, `not`, `json`.

mod ast;
mod evaluate;
mod helpers;
mod lexer;
mod parser;

pub use ast::Template;
pub use parser::parse;

use kiln_core::{
    application::ports::TemplateRenderer,
    domain::{RenderContext, RenderError},
};
use tracing::instrument;

/// The production [`TemplateRenderer`].
///
/// Stateless; templates are parsed on every call. Callers that render the same
/// template repeatedly can [`parse`] once and use [`StencilRenderer::evaluate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StencilRenderer;

impl StencilRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate an already-parsed template.
    pub fn evaluate(&self, template: &Template, context: &RenderContext) -> String {
        evaluate::render(template, context)
    }
}

impl TemplateRenderer for StencilRenderer {
    #[instrument(level = "trace", skip_all, fields(len = template.len()))]
    fn try_render(&self, template: &str, context: &RenderContext) -> Result<String, RenderError> {
        if !template.contains("{{") {
            return Ok(template.to_string());
        }
        let parsed = parse(template)?;
        Ok(self.evaluate(&parsed, context))
    }
}
