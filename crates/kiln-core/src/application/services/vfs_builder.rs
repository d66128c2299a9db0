//! VFS Builder - main application orchestrator.
//!
//! This service coordinates the whole generation workflow:
//! 1. Load the corpus (once per store)
//! 2. Filter, name and render every entry
//! 3. Assemble the virtual file tree
//! 4. Optionally hand the tree to a materializer
//!
//! Nothing here touches the filesystem.

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ports::{CorpusStore, Materializer, TemplateRenderer},
        services::{NameTransformer, render_or_verbatim},
    },
    domain::{
        Corpus, DomainValidator as validator, EntryContent, FileContent, ProjectConfig,
        RenderContext, VirtualFileTree, markers,
    },
    error::KilnResult,
};

/// Main generation service.
///
/// Holds the corpus store and renderer; every `build` is an independent,
/// deterministic run.
pub struct VfsBuilder {
    store: Box<dyn CorpusStore>,
    renderer: Box<dyn TemplateRenderer>,
}

impl VfsBuilder {
    /// Create a new builder with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use kiln_core::application::VfsBuilder;
    ///
    /// let builder = VfsBuilder::new(
    ///     Box::new(store),    // impl CorpusStore
    ///     Box::new(renderer), // impl TemplateRenderer
    /// );
    /// ```
    pub fn new(store: Box<dyn CorpusStore>, renderer: Box<dyn TemplateRenderer>) -> Self {
        Self { store, renderer }
    }

    /// Build the virtual tree for `config`.
    #[instrument(skip_all, fields(project = %config.project_name()))]
    pub fn build(&self, config: &ProjectConfig) -> KilnResult<VirtualFileTree> {
        validator::validate_config(config)?;

        let corpus = self.store.load()?;
        info!(entries = corpus.len(), "Corpus loaded");

        build_tree(&corpus, config, self.renderer.as_ref())
    }

    /// Build the tree and hand it to `materializer`.
    #[instrument(skip_all, fields(project = %config.project_name()))]
    pub fn generate(
        &self,
        config: &ProjectConfig,
        materializer: &dyn Materializer,
    ) -> KilnResult<VirtualFileTree> {
        let tree = self.build(config)?;
        materializer.materialize(&tree)?;
        info!("Tree handed to materializer");
        Ok(tree)
    }
}

/// Assemble the virtual tree for `config` from `corpus`.
///
/// Entries are visited in lexical path order. Per entry: inclusion filter,
/// name transform, then binary content is copied and text content rendered
/// (falling back to the source text on a render error).
///
/// # Errors
///
/// - `InvalidConfig` / `MissingRequiredField` from the configuration guard
/// - `PathCollision` when two entries claim the same output location
/// - `InvalidFinalPath` when a name renders to an empty, `.` or `..` segment
pub fn build_tree(
    corpus: &Corpus,
    config: &ProjectConfig,
    renderer: &dyn TemplateRenderer,
) -> KilnResult<VirtualFileTree> {
    validator::validate_config(config)?;

    let context = RenderContext::new(config)?;
    let names = NameTransformer::new(renderer);
    let mut tree = VirtualFileTree::new(config.clone());
    let mut skipped = 0usize;

    for entry in corpus {
        if !markers::include(entry.path(), config) {
            debug!(path = %entry.path(), "Skipping entry: conditional marker not satisfied");
            skipped += 1;
            continue;
        }

        let final_path = names.transform(entry.path(), &context);

        let content = match entry.content() {
            EntryContent::Binary(bytes) => FileContent::Binary(bytes.clone()),
            EntryContent::Text(text) => {
                FileContent::Text(render_or_verbatim(renderer, text, &context, entry.path()))
            }
        };

        tree.insert_file(&final_path, content, entry.path())?;
    }

    info!(
        files = tree.file_count(),
        directories = tree.directory_count(),
        skipped,
        "Virtual tree assembled"
    );

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::application::ports::{MockCorpusStore, MockMaterializer, MockTemplateRenderer};
    use crate::domain::{DomainError, MarketingSite, RenderError, Structure, TemplateEntry};
    use crate::error::KilnError;

    fn corpus(entries: Vec<TemplateEntry>) -> Corpus {
        Corpus::from_entries(entries).unwrap()
    }

    /// Renderer that upper-cases its input.
    fn shouting_renderer() -> MockTemplateRenderer {
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_try_render()
            .returning(|template, _| Ok(template.to_uppercase()));
        renderer
    }

    #[test]
    fn empty_corpus_yields_empty_tree() {
        let config = ProjectConfig::builder("acme").build().unwrap();
        let tree = build_tree(&Corpus::empty(), &config, &shouting_renderer()).unwrap();

        assert_eq!(tree.file_count(), 0);
        assert_eq!(tree.directory_count(), 0);
        assert!(tree.root().children().is_empty());
    }

    #[test]
    fn binary_entries_are_never_rendered() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_try_render().never();

        let bytes = vec![0x89, b'P', b'N', b'G', 0, 0xFF];
        let corpus = corpus(vec![TemplateEntry::binary("public/logo.png", bytes.clone())]);
        let config = ProjectConfig::builder("acme").build().unwrap();

        let tree = build_tree(&corpus, &config, &renderer).unwrap();
        assert_eq!(
            tree.file("public/logo.png").unwrap().content(),
            &FileContent::Binary(bytes)
        );
    }

    #[test]
    fn excluded_entries_are_skipped() {
        let corpus = corpus(vec![
            TemplateEntry::text("if-monorepo/turbo.json", "{}"),
            TemplateEntry::text("if-standalone/next.config.ts", "x"),
        ]);
        let config = ProjectConfig::builder("acme")
            .structure(Structure::Standalone)
            .build()
            .unwrap();

        let tree = build_tree(&corpus, &config, &shouting_renderer()).unwrap();
        assert!(tree.file("turbo.json").is_none());
        assert_eq!(tree.file("next.config.ts").unwrap().content().as_text(), Some("X"));
        assert_eq!(tree.file_count(), 1);
    }

    #[test]
    fn render_failure_emits_source_and_continues() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_try_render().returning(|template, _| {
            if template.contains("{{#if") {
                Err(RenderError::new(1, "unclosed block"))
            } else {
                Ok(template.to_string())
            }
        });

        let corpus = corpus(vec![
            TemplateEntry::text("bad.ts.hbs", "{{#if x}}oops"),
            TemplateEntry::text("good.ts", "fine"),
        ]);
        let config = ProjectConfig::builder("acme").build().unwrap();

        let tree = build_tree(&corpus, &config, &renderer).unwrap();
        assert_eq!(tree.file("bad.ts").unwrap().content().as_text(), Some("{{#if x}}oops"));
        assert_eq!(tree.file("good.ts").unwrap().content().as_text(), Some("fine"));
    }

    #[test]
    fn duplicate_final_paths_are_fatal() {
        let corpus = corpus(vec![
            TemplateEntry::text("README.md", "a"),
            TemplateEntry::text("README.md.hbs", "b"),
        ]);
        let config = ProjectConfig::builder("acme").build().unwrap();

        let err = build_tree(&corpus, &config, &shouting_renderer()).unwrap_err();
        assert!(matches!(
            err,
            KilnError::Domain(DomainError::PathCollision { ref path, .. }) if path == "README.md"
        ));
    }

    #[test]
    fn guard_rejects_blank_project_name_before_loading() {
        let mut store = MockCorpusStore::new();
        store.expect_load().never();

        let builder = VfsBuilder::new(Box::new(store), Box::new(shouting_renderer()));
        let config: ProjectConfig = serde_json::from_str(r#"{ "projectName": "" }"#).unwrap();

        let err = builder.build(&config).unwrap_err();
        assert!(matches!(
            err,
            KilnError::Domain(DomainError::MissingRequiredField { .. })
        ));
    }

    #[test]
    fn build_uses_the_injected_store() {
        let mut store = MockCorpusStore::new();
        store.expect_load().times(1).returning(|| {
            Ok(Arc::new(
                Corpus::from_entries([TemplateEntry::text("app/if-payload/page.tsx.hbs", "hi")])
                    .unwrap(),
            ))
        });

        let builder = VfsBuilder::new(Box::new(store), Box::new(shouting_renderer()));
        let config = ProjectConfig::builder("acme")
            .marketing_site(MarketingSite::Payload)
            .build()
            .unwrap();

        let tree = builder.build(&config).unwrap();
        assert_eq!(tree.file("app/page.tsx").unwrap().content().as_text(), Some("HI"));
        assert_eq!(tree.file("app/page.tsx").unwrap().source_path(), "app/if-payload/page.tsx.hbs");
    }

    #[test]
    fn generate_hands_the_tree_to_the_materializer() {
        let mut store = MockCorpusStore::new();
        store.expect_load().returning(|| {
            Ok(Arc::new(
                Corpus::from_entries([TemplateEntry::text("a/b.txt", "x")]).unwrap(),
            ))
        });

        let mut materializer = MockMaterializer::new();
        materializer
            .expect_materialize()
            .withf(|tree| tree.file_count() == 1 && tree.directory_count() == 1)
            .times(1)
            .returning(|_| Ok(()));

        let builder = VfsBuilder::new(Box::new(store), Box::new(shouting_renderer()));
        let config = ProjectConfig::builder("acme").build().unwrap();

        builder.generate(&config, &materializer).unwrap();
    }
}
