//! Integration tests for kiln-core.
//!
//! The renderer here is a tiny fake that only understands `{{name}}`
//! substitution; the real template language lives in kiln-adapters.

use std::sync::Arc;

use kiln_core::{
    application::{VfsBuilder, build_tree},
    domain::{MarketingSite, RenderError, Structure},
    prelude::*,
};

/// `{{var}}` substitution over top-level context keys; any block tag fails.
struct FakeRenderer;

impl TemplateRenderer for FakeRenderer {
    fn try_render(&self, template: &str, context: &RenderContext) -> Result<String, RenderError> {
        if template.contains("{{#") {
            return Err(RenderError::new(1, "blocks are not supported"));
        }

        let mut out = String::new();
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or_else(|| RenderError::new(1, "unclosed tag"))?;
            let key = after[..end].trim();
            if let Some(value) = context.get(key).and_then(|v| v.as_str()) {
                out.push_str(value);
            }
            rest = &after[end + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

struct FixedStore(Arc<Corpus>);

impl CorpusStore for FixedStore {
    fn load(&self) -> KilnResult<Arc<Corpus>> {
        Ok(Arc::clone(&self.0))
    }
}

fn sample_corpus() -> Corpus {
    Corpus::from_entries([
        TemplateEntry::text("package.json.hbs", r#"{ "name": "{{projectNameKebab}}" }"#),
        TemplateEntry::text("_gitignore.hbs", "node_modules\n"),
        TemplateEntry::text("root/if-monorepo/turbo.json", "{}"),
        TemplateEntry::text("if-standalone/next.config.ts", "export default {}"),
        TemplateEntry::text("app/if-payload/page.tsx.hbs", "<h1>{{displayName}}</h1>"),
        TemplateEntry::text("apps/{{projectNameKebab}}/README.md.hbs", "# {{projectName}}"),
        TemplateEntry::binary("public/favicon.ico", vec![0, 0, 1, 0, 0xFF]),
    ])
    .unwrap()
}

fn config(structure: Structure, site: MarketingSite) -> ProjectConfig {
    ProjectConfig::builder("Acme Web")
        .structure(structure)
        .marketing_site(site)
        .build()
        .unwrap()
}

#[test]
fn test_full_build_workflow() {
    let builder = VfsBuilder::new(
        Box::new(FixedStore(Arc::new(sample_corpus()))),
        Box::new(FakeRenderer),
    );

    let tree = builder
        .build(&config(Structure::Monorepo, MarketingSite::Payload))
        .unwrap();

    assert_eq!(
        tree.file("package.json").unwrap().content().as_text(),
        Some(r#"{ "name": "acme-web" }"#)
    );
    assert!(tree.file(".gitignore").is_some());
    assert!(tree.file("root/turbo.json").is_some());
    assert!(tree.file("next.config.ts").is_none());
    assert_eq!(
        tree.file("app/page.tsx").unwrap().content().as_text(),
        Some("<h1>Acme Web</h1>")
    );
    assert_eq!(
        tree.file("apps/acme-web/README.md").unwrap().content().as_text(),
        Some("# Acme Web")
    );
}

#[test]
fn test_counts_match_the_tree() {
    let tree = build_tree(
        &sample_corpus(),
        &config(Structure::Monorepo, MarketingSite::Payload),
        &FakeRenderer,
    )
    .unwrap();

    fn walk(dir: &VirtualDirectory, files: &mut usize, dirs: &mut usize) {
        for child in dir.children() {
            match child {
                VirtualNode::File(_) => *files += 1,
                VirtualNode::Directory(sub) => {
                    *dirs += 1;
                    walk(sub, files, dirs);
                }
            }
        }
    }

    let (mut files, mut dirs) = (0, 0);
    walk(tree.root(), &mut files, &mut dirs);

    assert_eq!(tree.file_count(), files);
    assert_eq!(tree.directory_count(), dirs);
    // root/, app/, apps/, apps/acme-web/, public/
    assert_eq!(dirs, 5);
    assert_eq!(files, 6);
}

#[test]
fn test_build_is_deterministic() {
    let corpus = sample_corpus();
    let cfg = config(Structure::Standalone, MarketingSite::None);

    let first = build_tree(&corpus, &cfg, &FakeRenderer).unwrap();
    let second = build_tree(&corpus, &cfg, &FakeRenderer).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_binary_content_is_byte_identical() {
    let tree = build_tree(
        &sample_corpus(),
        &config(Structure::Standalone, MarketingSite::None),
        &FakeRenderer,
    )
    .unwrap();

    assert_eq!(
        tree.file("public/favicon.ico").unwrap().content().as_bytes(),
        &[0, 0, 1, 0, 0xFF]
    );
}

#[test]
fn test_one_bad_template_among_many() {
    let mut entries: Vec<TemplateEntry> = (0..100)
        .map(|i| TemplateEntry::text(format!("src/file{i:03}.ts.hbs"), "// {{projectName}}"))
        .collect();
    entries.push(TemplateEntry::text("src/broken.ts.hbs", "{{#if analytics}}"));

    let corpus = Corpus::from_entries(entries).unwrap();
    let tree = build_tree(
        &corpus,
        &config(Structure::Standalone, MarketingSite::None),
        &FakeRenderer,
    )
    .unwrap();

    assert_eq!(tree.file_count(), 101);
    assert_eq!(
        tree.file("src/broken.ts").unwrap().content().as_text(),
        Some("{{#if analytics}}")
    );
    assert_eq!(
        tree.file("src/file042.ts").unwrap().content().as_text(),
        Some("// Acme Web")
    );
}
