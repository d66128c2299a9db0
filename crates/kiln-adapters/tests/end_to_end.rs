//! End-to-end generation with the real template language and stores.

use std::{fs, path::Path};

use kiln_adapters::{
    ArchiveCorpusStore, DirectoryCorpusStore, InMemoryCorpusStore, MemoryMaterializer,
    StencilRenderer,
    corpus_store::{is_binary_path, pack_archive},
};
use kiln_core::{
    domain::{Addon, Analytics, DomainError, MarketingSite, Structure, Uploads},
    error::KilnError,
    prelude::*,
};
use tempfile::TempDir;

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0xFF];

fn storefront_corpus() -> Vec<TemplateEntry> {
    vec![
        TemplateEntry::text(
            "package.json.hbs",
            r#"{
  "name": "{{projectNameKebab}}",
  "private": true{{#if (includes addons "husky")}},
  "scripts": { "prepare": "husky" }{{/if}}
}
"#,
        ),
        TemplateEntry::text("_gitignore.hbs", "node_modules\n.next\n"),
        TemplateEntry::text("root/if-monorepo/turbo.json", r#"{ "tasks": {} }"#),
        TemplateEntry::text("if-standalone/next.config.ts", "export default {}\n"),
        TemplateEntry::text(
            "app/if-payload/page.tsx.hbs",
            "export default function Page() {\n  return <h1>{{displayName}}</h1>\n}\n",
        ),
        TemplateEntry::text(
            "app/if-posthog/providers.tsx.hbs",
            "{{#if (eq analytics \"posthog\")}}posthog{{/if}}",
        ),
        TemplateEntry::text(
            "if-monorepo/if-payload/apps/cms/README.md.hbs",
            "# {{projectNamePascal}} CMS\n",
        ),
        TemplateEntry::text(
            "apps/{{projectNameKebab}}/_env.example.hbs",
            "{{#unless (eq uploads \"uploadthing\")}}# no uploads{{else}}UPLOADTHING_TOKEN={{/unless}}\n",
        ),
        TemplateEntry::binary("public/logo.png", PNG.to_vec()),
    ]
}

fn builder(entries: Vec<TemplateEntry>) -> VfsBuilder {
    VfsBuilder::new(
        Box::new(InMemoryCorpusStore::new(entries).unwrap()),
        Box::new(StencilRenderer::new()),
    )
}

fn monorepo_payload() -> ProjectConfig {
    ProjectConfig::builder("Acme Store")
        .display_name("Acme")
        .structure(Structure::Monorepo)
        .marketing_site(MarketingSite::Payload)
        .addons([Addon::Husky])
        .build()
        .unwrap()
}

fn text(tree: &VirtualFileTree, path: &str) -> String {
    tree.file(path)
        .unwrap_or_else(|| panic!("missing {path}"))
        .content()
        .as_text()
        .unwrap()
        .to_string()
}

#[test]
fn payload_monorepo_scenario() {
    let tree = builder(storefront_corpus())
        .build(&monorepo_payload())
        .unwrap();

    assert_eq!(
        text(&tree, "app/page.tsx"),
        "export default function Page() {\n  return <h1>Acme</h1>\n}\n"
    );
    assert_eq!(text(&tree, "root/turbo.json"), r#"{ "tasks": {} }"#);
    assert_eq!(text(&tree, "apps/cms/README.md"), "# AcmeStore CMS\n");
    assert_eq!(text(&tree, ".gitignore"), "node_modules\n.next\n");
    assert_eq!(text(&tree, "apps/acme-store/.env.example"), "# no uploads\n");
    assert!(text(&tree, "package.json").contains(r#""prepare": "husky""#));

    assert!(tree.file("next.config.ts").is_none());
    assert!(tree.file("app/providers.tsx").is_none());
    assert!(tree.get("if-monorepo").is_none());

    // Provenance survives the rename.
    assert_eq!(
        tree.file("app/page.tsx").unwrap().source_path(),
        "app/if-payload/page.tsx.hbs"
    );
}

#[test]
fn marketing_page_follows_the_marketing_site() {
    let corpus = || {
        vec![TemplateEntry::text(
            "app/if-payload/page.tsx.hbs",
            "Marketing: {{marketingSite}}",
        )]
    };

    let payload = builder(corpus()).build(&monorepo_payload()).unwrap();
    assert_eq!(text(&payload, "app/page.tsx"), "Marketing: payload");
    assert_eq!(payload.file_count(), 1);

    let none = ProjectConfig::builder("Acme Store")
        .marketing_site(MarketingSite::None)
        .build()
        .unwrap();
    let tree = builder(corpus()).build(&none).unwrap();
    assert!(tree.directory("app").is_none());
    assert_eq!(tree.file_count(), 0);
    assert_eq!(tree.directory_count(), 0);
}

#[test]
fn standalone_with_providers_scenario() {
    let config = ProjectConfig::builder("solo")
        .structure(Structure::Standalone)
        .analytics(Analytics::Posthog)
        .uploads(Uploads::Uploadthing)
        .build()
        .unwrap();

    let tree = builder(storefront_corpus()).build(&config).unwrap();

    assert!(tree.file("next.config.ts").is_some());
    assert_eq!(text(&tree, "app/providers.tsx"), "posthog");
    assert_eq!(text(&tree, "apps/solo/.env.example"), "UPLOADTHING_TOKEN=\n");
    assert!(tree.file("root/turbo.json").is_none());
    assert!(tree.file("app/page.tsx").is_none());
    assert!(!text(&tree, "package.json").contains("husky"));
}

#[test]
fn counts_match_the_tree() {
    let tree = builder(storefront_corpus())
        .build(&monorepo_payload())
        .unwrap();

    // package.json .gitignore root/turbo.json app/page.tsx apps/cms/README.md
    // apps/acme-store/.env.example public/logo.png
    assert_eq!(tree.file_count(), 7);
    assert_eq!(tree.files().len(), tree.file_count());
    // root app apps apps/cms apps/acme-store public
    assert_eq!(tree.directory_count(), 6);
}

#[test]
fn generation_is_deterministic() {
    let builder = builder(storefront_corpus());
    let config = monorepo_payload();

    let first = builder.build(&config).unwrap();
    let second = builder.build(&config).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn binary_files_pass_through_untouched() {
    let mut entries = storefront_corpus();
    // Bytes that happen to look like a template must not be rendered.
    entries.push(TemplateEntry::binary("public/fonts/odd.woff2", b"{{projectName}}".to_vec()));

    let tree = builder(entries).build(&monorepo_payload()).unwrap();

    assert_eq!(tree.file("public/logo.png").unwrap().content().as_bytes(), PNG);
    let font = tree.file("public/fonts/odd.woff2").unwrap();
    assert!(font.content().is_binary());
    assert_eq!(font.content().as_bytes(), b"{{projectName}}");
}

#[test]
fn one_broken_template_among_a_hundred() {
    let mut entries: Vec<TemplateEntry> = (0..100)
        .map(|i| TemplateEntry::text(format!("src/module_{i:03}.ts.hbs"), "// {{projectNameSnake}}\n"))
        .collect();
    let broken = "{{#if projectName}}never closed";
    entries.push(TemplateEntry::text("src/broken.ts.hbs", broken));

    let tree = builder(entries).build(&monorepo_payload()).unwrap();

    assert_eq!(tree.file_count(), 101);
    assert_eq!(text(&tree, "src/module_042.ts"), "// acme_store\n");
    assert_eq!(text(&tree, "src/broken.ts"), broken);
}

#[test]
fn broken_path_template_keeps_its_unrendered_name() {
    let entries = vec![TemplateEntry::text("docs/{{#if x}}.md", "body")];
    let tree = builder(entries).build(&monorepo_payload()).unwrap();

    assert!(tree.file("docs/{{#if x}}.md").is_some());
}

#[test]
fn colliding_outputs_fail_the_build() {
    let entries = vec![
        TemplateEntry::text("if-monorepo/README.md", "mono"),
        TemplateEntry::text("README.md.hbs", "plain"),
    ];

    let err = builder(entries).build(&monorepo_payload()).unwrap_err();
    assert!(matches!(
        err,
        KilnError::Domain(DomainError::PathCollision { .. })
    ));
}

#[test]
fn conflicting_markers_are_never_included() {
    let entries = vec![TemplateEntry::text("if-monorepo/x/if-standalone/never.txt", "")];

    for structure in [Structure::Monorepo, Structure::Standalone] {
        let config = ProjectConfig::builder("p").structure(structure).build().unwrap();
        let tree = builder(entries.clone()).build(&config).unwrap();
        assert_eq!(tree.file_count(), 0);
    }
}

#[test]
fn materializer_receives_every_node() {
    let materializer = MemoryMaterializer::new();
    let tree = builder(storefront_corpus())
        .generate(&monorepo_payload(), &materializer)
        .unwrap();

    let files: Vec<String> = tree.files().iter().map(|f| f.path().to_string()).collect();
    let mut recorded = materializer.list_files();
    let mut expected = files.clone();
    recorded.sort();
    expected.sort();
    assert_eq!(recorded, expected);
    assert_eq!(materializer.list_directories().len(), tree.directory_count());

    for path in files {
        assert_eq!(
            materializer.read_file(&path).as_ref(),
            Some(tree.file(&path).unwrap().content())
        );
    }
}

fn write(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

#[test]
fn directory_pack_archive_round_trip() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "package.json.hbs", br#"{ "name": "{{projectNameKebab}}" }"#);
    write(dir.path(), "app/if-payload/page.tsx.hbs", b"<h1>{{displayName}}</h1>");
    write(dir.path(), "public/logo.png", PNG);

    let directory = DirectoryCorpusStore::new(dir.path());
    let corpus = directory.load_strict().unwrap();
    assert!(is_binary_path("public/logo.png"));
    assert_eq!(corpus.binary_count(), 1);

    let out = TempDir::new().unwrap();
    let archive_path = out.path().join("templates.json");
    fs::write(&archive_path, pack_archive(&corpus).unwrap()).unwrap();

    let from_directory = VfsBuilder::new(Box::new(directory), Box::new(StencilRenderer::new()))
        .build(&monorepo_payload())
        .unwrap();
    let from_archive = VfsBuilder::new(
        Box::new(ArchiveCorpusStore::new(&archive_path)),
        Box::new(StencilRenderer::new()),
    )
    .build(&monorepo_payload())
    .unwrap();

    assert_eq!(from_directory, from_archive);
    assert_eq!(text(&from_archive, "package.json"), r#"{ "name": "acme-store" }"#);
    assert_eq!(text(&from_archive, "app/page.tsx"), "<h1>Acme</h1>");
}

#[test]
fn missing_archive_generates_an_empty_tree() {
    let tree = VfsBuilder::new(
        Box::new(ArchiveCorpusStore::new("/nowhere/templates.json")),
        Box::new(StencilRenderer::new()),
    )
    .build(&monorepo_payload())
    .unwrap();

    assert_eq!(tree.file_count(), 0);
    assert_eq!(tree.directory_count(), 0);
}
