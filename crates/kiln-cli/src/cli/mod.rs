//! CLI argument definitions using the clap derive API.
//!
//! This module is the only place that knows about argument names, aliases,
//! help text and value enums. No generation logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name     = "kiln",
    bin_name = "kiln",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Render a template corpus into an in-memory project tree",
    long_about = "Kiln assembles a project tree from a template corpus and a \
                  project configuration, without touching the disk. Use it to \
                  inspect what a configuration would generate, to validate a \
                  corpus, and to pack a template directory into an archive.",
    after_help = "EXAMPLES:\n\
        \x20 kiln tree --project acme.toml\n\
        \x20 kiln tree --project acme.json --corpus ./templates --format list\n\
        \x20 kiln check --corpus templates.json\n\
        \x20 kiln pack ./templates --output templates.json",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the tree a project configuration generates.
    #[command(
        visible_alias = "t",
        about = "Show the generated tree for a project",
        after_help = "EXAMPLES:\n\
            \x20 kiln tree --project acme.toml\n\
            \x20 kiln tree --project acme.toml --format json > tree.json\n\
            \x20 kiln tree --project acme.toml --show apps/web/package.json"
    )]
    Tree(TreeArgs),

    /// Load and validate a corpus.
    #[command(
        about = "Validate a corpus and its templates",
        after_help = "EXAMPLES:\n\
            \x20 kiln check\n\
            \x20 kiln check --corpus ./templates"
    )]
    Check(CheckArgs),

    /// Pack a template directory into an archive.
    #[command(
        about = "Pack a template directory into an archive",
        after_help = "EXAMPLES:\n\
            \x20 kiln pack ./templates --output templates.json"
    )]
    Pack(PackArgs),
}

// ── tree ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Project configuration file (`.toml` or `.json`).
    #[arg(short = 'p', long = "project", value_name = "FILE")]
    pub project: PathBuf,

    /// Corpus archive or template directory.
    #[arg(
        long = "corpus",
        value_name = "PATH",
        env = "KILN_CORPUS",
        help = "Corpus archive file or template directory"
    )]
    pub corpus: Option<PathBuf>,

    /// Output format; defaults to `output.format` from the config file.
    #[arg(short = 'f', long = "format", value_enum)]
    pub format: Option<TreeFormat>,

    /// Print the content of one generated file instead of the tree.
    #[arg(long = "show", value_name = "PATH", conflicts_with = "format")]
    pub show: Option<String>,
}

/// How `kiln tree` renders the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeFormat {
    /// Indented tree with box-drawing characters.
    #[default]
    Tree,
    /// One file path per line.
    List,
    /// The whole tree, contents included, as JSON.
    Json,
}

// ── check ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[arg(
        long = "corpus",
        value_name = "PATH",
        env = "KILN_CORPUS",
        help = "Corpus archive file or template directory"
    )]
    pub corpus: Option<PathBuf>,
}

// ── pack ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PackArgs {
    /// Template directory to pack.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Archive file to write.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// Overwrite an existing archive.
    #[arg(long = "force")]
    pub force: bool,
}
