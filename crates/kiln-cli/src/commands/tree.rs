//! Implementation of the `kiln tree` command.

use std::io::IsTerminal as _;

use tracing::{info, instrument};

use kiln_adapters::StencilRenderer;
use kiln_core::{
    application::VfsBuilder,
    domain::{FileContent, VirtualFileTree},
    error::Context as _,
};

use crate::{
    cli::{TreeArgs, TreeFormat},
    commands::CorpusSource,
    config::AppConfig,
    error::{CliError, CliResult},
    output::{self, OutputManager},
    project::load_project,
};

#[instrument(skip_all, fields(project = %args.project.display()))]
pub fn execute(args: TreeArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let project = load_project(&args.project)?;
    let source = CorpusSource::resolve(args.corpus, &config);

    let builder = VfsBuilder::new(source.store(), Box::new(StencilRenderer::new()));
    let tree = builder.build(&project)?;
    info!(corpus = %source.path().display(), "Tree built");

    if let Some(path) = args.show {
        return show_file(&tree, &path, &output);
    }

    match args.format.unwrap_or(config.output.format) {
        TreeFormat::Tree => {
            let color = output.supports_color() && std::io::stdout().is_terminal();
            output.header(&project.to_string())?;
            for line in output::tree_lines(&tree, color) {
                output.data(&line)?;
            }
            output.print("")?;
            output.print(&output::summary(&tree))?;
        }
        TreeFormat::List => {
            for line in output::list_lines(&tree) {
                output.data(&line)?;
            }
        }
        TreeFormat::Json => {
            let json = serde_json::to_string_pretty(&tree).context("failed to serialise tree")?;
            output.data(&json)?;
        }
    }

    Ok(())
}

fn show_file(tree: &VirtualFileTree, path: &str, output: &OutputManager) -> CliResult<()> {
    let file = tree.file(path).ok_or_else(|| CliError::FileNotInTree {
        path: path.to_string(),
    })?;

    match file.content() {
        FileContent::Text(text) => output.data(text.trim_end_matches('\n'))?,
        FileContent::Binary(bytes) => {
            output.warning(&format!("{path} is binary ({} bytes)", bytes.len()))?
        }
    }
    Ok(())
}
