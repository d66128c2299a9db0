//! Implementation of the `kiln pack` command.

use std::fs;

use tracing::{info, instrument};

use kiln_adapters::{DirectoryCorpusStore, corpus_store::pack_archive};

use crate::{
    cli::PackArgs,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all, fields(dir = %args.dir.display(), output = %args.output.display()))]
pub fn execute(args: PackArgs, output: OutputManager) -> CliResult<()> {
    if args.output.exists() && !args.force {
        return Err(CliError::ArchiveExists { path: args.output });
    }

    let corpus = DirectoryCorpusStore::new(&args.dir).load_strict()?;
    let archive = pack_archive(&corpus)?;

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_cli_context(|| format!("failed to create '{}'", parent.display()))?;
    }
    fs::write(&args.output, archive)
        .with_cli_context(|| format!("failed to write '{}'", args.output.display()))?;

    info!(entries = corpus.len(), "Archive written");
    output.success(&format!(
        "Packed {} entries ({} binary) into {}",
        corpus.len(),
        corpus.binary_count(),
        args.output.display()
    ))?;
    Ok(())
}
