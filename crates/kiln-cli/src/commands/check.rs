//! Implementation of the `kiln check` command.
//!
//! Loads the corpus strictly, then parses every text template and every
//! templated path. Parse failures are listed with their line; generation
//! would copy those files verbatim.

use std::collections::BTreeMap;

use tracing::{instrument, warn};

use kiln_adapters::renderer;
use kiln_core::domain::{Corpus, EntryContent, markers, naming};

use crate::{
    cli::CheckArgs,
    commands::CorpusSource,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// One template that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub path: String,
    pub line: usize,
    pub message: String,
    /// The failure is in the path, not the content.
    pub in_path: bool,
}

#[instrument(skip_all)]
pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let source = CorpusSource::resolve(args.corpus, &config);
    let corpus = source.load_strict()?;

    output.header(&format!("Corpus: {}", source.path().display()))?;
    output.print(&format!(
        "  {} entries ({} text, {} binary)",
        corpus.len(),
        corpus.len() - corpus.binary_count(),
        corpus.binary_count()
    ))?;

    let usage = marker_usage(&corpus);
    if !usage.is_empty() {
        output.print("  conditional markers:")?;
        for (marker, count) in &usage {
            output.print(&format!("    {marker}: {count}"))?;
        }
    }

    let problems = find_problems(&corpus);
    if problems.is_empty() {
        output.success("All templates parse")?;
        return Ok(());
    }

    for problem in &problems {
        let location = if problem.in_path { " (path)" } else { "" };
        warn!(path = %problem.path, line = problem.line, "{}", problem.message);
        output.warning(&format!(
            "{}{location}:{}: {}",
            problem.path, problem.line, problem.message
        ))?;
    }

    Err(CliError::BrokenTemplates {
        count: problems.len(),
    })
}

/// Entries per conditional marker.
pub fn marker_usage(corpus: &Corpus) -> BTreeMap<&'static str, usize> {
    let mut usage = BTreeMap::new();
    for entry in corpus {
        for marker in markers::markers(entry.path()) {
            *usage.entry(marker.segment()).or_insert(0) += 1;
        }
    }
    usage
}

/// Parse every templated path and text body.
pub fn find_problems(corpus: &Corpus) -> Vec<Problem> {
    let mut problems = Vec::new();

    for entry in corpus {
        let prepared = naming::prepare(entry.path());
        if naming::has_delimiters(&prepared) {
            if let Err(e) = renderer::parse(&prepared) {
                problems.push(Problem {
                    path: entry.path().to_string(),
                    line: e.line,
                    message: e.message,
                    in_path: true,
                });
            }
        }

        if let EntryContent::Text(text) = entry.content() {
            if let Err(e) = renderer::parse(text) {
                problems.push(Problem {
                    path: entry.path().to_string(),
                    line: e.line,
                    message: e.message,
                    in_path: false,
                });
            }
        }
    }

    problems
}
