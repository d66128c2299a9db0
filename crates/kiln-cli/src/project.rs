//! Reading a [`ProjectConfig`] from a TOML or JSON file.
//!
//! The format is chosen by extension: `.json` is JSON, anything else TOML.

use std::{fs, io, path::Path};

use tracing::{debug, instrument};

use kiln_core::domain::ProjectConfig;

use crate::error::{CliError, CliResult, IntoCli};

#[instrument(fields(path = %path.display()))]
pub fn load_project(path: &Path) -> CliResult<ProjectConfig> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(CliError::ProjectNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(e).with_cli_context(|| format!("failed to read '{}'", path.display()));
        }
    };

    let config = parse_project(path, &raw)?;
    config.validate().map_err(|e| CliError::InvalidProject {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    debug!(project = %config, "Project configuration loaded");
    Ok(config)
}

fn parse_project(path: &Path, raw: &str) -> CliResult<ProjectConfig> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        serde_json::from_str(raw).map_err(|e| e.to_string())
    } else {
        toml::from_str(raw).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| CliError::InvalidProject {
        path: path.to_path_buf(),
        message,
    })
}
