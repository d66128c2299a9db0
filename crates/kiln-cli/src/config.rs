//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The CLI
//! layer owns it; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags and `KILN_CORPUS` (handled by clap at the call-site)
//! 2. The file passed with `--config`, which must exist
//! 3. The platform config file (`~/.config/kiln/config.toml` on Linux)
//! 4. `.kiln.toml` in the current directory
//! 5. Built-in defaults
//!
//! ```toml
//! [corpus]
//! archive   = "/usr/share/kiln/templates.json"
//! directory = "./templates"    # optional; wins over `archive`
//!
//! [output]
//! no_color = false
//! format   = "tree"            # tree | list | json
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::TreeFormat;

/// Name of the project-local config file.
pub const LOCAL_CONFIG_FILE: &str = ".kiln.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub corpus: CorpusConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorpusConfig {
    /// Archive read when no directory or `--corpus` is given.
    pub archive: PathBuf,
    /// Template directory used instead of the archive.
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: TreeFormat,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            archive: default_archive_path(),
            directory: None,
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path given with `--config`. A missing explicit file
    /// is an error; a missing default file is not.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        if let Some(path) = config_file {
            return Self::from_file(path);
        }

        for candidate in [Self::config_path(), PathBuf::from(LOCAL_CONFIG_FILE)] {
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;

        debug!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Platform config file, falling back to `.kiln.toml`.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "kiln", "kiln")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }
}

/// `templates.json` in the platform data directory, else in the current
/// directory.
fn default_archive_path() -> PathBuf {
    directories::ProjectDirs::from("dev", "kiln", "kiln")
        .map(|d| d.data_dir().join("templates.json"))
        .unwrap_or_else(|| PathBuf::from("templates.json"))
}
