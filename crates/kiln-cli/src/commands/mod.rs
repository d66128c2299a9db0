//! Command handlers, one module per subcommand.

pub mod check;
pub mod pack;
pub mod tree;

use std::path::{Path, PathBuf};

use tracing::debug;

use kiln_adapters::{ArchiveCorpusStore, DirectoryCorpusStore};
use kiln_core::{application::ports::CorpusStore, domain::Corpus, error::KilnResult};

use crate::config::AppConfig;

/// Where the corpus comes from for this invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSource {
    Archive(PathBuf),
    Directory(PathBuf),
}

impl CorpusSource {
    /// `--corpus` (or `KILN_CORPUS`) wins, and is a directory store when it
    /// names a directory. Otherwise the config's directory, then its archive.
    pub fn resolve(flag: Option<PathBuf>, config: &AppConfig) -> Self {
        let source = match flag {
            Some(path) if path.is_dir() => Self::Directory(path),
            Some(path) => Self::Archive(path),
            None => match &config.corpus.directory {
                Some(dir) => Self::Directory(dir.clone()),
                None => Self::Archive(config.corpus.archive.clone()),
            },
        };
        debug!(?source, "Corpus source resolved");
        source
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Archive(path) | Self::Directory(path) => path,
        }
    }

    /// Store that degrades to an empty corpus when the source is unreadable.
    pub fn store(&self) -> Box<dyn CorpusStore> {
        match self {
            Self::Archive(path) => Box::new(ArchiveCorpusStore::new(path)),
            Self::Directory(path) => Box::new(DirectoryCorpusStore::new(path)),
        }
    }

    /// Load, failing on an unreadable source.
    pub fn load_strict(&self) -> KilnResult<Corpus> {
        match self {
            Self::Archive(path) => ArchiveCorpusStore::new(path).load_strict(),
            Self::Directory(path) => DirectoryCorpusStore::new(path).load_strict(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn flag_directory_beats_config() {
        let dir = TempDir::new().unwrap();
        let source = CorpusSource::resolve(Some(dir.path().to_path_buf()), &AppConfig::default());
        assert_eq!(source, CorpusSource::Directory(dir.path().to_path_buf()));
    }

    #[test]
    fn flag_file_is_an_archive() {
        let source = CorpusSource::resolve(Some("t.json".into()), &AppConfig::default());
        assert_eq!(source, CorpusSource::Archive("t.json".into()));
    }

    #[test]
    fn config_directory_beats_config_archive() {
        let mut config = AppConfig::default();
        assert!(matches!(
            CorpusSource::resolve(None, &config),
            CorpusSource::Archive(_)
        ));

        config.corpus.directory = Some("./templates".into());
        assert_eq!(
            CorpusSource::resolve(None, &config),
            CorpusSource::Directory("./templates".into())
        );
    }
}
