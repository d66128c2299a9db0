//! [`CorpusStore`](kiln_core::application::ports::CorpusStore) implementations.

mod archive;
mod classify;
mod directory;
mod memory;

pub use archive::{ARCHIVE_VERSION, ArchiveCorpusStore, ArchiveError, pack_archive, unpack_archive};
pub use classify::{BINARY_EXTENSIONS, is_binary_path};
pub use directory::DirectoryCorpusStore;
pub use memory::InMemoryCorpusStore;
