//! In-memory corpus store.

use std::sync::Arc;

use kiln_core::{
    application::ports::CorpusStore,
    domain::{Corpus, TemplateEntry},
    error::KilnResult,
};

/// Serves a corpus built in code. Cloning shares the corpus.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpusStore {
    corpus: Arc<Corpus>,
}

impl InMemoryCorpusStore {
    pub fn new(entries: impl IntoIterator<Item = TemplateEntry>) -> KilnResult<Self> {
        Ok(Self::from_corpus(Corpus::from_entries(entries)?))
    }

    pub fn from_corpus(corpus: Corpus) -> Self {
        Self {
            corpus: Arc::new(corpus),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }
}

impl CorpusStore for InMemoryCorpusStore {
    fn load(&self) -> KilnResult<Arc<Corpus>> {
        Ok(Arc::clone(&self.corpus))
    }
}
