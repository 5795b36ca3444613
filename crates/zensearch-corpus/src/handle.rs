//! Shared, swappable corpus snapshot.
//!
//! Readers always see one complete corpus: a reload replaces the whole
//! snapshot, it never mutates the one in use.

use std::sync::Arc;
use tokio::sync::watch;
use zensearch_core::{Corpus, CorpusProvider, Result, SearchError};

/// Either the current corpus or the reason there is none.
pub type Snapshot = Result<Arc<Corpus>>;

#[derive(Debug, Clone)]
pub struct CorpusHandle {
    tx: Arc<watch::Sender<Snapshot>>,
}

impl CorpusHandle {
    pub fn new(initial: Snapshot) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    pub fn from_corpus(corpus: Arc<Corpus>) -> Self {
        Self::new(Ok(corpus))
    }

    /// Handle whose every read fails with `err` until a corpus is published.
    pub fn unavailable(err: SearchError) -> Self {
        Self::new(Err(err))
    }

    /// Swap in a new corpus for all subsequent reads.
    pub fn publish(&self, corpus: Arc<Corpus>) {
        self.tx.send_replace(Ok(corpus));
    }

    /// Whether a corpus is currently available.
    pub fn is_ready(&self) -> bool {
        self.tx.borrow().is_ok()
    }

    /// Change notifications, for callers that want to react to reloads.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }
}

impl CorpusProvider for CorpusHandle {
    fn corpus(&self) -> Result<Arc<Corpus>> {
        (*self.tx.borrow()).clone()
    }
}
