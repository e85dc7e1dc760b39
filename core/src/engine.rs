use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::IndexConfig;
use crate::error::{EngineError, Result};
use crate::index::{self, Document, InvertedIndex, SkippedDocument};
use crate::search::{self, SearchHit};
use crate::tokenizer::Analyzer;

/// Host-owned search handle: one validated configuration, one analyzer, and
/// the current index snapshot.
///
/// There is no process-wide state; a host can run as many independent
/// engines as it likes. Rebuilds construct the new index off to the side and
/// swap it in under a short write lock, so a query sees either the old or
/// the new snapshot, never a partially built one. Queries that already hold
/// an `Arc` to the old snapshot keep reading it until they finish.
pub struct SearchEngine {
    config: IndexConfig,
    analyzer: Analyzer,
    current: RwLock<Option<Arc<InvertedIndex>>>,
}

impl SearchEngine {
    /// Create an engine with no index yet. Fails on invalid configuration.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = Analyzer::new(&config.analyzer);
        Ok(Self {
            config,
            analyzer,
            current: RwLock::new(None),
        })
    }

    /// Build a fresh index from `documents` and make it current.
    ///
    /// Returns the records rejected during the build; the caller decides
    /// whether a partially indexed collection is acceptable.
    pub fn rebuild<I>(&self, documents: I) -> Result<Vec<SkippedDocument>>
    where
        I: IntoIterator<Item = Document>,
    {
        let report = index::build(documents, &self.config)?;
        let snapshot = Arc::new(report.index);
        tracing::info!(
            num_docs = snapshot.total_docs(),
            num_terms = snapshot.term_count(),
            skipped = report.skipped.len(),
            "index swapped in"
        );
        *self.current.write() = Some(snapshot);
        Ok(report.skipped)
    }

    /// Rank documents against `query`, highest score first.
    ///
    /// Fails with [`EngineError::NotInitialized`] until the first successful
    /// [`rebuild`](Self::rebuild).
    pub fn search(&self, query: &str, top_k: Option<usize>) -> Result<Vec<SearchHit>> {
        let snapshot = self.snapshot().ok_or(EngineError::NotInitialized)?;
        Ok(search::rank(
            &snapshot,
            &self.analyzer,
            &self.config,
            query,
            top_k,
        ))
    }

    /// The current snapshot, if a build has completed.
    pub fn snapshot(&self) -> Option<Arc<InvertedIndex>> {
        self.current.read().clone()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }
}
