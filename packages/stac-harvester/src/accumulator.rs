//! Shared result state for one crawl run.
//!
//! Handlers run as many concurrent tasks sharing one accumulator, so every
//! mutation goes through a method holding the single internal lock. Keeping
//! one lock over buffer, catalog list, and stats makes cross-field
//! invariants (buffer append + `collections_found` increment) atomic.

use std::sync::Mutex;

use crate::types::{CatalogSummary, CrawlStats, FlushOutcome, NormalizedCollection};

#[derive(Debug, Default)]
struct AccumulatorState {
    collections: Vec<NormalizedCollection>,
    catalogs: Vec<CatalogSummary>,
    stats: CrawlStats,
}

/// Buffered results and statistics, shared across handler invocations.
#[derive(Debug, Default)]
pub struct ResultAccumulator {
    inner: Mutex<AccumulatorState>,
}

impl ResultAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer a normalized collection and count it as found.
    pub fn push_collection(&self, record: NormalizedCollection) {
        let mut state = self.inner.lock().unwrap();
        state.collections.push(record);
        state.stats.collections_found += 1;
    }

    /// Record a catalog encountered during traversal.
    pub fn record_catalog(&self, summary: CatalogSummary) {
        let mut state = self.inner.lock().unwrap();
        state.catalogs.push(summary);
        state.stats.catalogs_processed += 1;
        state.stats.stac_compliant += 1;
    }

    /// Number of records currently buffered.
    pub fn buffered_len(&self) -> usize {
        self.inner.lock().unwrap().collections.len()
    }

    /// Take the whole buffer, leaving it empty.
    ///
    /// The swap happens under the lock, so the flush engine can release it
    /// before any store I/O and the buffer is already cleared no matter how
    /// individual persists go.
    pub fn drain_buffer(&self) -> Vec<NormalizedCollection> {
        let mut state = self.inner.lock().unwrap();
        std::mem::take(&mut state.collections)
    }

    /// Fold a flush outcome into the run statistics.
    pub fn record_flush_outcome(&self, outcome: &FlushOutcome) {
        let mut state = self.inner.lock().unwrap();
        state.stats.collections_saved += outcome.saved;
        state.stats.collections_failed += outcome.failed;
    }

    /// Snapshot of the run statistics.
    pub fn stats(&self) -> CrawlStats {
        self.inner.lock().unwrap().stats
    }

    /// Snapshot of the catalogs seen so far.
    pub fn catalogs(&self) -> Vec<CatalogSummary> {
        self.inner.lock().unwrap().catalogs.clone()
    }

    /// Snapshot of the buffered collections (for inspection and tests).
    pub fn buffered_collections(&self) -> Vec<NormalizedCollection> {
        self.inner.lock().unwrap().collections.clone()
    }
}
