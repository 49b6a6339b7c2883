//! Buffered batch persistence with per-record failure isolation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::accumulator::ResultAccumulator;
use crate::config::{HarvestConfig, DEFAULT_BATCH_SIZE};
use crate::traits::{CollectionStore, ReachabilityProbe};
use crate::types::FlushOutcome;

/// Persists buffered collections to the store.
///
/// Flush is deliberately not transactional across records: a record that
/// fails to persist is logged, counted, and dropped from this crawl run —
/// never retried or re-buffered — while its siblings proceed. Each saved
/// record additionally gets a liveness check against its self link. Calls
/// on the same accumulator are serialized through an internal lock.
pub struct Flusher {
    store: Arc<dyn CollectionStore>,
    probe: Arc<dyn ReachabilityProbe>,
    batch_size: usize,
    single_flight: tokio::sync::Mutex<()>,
}

impl Flusher {
    /// Create a flusher with the default batch size.
    pub fn new(store: Arc<dyn CollectionStore>, probe: Arc<dyn ReachabilityProbe>) -> Self {
        Self {
            store,
            probe,
            batch_size: DEFAULT_BATCH_SIZE,
            single_flight: tokio::sync::Mutex::new(()),
        }
    }

    /// Create a flusher taking its batch threshold from the run config.
    pub fn from_config(
        store: Arc<dyn CollectionStore>,
        probe: Arc<dyn ReachabilityProbe>,
        config: &HarvestConfig,
    ) -> Self {
        Self::new(store, probe).with_batch_size(config.batch_size)
    }

    /// Set the batch threshold for non-forced flushes.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Persist the buffered records.
    ///
    /// Without `force`, returns an empty outcome and leaves the buffer
    /// untouched while fewer than `batch_size` records are buffered.
    /// Otherwise the buffer is taken in full (and is therefore empty
    /// afterwards regardless of per-record failures) and each record is
    /// upserted sequentially to bound load on the store.
    pub async fn flush(&self, results: &ResultAccumulator, force: bool) -> FlushOutcome {
        let _guard = self.single_flight.lock().await;

        if !force && results.buffered_len() < self.batch_size {
            return FlushOutcome::default();
        }

        let batch = results.drain_buffer();
        let attempted = batch.len();
        let mut outcome = FlushOutcome::default();

        for mut record in batch {
            match self.store.insert_or_update_collection(&record).await {
                Ok(stored_id) => {
                    outcome.saved += 1;

                    // Probe failure marks the record inactive; it never
                    // downgrades a save.
                    let reachable = self.probe.check_reachable(record.liveness_url()).await;
                    record.active = Some(reachable);
                    if reachable {
                        outcome.active += 1;
                    } else {
                        outcome.inactive += 1;
                    }
                    debug!(collection_id = %stored_id, active = reachable, "saved collection");
                }
                Err(e) => {
                    warn!(collection_id = %record.id, error = %e, "failed to save collection");
                    outcome.failed += 1;
                }
            }
        }

        results.record_flush_outcome(&outcome);
        info!(
            attempted,
            saved = outcome.saved,
            failed = outcome.failed,
            active = outcome.active,
            inactive = outcome.inactive,
            "flushed collection buffer"
        );
        outcome
    }
}
