//! Configuration for harvest runs.

use std::time::Duration;

/// Default number of buffered collections before a non-forced flush persists.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Configuration for the traversal and ingestion core.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Buffered collections required before a non-forced flush runs.
    pub batch_size: usize,

    /// Maximum catalog depth to expand children at.
    ///
    /// Cycle-breaking over the link graph is the external frontier's
    /// URL-dedup contract; this guard bounds recursion even when the
    /// frontier misbehaves.
    pub max_depth: u32,

    /// `is_api` flag applied when a listing request does not carry one.
    pub default_is_api: bool,

    /// Conventional endpoint path suffixes the prober tries, in order,
    /// relative to a discovered collection's URL.
    pub probe_paths: Vec<String>,

    /// Timeout applied by HTTP-backed probe implementations.
    pub probe_timeout: Duration,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_depth: 20,
            default_is_api: false,
            probe_paths: vec!["items".to_string(), "collections".to_string()],
            probe_timeout: Duration::from_secs(10),
        }
    }
}

impl HarvestConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flush batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the maximum expansion depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the default `is_api` flag for listing requests that omit one.
    pub fn with_default_is_api(mut self, is_api: bool) -> Self {
        self.default_is_api = is_api;
        self
    }

    /// Replace the prober's candidate path suffixes.
    pub fn with_probe_paths(
        mut self,
        paths: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.probe_paths = paths.into_iter().map(|p| p.into()).collect();
        self
    }

    /// Set the probe timeout.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}
