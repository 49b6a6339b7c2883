//! STAC catalog traversal and collection ingestion core.
//!
//! Discovers, classifies, and normalizes collection metadata by recursively
//! walking a tree of remote catalog documents and paginated API listings,
//! then persists deduplicated results in batches.
//!
//! The fetch/retry engine, the persistent store, and the network probes are
//! external collaborators behind the traits in [`traits`]; this crate owns
//! the handlers the engine invokes per fetched document, the shared result
//! state they mutate, and the flush policy that turns the buffer into
//! durable storage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use stac_harvester::{
//!     handle_catalog, EndpointProber, Flusher, HandlerContext, HarvestConfig,
//!     HttpProbeFetcher, HttpReachabilityProbe, ResultAccumulator,
//! };
//!
//! // Wired once per crawl run, shared by every handler invocation.
//! let config = HarvestConfig::default();
//! let results = ResultAccumulator::new();
//! let prober = EndpointProber::new(Arc::new(HttpProbeFetcher::from_config(&config)?));
//! let flusher = Flusher::from_config(
//!     store,
//!     Arc::new(HttpReachabilityProbe::from_config(&config)?),
//!     &config,
//! );
//!
//! // For each document the fetch engine delivers:
//! handle_catalog(&HandlerContext {
//!     request: &request,
//!     json: &document,
//!     queue: &frontier,
//!     results: &results,
//!     prober: &prober,
//!     config: &config,
//! })
//! .await?;
//!
//! // On threshold or at the end of the run:
//! let outcome = flusher.flush(&results, true).await;
//! ```
//!
//! # Modules
//!
//! - [`stac`] - document classification (catalog / collection / listing)
//! - [`handlers`] - the fetch-engine entry points
//! - [`normalizer`] - pure mapping to canonical records
//! - [`probe`] - best-effort discovery of conventional API endpoints
//! - [`flush`] - buffered batch persistence with failure isolation
//! - [`traits`] - contracts for the external fetch engine, store, and probes
//! - [`testing`] - mock implementations for all of the above

pub mod accumulator;
pub mod config;
pub mod error;
pub mod flush;
pub mod handlers;
pub mod http;
pub mod normalizer;
pub mod probe;
pub mod stac;
pub mod testing;
pub mod traits;
pub mod types;

pub use accumulator::ResultAccumulator;
pub use config::{HarvestConfig, DEFAULT_BATCH_SIZE};
pub use error::{HarvestError, Result};
pub use flush::Flusher;
pub use handlers::{handle_catalog, handle_collections, HandlerContext};
pub use http::{HttpProbeFetcher, HttpReachabilityProbe};
pub use normalizer::{normalize, NormalizeContext};
pub use probe::EndpointProber;
pub use stac::{Classified, Listing};
pub use traits::{CollectionStore, ProbeFetcher, ReachabilityProbe, RequestQueue};
pub use types::{
    CatalogSummary, CrawlRequest, CrawlStats, FlushOutcome, NormalizedCollection, RequestLabel,
    RequestUserData,
};
