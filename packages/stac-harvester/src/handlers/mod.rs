//! Fetch-engine entry points.
//!
//! The external engine invokes one handler per fetched document, many
//! concurrently, all sharing one [`ResultAccumulator`]. Requests labelled
//! `Catalog` route to [`handle_catalog`], requests labelled `Collections`
//! to [`handle_collections`].

mod catalog;
mod collections;

pub use catalog::handle_catalog;
pub use collections::handle_collections;

use serde_json::Value;

use crate::accumulator::ResultAccumulator;
use crate::config::HarvestConfig;
use crate::probe::EndpointProber;
use crate::traits::RequestQueue;
use crate::types::CrawlRequest;

/// Everything a handler invocation receives from the fetch engine.
pub struct HandlerContext<'a> {
    /// The request this document was fetched for.
    pub request: &'a CrawlRequest,

    /// The fetched document, already parsed.
    pub json: &'a Value,

    /// The engine's frontier; the only way to schedule more work.
    pub queue: &'a dyn RequestQueue,

    /// Shared results for the whole crawl run.
    pub results: &'a ResultAccumulator,

    /// Prober run against collections discovered during catalog traversal.
    pub prober: &'a EndpointProber,

    pub config: &'a HarvestConfig,
}
