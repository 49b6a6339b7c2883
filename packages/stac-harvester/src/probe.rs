//! Best-effort discovery of conventional API endpoints.

use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use crate::config::HarvestConfig;
use crate::traits::{ProbeFetcher, RequestQueue};
use crate::types::{CrawlRequest, NormalizedCollection};

/// Probes conventional endpoint paths next to a discovered collection.
///
/// Candidates are tried in the configured order; the first that answers with
/// well-formed JSON is enqueued as a collections-listing request and probing
/// stops. When every candidate fails the prober returns without error and
/// without side effects — it is never a hard dependency of its caller.
pub struct EndpointProber {
    fetcher: Arc<dyn ProbeFetcher>,
}

impl EndpointProber {
    /// Create a prober over the given fetcher.
    pub fn new(fetcher: Arc<dyn ProbeFetcher>) -> Self {
        Self { fetcher }
    }

    /// Try the candidate endpoints for one discovered collection.
    pub async fn probe(
        &self,
        collection: &NormalizedCollection,
        request: &CrawlRequest,
        queue: &dyn RequestQueue,
        config: &HarvestConfig,
    ) {
        let base = collection.crawled_url.trim_end_matches('/');

        for suffix in &config.probe_paths {
            let candidate = match Url::parse(&format!("{base}/{suffix}")) {
                Ok(url) => url,
                Err(e) => {
                    debug!(collection_id = %collection.id, suffix = %suffix, error = %e,
                        "skipping unparseable endpoint candidate");
                    continue;
                }
            };

            match self.fetcher.fetch_json(&candidate).await {
                Ok(_) => {
                    // Anything answering a conventional API path is treated
                    // as an API listing of the probed collection's API.
                    let user_data = request
                        .user_data
                        .child(collection.id.clone())
                        .with_is_api(true)
                        .with_api_id(collection.id.clone());
                    let follow_up = CrawlRequest::collections(candidate.clone(), user_data);

                    if let Err(e) = queue.add_requests(vec![follow_up]).await {
                        warn!(url = %candidate, error = %e,
                            "failed to enqueue probed endpoint");
                    } else {
                        debug!(collection_id = %collection.id, url = %candidate,
                            "enqueued endpoint discovered by probing");
                    }
                    return;
                }
                Err(e) => {
                    debug!(url = %candidate, error = %e, "endpoint candidate did not answer");
                }
            }
        }
    }
}
