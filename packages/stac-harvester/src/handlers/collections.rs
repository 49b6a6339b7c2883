//! Handler for paginated collection listings.

use chrono::Utc;
use tracing::{info, warn};

use crate::error::Result;
use crate::handlers::HandlerContext;
use crate::normalizer::{normalize, NormalizeContext};
use crate::stac;

/// Ingest a listing document (API page or static batch file).
///
/// Elements are normalized independently: a non-compliant element is logged
/// and skipped without touching its siblings — the deliberate contrast with
/// the all-or-nothing catalog handler. A document that is not a listing at
/// all is a soft failure: one warning, zero collections added, `Ok` return.
pub async fn handle_collections(ctx: &HandlerContext<'_>) -> Result<()> {
    let request = ctx.request;
    let is_api = request
        .user_data
        .is_api
        .unwrap_or(ctx.config.default_is_api);

    let Some(listing) = stac::classify_listing(ctx.json) else {
        warn!(url = %request.url, "non-compliant STAC collections");
        return Ok(());
    };

    let normalize_ctx = NormalizeContext {
        source_slug: &request.user_data.catalog_slug,
        crawled_url: request.url.as_str(),
        is_api,
        crawled_at: Utc::now(),
    };

    let mut added = 0usize;
    for (ordinal, element) in listing.elements().iter().enumerate() {
        if !stac::is_collection_like(element) {
            warn!(url = %request.url, index = ordinal,
                "skipping non-compliant collection in listing");
            continue;
        }
        ctx.results
            .push_collection(normalize(element, ordinal, &normalize_ctx));
        added += 1;
    }

    info!(url = %request.url, count = added, is_api, "processed collections listing");
    Ok(())
}
