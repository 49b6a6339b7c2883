//! Handler for documents fetched during catalog traversal.

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{HarvestError, Result};
use crate::handlers::HandlerContext;
use crate::normalizer::{normalize, NormalizeContext};
use crate::stac::{self, Classified};
use crate::types::{CatalogSummary, CrawlRequest};

/// Classify a fetched document and either expand its children or ingest it
/// as a collection.
///
/// Classification failure is fatal to the request: the typed error is
/// surfaced to the external fetch engine, which owns retry policy. Cycle
/// safety over the link graph is the frontier's URL-dedup contract; this
/// handler only increments depth per hop and stops expanding at the
/// configured maximum.
pub async fn handle_catalog(ctx: &HandlerContext<'_>) -> Result<()> {
    match stac::classify(ctx.json) {
        Classified::Invalid => {
            warn!(url = %ctx.request.url, "document failed STAC classification");
            Err(HarvestError::StacValidationFailed {
                url: ctx.request.url.to_string(),
            })
        }
        Classified::Catalog => expand_catalog(ctx).await,
        Classified::Collection => {
            ingest_collection(ctx).await;
            Ok(())
        }
    }
}

/// Record the catalog and enqueue its child links as one batch.
async fn expand_catalog(ctx: &HandlerContext<'_>) -> Result<()> {
    let request = ctx.request;
    let user_data = &request.user_data;

    info!(url = %request.url, depth = user_data.depth, "processing catalog");
    ctx.results.record_catalog(CatalogSummary {
        id: user_data.catalog_id.clone(),
        title: ctx
            .json
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_owned),
        url: request.url.to_string(),
        depth: user_data.depth,
        parent_id: user_data.parent_id.clone(),
    });

    if user_data.depth >= ctx.config.max_depth {
        debug!(url = %request.url, depth = user_data.depth,
            "max depth reached, not expanding children");
        return Ok(());
    }

    let mut children = Vec::new();
    for link in stac::child_links(ctx.json) {
        let href = match link.href.as_deref() {
            Some(href) if !href.trim().is_empty() => href,
            _ => {
                warn!(url = %request.url, "skipping invalid URL in child link");
                continue;
            }
        };

        // Url::join resolves relative hrefs and passes absolute ones through.
        let resolved = match request.url.join(href) {
            Ok(url) => url,
            Err(e) => {
                warn!(url = %request.url, href = %href, error = %e,
                    "skipping invalid URL in child link");
                continue;
            }
        };

        let catalog_id = link.title.clone().unwrap_or_else(|| resolved.to_string());
        children.push(CrawlRequest::catalog(resolved, user_data.child(catalog_id)));
    }

    if !children.is_empty() {
        debug!(url = %request.url, count = children.len(), "enqueueing child requests");
        ctx.queue.add_requests(children).await?;
    }
    Ok(())
}

/// Normalize a collection reached while walking catalogs and probe its
/// conventional endpoints.
async fn ingest_collection(ctx: &HandlerContext<'_>) {
    let request = ctx.request;
    let record = normalize(
        ctx.json,
        0,
        &NormalizeContext {
            source_slug: &request.user_data.catalog_slug,
            crawled_url: request.url.as_str(),
            // Catalog traversal never marks records as API-discovered.
            is_api: false,
            crawled_at: Utc::now(),
        },
    );

    info!(collection_id = %record.id, url = %request.url, "found collection");
    ctx.results.push_collection(record.clone());

    // Best-effort: prober failures never fail this handler.
    ctx.prober
        .probe(&record, request, ctx.queue, ctx.config)
        .await;
}
