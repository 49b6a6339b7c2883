//! Pure mapping from classified documents to canonical records.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::types::NormalizedCollection;

/// Caller context for normalization.
///
/// Everything environment-dependent (source, URL, API flag, timestamp)
/// arrives here so the mapping itself stays deterministic.
#[derive(Debug, Clone)]
pub struct NormalizeContext<'a> {
    pub source_slug: &'a str,
    pub crawled_url: &'a str,
    pub is_api: bool,
    pub crawled_at: DateTime<Utc>,
}

/// Map a classified collection document to a canonical record.
///
/// Deterministic and side-effect-free: the same `(doc, ordinal, ctx)` always
/// yields an identical record, and the input document is never mutated.
/// Missing `title` defaults to `"Collection {ordinal}"`, missing
/// `description` to the empty string; other optionals stay absent.
pub fn normalize(doc: &Value, ordinal: usize, ctx: &NormalizeContext<'_>) -> NormalizedCollection {
    let str_field = |key: &str| doc.get(key).and_then(Value::as_str).map(str::to_owned);

    let keywords = doc.get("keywords").and_then(Value::as_array).map(|raw| {
        raw.iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    });

    NormalizedCollection {
        id: str_field("id").unwrap_or_else(|| format!("collection-{ordinal}")),
        title: str_field("title").unwrap_or_else(|| format!("Collection {ordinal}")),
        description: str_field("description").unwrap_or_default(),
        keywords,
        license: str_field("license"),
        extent: doc.get("extent").cloned(),
        providers: doc.get("providers").cloned(),
        is_api: ctx.is_api,
        source_slug: ctx.source_slug.to_owned(),
        crawled_url: ctx.crawled_url.to_owned(),
        raw_document: doc.clone(),
        crawled_at: ctx.crawled_at,
        active: None,
    }
}
