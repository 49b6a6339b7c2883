//! Normalized records, catalog summaries, and run statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::stac;

/// A collection record in canonical form, ready for persistence.
///
/// Created once by the normalizer and never mutated afterwards, except for
/// the flush engine attaching the liveness flag post-persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCollection {
    pub id: String,
    pub title: String,
    pub description: String,
    pub keywords: Option<Vec<String>>,
    pub license: Option<String>,
    pub extent: Option<Value>,
    pub providers: Option<Value>,

    /// Whether this record was discovered via a paginated API listing
    /// (set by the caller context, never inferred from document content).
    pub is_api: bool,

    /// Slug of the source the record was harvested from.
    pub source_slug: String,

    /// URL of the document the record was normalized from.
    pub crawled_url: String,

    /// The raw classified document, kept verbatim.
    pub raw_document: Value,

    /// When the document was fetched.
    pub crawled_at: DateTime<Utc>,

    /// Liveness flag attached by the flush engine after a successful save.
    pub active: Option<bool>,
}

impl NormalizedCollection {
    /// URL to probe for liveness: the record's declared self link when
    /// present, otherwise the URL it was crawled from.
    pub fn liveness_url(&self) -> &str {
        stac::self_link(&self.raw_document).unwrap_or(self.crawled_url.as_str())
    }
}

/// A catalog encountered during traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub id: String,
    pub title: Option<String>,
    pub url: String,
    pub depth: u32,
    pub parent_id: Option<String>,
}

/// Counters for one crawl run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlStats {
    pub catalogs_processed: usize,
    pub stac_compliant: usize,
    /// Incremented exactly once per successfully normalized item,
    /// independent of later flush outcome.
    pub collections_found: usize,
    pub collections_saved: usize,
    pub collections_failed: usize,
}

/// Per-call accounting returned by the flush engine.
///
/// Invariants: `saved + failed` equals the number of records attempted in
/// that flush, and `active + inactive` equals `saved`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlushOutcome {
    pub saved: usize,
    pub failed: usize,
    pub active: usize,
    pub inactive: usize,
}

impl FlushOutcome {
    /// Number of records this flush attempted to persist.
    pub fn attempted(&self) -> usize {
        self.saved + self.failed
    }

    /// True when nothing was attempted (short-circuited flush).
    pub fn is_empty(&self) -> bool {
        self.attempted() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(raw: Value) -> NormalizedCollection {
        NormalizedCollection {
            id: "c1".to_string(),
            title: "C1".to_string(),
            description: String::new(),
            keywords: None,
            license: None,
            extent: None,
            providers: None,
            is_api: false,
            source_slug: "example".to_string(),
            crawled_url: "https://ex.com/c1.json".to_string(),
            raw_document: raw,
            crawled_at: Utc::now(),
            active: None,
        }
    }

    #[test]
    fn test_liveness_url_prefers_self_link() {
        let rec = record(json!({
            "links": [{"rel": "self", "href": "https://ex.com/self/c1"}]
        }));
        assert_eq!(rec.liveness_url(), "https://ex.com/self/c1");
    }

    #[test]
    fn test_liveness_url_falls_back_to_crawled_url() {
        let rec = record(json!({"links": []}));
        assert_eq!(rec.liveness_url(), "https://ex.com/c1.json");
    }

    #[test]
    fn test_flush_outcome_attempted() {
        let outcome = FlushOutcome {
            saved: 3,
            failed: 2,
            active: 1,
            inactive: 2,
        };
        assert_eq!(outcome.attempted(), 5);
        assert!(!outcome.is_empty());
        assert!(FlushOutcome::default().is_empty());
    }
}
