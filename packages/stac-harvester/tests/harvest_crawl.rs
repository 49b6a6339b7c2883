//! End-to-end crawl over an in-memory catalog tree.
//!
//! A small driver plays the role of the external fetch engine: it maintains
//! a URL-deduplicating frontier, serves documents from a map, and dispatches
//! each to the handler its label selects.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use serde_json::{json, Value};
use url::Url;

use stac_harvester::testing::{MemoryCollectionStore, MockProbeFetcher, MockQueue, MockReachabilityProbe};
use stac_harvester::{
    handle_catalog, handle_collections, CrawlRequest, EndpointProber, Flusher, HandlerContext,
    HarvestConfig, RequestLabel, RequestUserData, ResultAccumulator,
};

struct Harness {
    documents: HashMap<String, Value>,
    queue: MockQueue,
    results: ResultAccumulator,
    prober: EndpointProber,
    config: HarvestConfig,
}

impl Harness {
    fn new(documents: HashMap<String, Value>, fetcher: Arc<MockProbeFetcher>) -> Self {
        Self {
            documents,
            queue: MockQueue::new(),
            results: ResultAccumulator::new(),
            prober: EndpointProber::new(fetcher),
            config: HarvestConfig::default(),
        }
    }

    /// Drive the crawl to exhaustion, breadth-first, deduplicating URLs the
    /// way the external frontier contract requires.
    async fn run(&self, root: CrawlRequest) {
        let mut pending = VecDeque::from([root]);
        let mut visited = HashSet::new();

        while let Some(request) = pending.pop_front() {
            if !visited.insert(request.url.to_string()) {
                continue;
            }
            let Some(json) = self.documents.get(request.url.as_str()) else {
                continue;
            };

            let ctx = HandlerContext {
                request: &request,
                json,
                queue: &self.queue,
                results: &self.results,
                prober: &self.prober,
                config: &self.config,
            };
            // Fetch-engine retry policy is out of scope here; a failed
            // document is simply not retried by the driver.
            let _ = match request.label {
                RequestLabel::Catalog => handle_catalog(&ctx).await,
                RequestLabel::Collections => handle_collections(&ctx).await,
            };

            pending.extend(self.queue.take_all());
        }
    }
}

fn tree() -> HashMap<String, Value> {
    let mut documents = HashMap::new();
    documents.insert(
        "https://ex.com/catalog.json".to_string(),
        json!({
            "type": "Catalog",
            "id": "root",
            "title": "Root catalog",
            "links": [
                {"rel": "child", "href": "./child.json", "title": "Sub"},
                {"rel": "child", "href": null, "title": "Broken"},
                {"rel": "child", "href": "./c1.json", "title": "C1"}
            ]
        }),
    );
    documents.insert(
        "https://ex.com/child.json".to_string(),
        json!({
            "type": "Catalog",
            "id": "sub",
            "title": "Sub catalog",
            "links": [
                // Cycle back to the root; the frontier's URL dedup breaks it.
                {"rel": "child", "href": "./catalog.json", "title": "Root"},
                {"rel": "child", "href": "./c2.json", "title": "C2"}
            ]
        }),
    );
    documents.insert(
        "https://ex.com/c1.json".to_string(),
        json!({
            "type": "Collection",
            "id": "c1",
            "title": "Collection one",
            "description": "First dataset",
            "license": "CC-BY-4.0",
            "links": [{"rel": "self", "href": "https://ex.com/self/c1"}]
        }),
    );
    documents.insert(
        "https://ex.com/c2.json".to_string(),
        json!({
            "type": "Collection",
            "id": "c2",
            "title": "Collection two",
            "description": "Second dataset"
        }),
    );
    // Listing behind the endpoint the prober discovers next to c1.
    documents.insert(
        "https://ex.com/c1.json/collections".to_string(),
        json!({
            "collections": [
                {"id": "api-1", "title": "API one"},
                {"id": "c1", "title": "Collection one (API)"}
            ],
            "links": []
        }),
    );
    documents
}

#[tokio::test]
async fn test_full_crawl_then_flush() {
    let fetcher = Arc::new(
        MockProbeFetcher::new()
            .with_response("https://ex.com/c1.json/collections", json!({"collections": []})),
    );
    let harness = Harness::new(tree(), fetcher);

    let root = CrawlRequest::catalog(
        Url::parse("https://ex.com/catalog.json").unwrap(),
        RequestUserData::root("Root", "example"),
    );
    harness.run(root).await;

    // Traversal: two catalogs (the cycle back to the root is not revisited),
    // two collections from catalog walking, two more from the probed
    // API listing.
    let stats = harness.results.stats();
    assert_eq!(stats.catalogs_processed, 2);
    assert_eq!(stats.stac_compliant, 2);
    assert_eq!(stats.collections_found, 4);

    let buffered = harness.results.buffered_collections();
    assert_eq!(buffered.len(), 4);
    let api_flags: Vec<bool> = buffered.iter().map(|r| r.is_api).collect();
    assert_eq!(api_flags, vec![false, false, true, true]);

    // Flush through a store that rejects c2 and a probe that finds c1's
    // self link dead.
    let store = Arc::new(MemoryCollectionStore::new().with_failure("c2"));
    let probe =
        Arc::new(MockReachabilityProbe::new().with_unreachable("https://ex.com/self/c1"));
    let flusher = Flusher::new(store.clone(), probe.clone());

    let outcome = flusher.flush(&harness.results, true).await;

    assert_eq!(outcome.attempted(), 4);
    assert_eq!(outcome.saved, 3);
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.active + outcome.inactive, outcome.saved);
    assert_eq!(outcome.inactive, 1);

    // Buffer cleared unconditionally; stats folded in.
    assert_eq!(harness.results.buffered_len(), 0);
    let stats = harness.results.stats();
    assert_eq!(stats.collections_saved, 3);
    assert_eq!(stats.collections_failed, 1);

    // Upserts are idempotent on id: c1 arrived via both the catalog walk and
    // the API listing, and the later (API) record won.
    assert_eq!(store.collection_count(), 2);
    let c1 = store.get("c1").unwrap();
    assert!(c1.is_api);
    assert!(store.get("c2").is_none());
    assert!(store.get("api-1").is_some());
}

#[tokio::test]
async fn test_catalog_summaries_record_lineage() {
    let fetcher = Arc::new(MockProbeFetcher::new());
    let harness = Harness::new(tree(), fetcher);

    let root = CrawlRequest::catalog(
        Url::parse("https://ex.com/catalog.json").unwrap(),
        RequestUserData::root("Root", "example"),
    );
    harness.run(root).await;

    let catalogs = harness.results.catalogs();
    assert_eq!(catalogs.len(), 2);
    assert_eq!(catalogs[0].id, "Root");
    assert_eq!(catalogs[0].depth, 0);
    assert_eq!(catalogs[0].parent_id, None);
    assert_eq!(catalogs[1].id, "Sub");
    assert_eq!(catalogs[1].depth, 1);
    assert_eq!(catalogs[1].parent_id.as_deref(), Some("Root"));

    // Every record carries the slug and URL it was harvested from.
    for record in harness.results.buffered_collections() {
        assert_eq!(record.source_slug, "example");
        assert!(record.crawled_url.starts_with("https://ex.com/"));
    }
}
