//! Testing utilities including mock implementations.
//!
//! Useful for testing code built on the harvester without a real fetch
//! engine, store, or network.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::error::{HarvestError, Result};
use crate::traits::{CollectionStore, ProbeFetcher, ReachabilityProbe, RequestQueue};
use crate::types::{CrawlRequest, NormalizedCollection};

/// A request queue that records everything handed to it.
#[derive(Debug, Default)]
pub struct MockQueue {
    requests: RwLock<Vec<CrawlRequest>>,
}

impl MockQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// All requests enqueued so far.
    pub fn requests(&self) -> Vec<CrawlRequest> {
        self.requests.read().unwrap().clone()
    }

    /// Number of requests enqueued so far.
    pub fn len(&self) -> usize {
        self.requests.read().unwrap().len()
    }

    /// True when nothing has been enqueued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain the recorded requests, so a test driver can replay them the
    /// way the external fetch engine would.
    pub fn take_all(&self) -> Vec<CrawlRequest> {
        std::mem::take(&mut *self.requests.write().unwrap())
    }
}

#[async_trait]
impl RequestQueue for MockQueue {
    async fn add_requests(&self, requests: Vec<CrawlRequest>) -> Result<()> {
        self.requests.write().unwrap().extend(requests);
        Ok(())
    }
}

/// An in-memory collection store with injectable per-id failures.
///
/// Upserts are idempotent on `id`: saving two records with the same id
/// leaves one entry.
#[derive(Debug, Default)]
pub struct MemoryCollectionStore {
    collections: RwLock<HashMap<String, NormalizedCollection>>,
    fail_ids: RwLock<HashSet<String>>,
    calls: RwLock<Vec<String>>,
}

impl MemoryCollectionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make upserts for this id fail.
    pub fn with_failure(self, id: impl Into<String>) -> Self {
        self.fail_ids.write().unwrap().insert(id.into());
        self
    }

    /// Number of distinct collections stored.
    pub fn collection_count(&self) -> usize {
        self.collections.read().unwrap().len()
    }

    /// Fetch a stored record by id.
    pub fn get(&self, id: &str) -> Option<NormalizedCollection> {
        self.collections.read().unwrap().get(id).cloned()
    }

    /// Ids of every upsert attempted, in call order (including failures).
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl CollectionStore for MemoryCollectionStore {
    async fn insert_or_update_collection(&self, record: &NormalizedCollection) -> Result<String> {
        self.calls.write().unwrap().push(record.id.clone());
        if self.fail_ids.read().unwrap().contains(&record.id) {
            return Err(HarvestError::Storage(
                format!("simulated failure for {}", record.id).into(),
            ));
        }
        self.collections
            .write()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(record.id.clone())
    }
}

/// A probe fetcher serving canned JSON by exact URL.
#[derive(Debug, Default)]
pub struct MockProbeFetcher {
    responses: RwLock<HashMap<String, Value>>,
    calls: RwLock<Vec<String>>,
}

impl MockProbeFetcher {
    /// Create a fetcher with no responses (every fetch fails).
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    pub fn with_response(self, url: impl Into<String>, body: Value) -> Self {
        self.responses.write().unwrap().insert(url.into(), body);
        self
    }

    /// URLs fetched so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ProbeFetcher for MockProbeFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<Value> {
        self.calls.write().unwrap().push(url.to_string());
        self.responses
            .read()
            .unwrap()
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| HarvestError::Fetch(format!("no response for {url}").into()))
    }
}

/// A reachability probe with per-URL overrides.
#[derive(Debug)]
pub struct MockReachabilityProbe {
    unreachable: RwLock<HashSet<String>>,
    default_reachable: bool,
    calls: RwLock<Vec<String>>,
}

impl Default for MockReachabilityProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MockReachabilityProbe {
    /// Everything reachable unless overridden.
    pub fn new() -> Self {
        Self {
            unreachable: RwLock::new(HashSet::new()),
            default_reachable: true,
            calls: RwLock::new(Vec::new()),
        }
    }

    /// Set the answer for URLs without an override.
    pub fn with_default(mut self, reachable: bool) -> Self {
        self.default_reachable = reachable;
        self
    }

    /// Mark one URL unreachable.
    pub fn with_unreachable(self, url: impl Into<String>) -> Self {
        self.unreachable.write().unwrap().insert(url.into());
        self
    }

    /// URLs probed so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ReachabilityProbe for MockReachabilityProbe {
    async fn check_reachable(&self, url: &str) -> bool {
        self.calls.write().unwrap().push(url.to_string());
        if self.unreachable.read().unwrap().contains(url) {
            return false;
        }
        self.default_reachable
    }
}
