//! External-collaborator contracts.
//!
//! The fetch/retry engine, the persistent store, and the network probes are
//! all outside this core; these traits are the whole surface it relies on,
//! and are what tests mock.

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::error::Result;
use crate::types::{CrawlRequest, NormalizedCollection};

/// The external fetch engine's frontier.
///
/// Enqueueing is the only way a handler schedules more work. Implementations
/// must be safe to call from concurrent handler tasks; URL-level dedup of
/// repeated requests is the frontier's contract.
#[async_trait]
pub trait RequestQueue: Send + Sync {
    async fn add_requests(&self, requests: Vec<CrawlRequest>) -> Result<()>;
}

/// The persistent store's single operation.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Upsert a record, idempotent on `record.id`. Returns the stored
    /// identifier.
    async fn insert_or_update_collection(&self, record: &NormalizedCollection) -> Result<String>;
}

/// Liveness check for saved records.
///
/// Infallible by contract: implementations map any transport failure or
/// non-2xx response to `false`, never to an error.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn check_reachable(&self, url: &str) -> bool;
}

/// Fetch used by the endpoint prober to test candidate URLs.
#[async_trait]
pub trait ProbeFetcher: Send + Sync {
    /// Fetch a URL and parse the body as JSON. Any failure means the
    /// candidate did not answer.
    async fn fetch_json(&self, url: &Url) -> Result<Value>;
}
