//! Core data types for the harvester.

pub mod collection;
pub mod request;

pub use collection::{CatalogSummary, CrawlStats, FlushOutcome, NormalizedCollection};
pub use request::{CrawlRequest, RequestLabel, RequestUserData};
