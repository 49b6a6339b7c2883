//! Typed errors for the harvester core.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.

use thiserror::Error;

/// Errors that can occur during harvest operations.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// A catalog document failed STAC classification.
    ///
    /// This is a document-level failure: the whole request is surfaced to
    /// the external fetch engine, which owns retry policy.
    #[error("STAC validation failed: {url}")]
    StacValidationFailed { url: String },

    /// HTTP fetch failed (prober candidates, liveness checks)
    #[error("fetch error: {0}")]
    Fetch(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Enqueueing follow-up requests failed
    #[error("queue error: {0}")]
    Queue(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for harvest operations.
pub type Result<T> = std::result::Result<T, HarvestError>;
