//! reqwest-backed implementations of the network probe traits.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::HarvestConfig;
use crate::error::{HarvestError, Result};
use crate::traits::{ProbeFetcher, ReachabilityProbe};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| HarvestError::Fetch(Box::new(e)))
}

/// Fetches candidate endpoints over HTTP for the endpoint prober.
#[derive(Debug, Clone)]
pub struct HttpProbeFetcher {
    client: reqwest::Client,
}

impl HttpProbeFetcher {
    /// Create a fetcher with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a fetcher taking its timeout from the run config.
    pub fn from_config(config: &HarvestConfig) -> Result<Self> {
        Self::with_timeout(config.probe_timeout)
    }

    /// Create a fetcher with an explicit request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl ProbeFetcher for HttpProbeFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<Value> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| HarvestError::Fetch(Box::new(e)))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| HarvestError::Fetch(Box::new(e)))
    }
}

/// HTTP liveness checks for saved records.
///
/// Per the trait contract, any transport failure or non-2xx status is
/// `false`, never an error.
#[derive(Debug, Clone)]
pub struct HttpReachabilityProbe {
    client: reqwest::Client,
}

impl HttpReachabilityProbe {
    /// Create a probe with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a probe taking its timeout from the run config.
    pub fn from_config(config: &HarvestConfig) -> Result<Self> {
        Self::with_timeout(config.probe_timeout)
    }

    /// Create a probe with an explicit request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl ReachabilityProbe for HttpReachabilityProbe {
    async fn check_reachable(&self, url: &str) -> bool {
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(url = %url, error = %e, "reachability check failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clients_build_from_config_timeout() {
        let config = HarvestConfig::default().with_probe_timeout(Duration::from_secs(3));
        assert!(HttpProbeFetcher::from_config(&config).is_ok());
        assert!(HttpReachabilityProbe::from_config(&config).is_ok());
    }
}
