//! Shared HTTP plumbing for the upstream APIs
//!
//! One client, one timeout, no retries: each tool operation issues at most two
//! sequential GETs and degrades to its documented error result on any failure.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure modes of a single upstream GET
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be completed (network error or timeout)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered with a non-success status
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    /// The body of a successful response could not be decoded
    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl FetchError {
    /// Whether the response arrived but could not be understood
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(self, FetchError::Decode(_))
    }
}

/// HTTP client shared by the upstream lookups
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    /// Create a client with a fixed timeout and User-Agent.
    /// Both upstreams reject requests without a User-Agent.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Issue one GET and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        accept: &str,
    ) -> std::result::Result<T, FetchError> {
        debug!("GET {url}");

        let response = self.client.get(url).header(ACCEPT, accept).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream returned {status} for {url}");
            return Err(FetchError::Status(status));
        }

        response.json::<T>().await.map_err(FetchError::Decode)
    }
}
