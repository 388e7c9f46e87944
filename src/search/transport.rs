//! HTTP transport abstraction for the search API
//!
//! Provides a trait-based seam around a single HTTP attempt so retry and
//! pagination logic can be tested without network access.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{Error, Result};

/// Raw outcome of one completed HTTP exchange, before any status
/// interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Failure of one attempt before a response was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The attempt exceeded its timeout budget.
    Timeout,
    /// The remote host could not be reached.
    Connect,
    /// Any other transport-level failure, not worth retrying.
    Other(String),
}

/// One HTTP attempt against the search API.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(
        &self,
        url: &Url,
        timeout: Duration,
    ) -> std::result::Result<RawResponse, FetchError>;
}

/// Production transport backed by reqwest, carrying the bearer token and the
/// API version header on every request.
pub struct GithubTransport {
    client: Client,
    token: String,
}

impl GithubTransport {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token: token.into(),
        })
    }
}

#[async_trait]
impl Transport for GithubTransport {
    async fn fetch(
        &self,
        url: &Url,
        timeout: Duration,
    ) -> std::result::Result<RawResponse, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .timeout(timeout)
            .send()
            .await
            .map_err(classify_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_reqwest_error)?;
        Ok(RawResponse { status, body })
    }
}

fn classify_reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect
    } else {
        FetchError::Other(e.to_string())
    }
}
