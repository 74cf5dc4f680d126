//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client with a fixed user agent and timeout
//! - GET requests for page HTML and image bytes
//! - Error classification
//!
//! There is deliberately no retry logic here. A failed request is reported
//! once and the caller decides what it means for its branch.

use crate::config::FetcherConfig;
use crate::crawler::scheduler::{Admission, Scheduler};
use reqwest::{Client, Response};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a request failed
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    /// Connection refused, DNS failure, TLS failure or a broken transfer
    #[error("Connection error for {url}: {message}")]
    Connection { url: String, message: String },

    /// Server answered with a non-2xx status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Body could not be decoded
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// The URL the failed request was for
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Connection { url, .. }
            | Self::Status { url, .. }
            | Self::Decode { url, .. } => url,
        }
    }

    /// Returns true if repeating the request could plausibly succeed
    ///
    /// The crawler never retries; this only lets callers tell transient
    /// conditions apart from permanent ones.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Connection { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Decode { .. } => false,
        }
    }

    /// Maps a reqwest error onto the failure kinds above
    fn classify(url: &Url, error: reqwest::Error) -> Self {
        let url = url.to_string();
        if error.is_timeout() {
            Self::Timeout { url }
        } else if error.is_decode() {
            Self::Decode {
                url,
                message: error.to_string(),
            }
        } else if let Some(status) = error.status() {
            Self::Status {
                url,
                status: status.as_u16(),
            }
        } else {
            Self::Connection {
                url,
                message: error.to_string(),
            }
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// No cookie store is enabled, so nothing persists between requests.
///
/// # Example
///
/// ```no_run
/// use page_harvest::config::FetcherConfig;
/// use page_harvest::crawler::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues GET requests through a shared client, one admission slot each
///
/// Cloning is cheap: clones share the connection pool and the gate.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    scheduler: Scheduler,
}

impl Fetcher {
    /// Creates a fetcher from configuration
    pub fn new(config: &FetcherConfig, scheduler: Scheduler) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?, scheduler))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client, scheduler: Scheduler) -> Self {
        Self { client, scheduler }
    }

    /// The gate this fetcher's requests pass through
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Fetches a page and returns its body as text
    ///
    /// The body is decoded using the charset the server declares, falling
    /// back to UTF-8 with lossy replacement.
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let _admission = self.admit(url).await?;
        let response = self.send(url).await?;
        response
            .text()
            .await
            .map_err(|e| FetchError::classify(url, e))
    }

    /// Fetches a resource and returns its raw bytes
    pub async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let _admission = self.admit(url).await?;
        let response = self.send(url).await?;
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| FetchError::classify(url, e))
    }

    async fn admit(&self, url: &Url) -> Result<Admission, FetchError> {
        self.scheduler
            .admit()
            .await
            .map_err(|e| FetchError::Connection {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    /// Sends the GET and rejects non-2xx responses
    async fn send(&self, url: &Url) -> Result<Response, FetchError> {
        tracing::trace!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}
