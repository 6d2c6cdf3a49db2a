//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests issued during discovery, including:
//! - Building HTTP clients with proper user agent strings
//! - Retry logic for transient failures
//! - The politeness delay between consecutive requests
//! - Error classification

use crate::config::Config;
use crate::crawler::retry::RetryPolicy;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// The fetch collaborator: returns the body of a URL, or `None` once every
/// attempt has failed. Implementations never return an error to the caller.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// Reasons a single request can fail
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {status}")]
    Http { status: u16 },

    #[error("network error: {message}")]
    Network { message: String, transient: bool },

    #[error("failed to read response body: {0}")]
    Body(String),
}

impl FetchError {
    /// Whether another attempt could plausibly succeed
    ///
    /// | Failure | Retry |
    /// |---------|-------|
    /// | HTTP 5xx | yes |
    /// | HTTP 408, 429 | yes |
    /// | other HTTP 4xx | no |
    /// | timeout, connection error | yes |
    /// | body read error | yes |
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Http { status } => {
                *status >= 500
                    || *status == StatusCode::REQUEST_TIMEOUT.as_u16()
                    || *status == StatusCode::TOO_MANY_REQUESTS.as_u16()
            }
            FetchError::Network { transient, .. } => *transient,
            FetchError::Body(_) => true,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return FetchError::Http {
                status: status.as_u16(),
            };
        }

        let transient = e.is_timeout() || e.is_connect();
        let message = if e.is_timeout() {
            "Request timeout".to_string()
        } else if e.is_connect() {
            "Connection refused".to_string()
        } else {
            e.to_string()
        };

        FetchError::Network { message, transient }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The configuration (user agent and fetch sections are used)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use sumi_atlas::config::Config;
/// use sumi_atlas::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.fetch.timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by `reqwest`, with retries and a politeness delay
///
/// Requests are strictly sequential: the start of every request, retries
/// included, is at least `politeness` after the start of the previous one.
pub struct HttpFetcher {
    client: Client,
    retry: RetryPolicy,
    politeness: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl HttpFetcher {
    /// Creates a fetcher from the configuration
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(config)?;
        Ok(Self::with_client(
            client,
            RetryPolicy::from_config(&config.fetch),
            Duration::from_millis(config.fetch.politeness_delay_ms),
        ))
    }

    pub fn with_client(client: Client, retry: RetryPolicy, politeness: Duration) -> Self {
        Self {
            client,
            retry,
            politeness,
            last_request: Mutex::new(None),
        }
    }

    /// Fetches a URL, retrying transient failures per the retry policy
    ///
    /// Returns the last error once attempts are exhausted, or the first
    /// non-retryable error.
    pub async fn fetch_with_retry(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 0;

        loop {
            if attempt > 0 {
                let delay = self.retry.delay_for(attempt);
                tracing::debug!(url, attempt, delay_ms = delay.as_millis() as u64, "Retrying");
                tokio::time::sleep(delay).await;
            }

            match self.fetch_once(url).await {
                Ok(body) => {
                    if attempt > 0 {
                        tracing::debug!(url, attempt, "Fetch succeeded after retry");
                    }
                    return Ok(body);
                }
                Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                    tracing::warn!(
                        url,
                        attempt,
                        max_retries = self.retry.max_retries,
                        error = %e,
                        "Fetch failed"
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Issues a single GET request after waiting for the politeness delay
    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        self.wait_turn().await;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))
    }

    /// Sleeps until the politeness delay since the previous request has passed
    async fn wait_turn(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.politeness {
                tokio::time::sleep(self.politeness - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        match self.fetch_with_retry(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!(url, error = %e, "Giving up on URL");
                None
            }
        }
    }
}
