//! Integration tests: discovery and generation against mock HTTP servers

mod fetch_tests;
mod generate_tests;

use std::time::Duration;
use sumi_atlas::config::Config;
use sumi_atlas::crawler::{build_http_client, HttpFetcher, RetryPolicy};

/// A real HTTP fetcher with short delays so tests stay fast
pub fn fast_fetcher(config: &Config, retry: RetryPolicy) -> HttpFetcher {
    let client = build_http_client(config).expect("Failed to build HTTP client");
    HttpFetcher::with_client(client, retry, Duration::from_millis(1))
}

/// Retry policy with millisecond delays
pub fn quick_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        base_delay: Duration::from_millis(5),
        max_delay: Duration::from_millis(20),
    }
}
