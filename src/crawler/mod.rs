//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The fetch collaborator with retries and a politeness delay
//! - HTML parsing and link extraction
//! - Crawl state (frontier, visited set, page budget)
//! - The breadth-first crawl loop

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod retry;

pub use coordinator::{CrawlOutcome, CrawlReport, Crawler};
pub use fetcher::{build_http_client, FetchError, Fetcher, HttpFetcher};
pub use frontier::CrawlState;
pub use parser::extract_links;
pub use retry::RetryPolicy;
