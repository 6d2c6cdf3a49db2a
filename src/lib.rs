//! Sumi-Atlas: a polite sitemap synthesizer
//!
//! This crate discovers the publicly reachable pages of a website from its
//! existing sitemaps, a breadth-first crawl and a set of essential URLs, then
//! writes a size-bounded sitemap file set, a sitemap index and an analytics
//! report.

pub mod config;
pub mod crawler;
pub mod discovery;
pub mod output;
pub mod record;
pub mod sitemap;
pub mod url;

#[cfg(test)]
pub(crate) mod testing;

use thiserror::Error;

/// Main error type for Sumi-Atlas operations
#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Sumi-Atlas operations
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use discovery::{discover, Discovery, DiscoveryDiagnostics};
pub use record::{Category, ChangeFrequency, Origin, Priority, UrlRecord};
pub use self::url::{normalize_base_url, AdmissionFilter, UrlClassifier};

/// Discovers a site's URLs and writes its sitemap set
///
/// Normalizes `site`, fetches over HTTP with the configured user agent,
/// retry and politeness settings, and writes the sitemaps, index and report
/// into `config.output.directory`.
pub async fn build_sitemaps(
    site: &str,
    config: &Config,
    config_hash: Option<&str>,
) -> Result<output::GenerationSummary> {
    config::validate(config)?;
    let base = normalize_base_url(site)?;
    let fetcher = crawler::HttpFetcher::new(config)?;
    let writer = output::DirectoryWriter::create(&config.output.directory)?;

    let discovery = discover(&base, config, &fetcher).await;
    let summary = output::generate(&discovery, config, &writer, config_hash)?;
    Ok(summary)
}
