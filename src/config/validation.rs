use crate::config::types::{
    Config, CrawlerConfig, DiscoveryConfig, FetchConfig, OutputConfig, SitemapConfig,
    UserAgentConfig,
};
use crate::output::is_sitemap_filename;
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Sitemaps protocol limit for URLs in one file
const PROTOCOL_MAX_URLS: usize = 50_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_fetch_config(&config.fetch)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_sitemap_config(&config.sitemap)?;
    validate_discovery_config(&config.discovery)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    if config.max_crawl_pages < 1 {
        return Err(ConfigError::Validation(
            "max_crawl_pages must be >= 1, got 0".to_string(),
        ));
    }

    if config.max_frontier_size < 1 {
        return Err(ConfigError::Validation(
            "max_frontier_size must be >= 1, got 0".to_string(),
        ));
    }

    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> ConfigResult<()> {
    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    if config.retry_base_delay_ms > config.retry_max_delay_ms {
        return Err(ConfigError::Validation(format!(
            "retry_base_delay_ms ({}) must not exceed retry_max_delay_ms ({})",
            config.retry_base_delay_ms, config.retry_max_delay_ms
        )));
    }

    if config.politeness_delay_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "politeness_delay_ms must be >= 100ms, got {}ms",
            config.politeness_delay_ms
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> ConfigResult<()> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates sitemap configuration
fn validate_sitemap_config(config: &SitemapConfig) -> ConfigResult<()> {
    if config.max_urls_per_file < 1 || config.max_urls_per_file > PROTOCOL_MAX_URLS {
        return Err(ConfigError::Validation(format!(
            "max_urls_per_file must be between 1 and {}, got {}",
            PROTOCOL_MAX_URLS, config.max_urls_per_file
        )));
    }

    if config.max_index_children < 1 {
        return Err(ConfigError::Validation(
            "max_index_children must be >= 1, got 0".to_string(),
        ));
    }

    if config.max_sitemaps < 1 {
        return Err(ConfigError::Validation(
            "max_sitemaps must be >= 1, got 0".to_string(),
        ));
    }

    validate_paths("sitemap.extra-paths", &config.extra_paths)
}

/// Validates essential URL configuration
fn validate_discovery_config(config: &DiscoveryConfig) -> ConfigResult<()> {
    validate_paths("discovery.essential-paths", &config.essential_paths)
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "directory cannot be empty".to_string(),
        ));
    }

    validate_filename("index_filename", &config.index_filename)?;
    validate_filename("report_filename", &config.report_filename)?;

    for (field, name) in [
        ("index_filename", &config.index_filename),
        ("report_filename", &config.report_filename),
    ] {
        if is_sitemap_filename(name) {
            return Err(ConfigError::Validation(format!(
                "{} '{}' is reserved for generated sitemap files",
                field, name
            )));
        }
    }

    if config.index_filename == config.report_filename {
        return Err(ConfigError::Validation(format!(
            "index_filename and report_filename must differ, both are '{}'",
            config.index_filename
        )));
    }

    Ok(())
}

/// Paths must be absolute (start with '/')
fn validate_paths(field: &str, paths: &[String]) -> ConfigResult<()> {
    for path in paths {
        if !path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "{} entries must start with '/', got '{}'",
                field, path
            )));
        }
    }
    Ok(())
}

/// Filenames must be plain names inside the output directory
fn validate_filename(field: &str, name: &str) -> ConfigResult<()> {
    if name.is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
    }

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(ConfigError::Validation(format!(
            "{} must be a plain filename, got '{}'",
            field, name
        )));
    }

    Ok(())
}
