use crate::discovery::DEFAULT_ESSENTIAL_PATHS;
use serde::Deserialize;

/// Main configuration structure for Sumi-Atlas
///
/// Every section is optional in the TOML file; missing sections and fields
/// fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub fetch: FetchConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub sitemap: SitemapConfig,
    pub discovery: DiscoveryConfig,
    pub output: OutputConfig,
}

/// Crawler budget configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages fetched by the crawler
    #[serde(rename = "max-crawl-pages")]
    pub max_crawl_pages: usize,

    /// Maximum number of URLs waiting in the frontier
    #[serde(rename = "max-frontier-size")]
    pub max_frontier_size: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_crawl_pages: 1000,
            max_frontier_size: 500,
        }
    }
}

/// HTTP fetch, retry and politeness configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Retries after the first failed attempt
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Delay before the first retry (milliseconds); doubles per attempt
    #[serde(rename = "retry-base-delay-ms")]
    pub retry_base_delay_ms: u64,

    /// Upper bound for the retry delay (milliseconds)
    #[serde(rename = "retry-max-delay-ms")]
    pub retry_max_delay_ms: u64,

    /// Minimum time between consecutive requests (milliseconds)
    #[serde(rename = "politeness-delay-ms")]
    pub politeness_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            max_retries: 2,
            retry_base_delay_ms: 1000,
            retry_max_delay_ms: 8000,
            politeness_delay_ms: 500,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "SumiAtlas".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the user agent header: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(contact) => format!(
                "{}/{} (+{})",
                self.crawler_name, self.crawler_version, contact
            ),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Sitemap reading and writing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Maximum URLs per emitted sitemap file
    #[serde(rename = "max-urls-per-file")]
    pub max_urls_per_file: usize,

    /// Child sitemaps expanded per sitemap index
    #[serde(rename = "max-index-children")]
    pub max_index_children: usize,

    /// How many sitemap indexes may be nested below a located sitemap
    #[serde(rename = "max-index-depth")]
    pub max_index_depth: usize,

    /// Total sitemap documents read in one run
    #[serde(rename = "max-sitemaps")]
    pub max_sitemaps: usize,

    /// Additional well-known paths to probe for sitemaps
    #[serde(rename = "extra-paths")]
    pub extra_paths: Vec<String>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            max_urls_per_file: 50_000,
            max_index_children: 3,
            max_index_depth: 2,
            max_sitemaps: 50,
            extra_paths: Vec::new(),
        }
    }
}

/// Essential URL configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Only include essential URLs that are reachable
    #[serde(rename = "verify-essentials")]
    pub verify_essentials: bool,

    /// Paths every site is expected to have
    #[serde(rename = "essential-paths")]
    pub essential_paths: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            verify_essentials: true,
            essential_paths: DEFAULT_ESSENTIAL_PATHS
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the sitemap files, index and report
    pub directory: String,

    /// Filename of the sitemap index
    #[serde(rename = "index-filename")]
    pub index_filename: String,

    /// Filename of the JSON analytics report
    #[serde(rename = "report-filename")]
    pub report_filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "sitemaps".to_string(),
            index_filename: "sitemap_index.xml".to_string(),
            report_filename: "sitemap-analysis-report.json".to_string(),
        }
    }
}
