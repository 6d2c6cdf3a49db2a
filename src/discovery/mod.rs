//! URL discovery pipeline
//!
//! Runs the three discovery sources in order (existing sitemaps, the crawl,
//! generated essentials), aggregates their records and reports what
//! happened along the way. Nothing in here fails: unreachable pages,
//! broken sitemaps and exhausted budgets only show up in the diagnostics.

mod aggregate;
mod essentials;

pub use aggregate::{
    aggregate, category_groups, deduplicate, directory_groups, group_by, Aggregate, SitemapGroup,
};
pub use essentials::{generate_essentials, verify_essentials, DEFAULT_ESSENTIAL_PATHS};

use crate::config::Config;
use crate::crawler::{CrawlOutcome, Crawler, Fetcher};
use crate::record::{Origin, UrlRecord};
use crate::sitemap::{SitemapBudget, SitemapLocator, SitemapReader};
use crate::url::{AdmissionFilter, UrlClassifier};
use serde::Serialize;
use std::collections::HashSet;

/// Counters from one discovery run, serialized into the analytics report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryDiagnostics {
    /// Candidate sitemaps listed in robots.txt
    pub robots_sitemaps: usize,
    /// Candidate sitemaps found by probing well-known paths
    pub probed_sitemaps: usize,
    pub sitemaps_read: usize,
    pub sitemap_fetch_failures: usize,
    pub sitemap_parse_failures: usize,
    pub malformed_entries: usize,
    /// Child sitemaps left unread by a budget or because they were already read
    pub recursion_truncated: usize,
    pub pages_crawled: usize,
    pub crawl_fetch_failures: usize,
    pub crawl_outcome: CrawlOutcome,
    /// Generated essential records in the final collection
    pub essentials_included: usize,
    /// True when no source found anything and the unverified essentials
    /// were used alone
    pub used_essential_fallback: bool,
}

/// The outcome of discovery: unique records, their groups and diagnostics
#[derive(Debug, Clone)]
pub struct Discovery {
    pub base_url: String,
    pub records: Vec<UrlRecord>,
    pub directories: Vec<SitemapGroup>,
    pub categories: Vec<SitemapGroup>,
    pub diagnostics: DiscoveryDiagnostics,
}

/// Discovers the URLs of a site
///
/// # Arguments
///
/// * `base` - Normalized base URL (no trailing slash), see
///   [`normalize_base_url`](crate::url::normalize_base_url)
/// * `config` - Budgets and discovery settings
/// * `fetcher` - The fetch collaborator used for every request
///
/// # Pipeline
///
/// 1. Locate sitemaps (robots.txt, then well-known paths) and read them
/// 2. Crawl the site breadth-first from its root
/// 3. Generate essential URLs, verified against the first two sources or
///    by fetching them
/// 4. Aggregate: deduplicate (first seen wins) and group
///
/// When the aggregate is empty the unverified essentials are used instead,
/// so the result is never empty.
pub async fn discover(base: &str, config: &Config, fetcher: &dyn Fetcher) -> Discovery {
    let classifier = UrlClassifier::new(base);
    let filter = AdmissionFilter::new(base);
    let mut diagnostics = DiscoveryDiagnostics::default();

    tracing::info!("Starting URL discovery for {}", base);

    // Source 1: existing sitemaps
    let located = SitemapLocator::new(fetcher, base, &config.sitemap.extra_paths)
        .locate()
        .await;
    diagnostics.robots_sitemaps = located.from_robots;
    diagnostics.probed_sitemaps = located.from_probes;

    let reader = SitemapReader::new(
        fetcher,
        &classifier,
        SitemapBudget::from_config(&config.sitemap),
    );
    let (sitemap_records, sitemap_stats) = reader.read_all(&located.candidates).await;
    diagnostics.sitemaps_read = sitemap_stats.sitemaps_read;
    diagnostics.sitemap_fetch_failures = sitemap_stats.fetch_failures;
    diagnostics.sitemap_parse_failures = sitemap_stats.parse_failures;
    diagnostics.malformed_entries = sitemap_stats.malformed_entries;
    diagnostics.recursion_truncated = sitemap_stats.recursion_truncated;

    // Source 2: the crawl
    let crawl = Crawler::new(fetcher, &filter, &classifier, &config.crawler)
        .run()
        .await;
    diagnostics.pages_crawled = crawl.pages_crawled;
    diagnostics.crawl_fetch_failures = crawl.fetch_failures;
    diagnostics.crawl_outcome = crawl.outcome;

    // Source 3: essentials
    let essentials = generate_essentials(&classifier, &config.discovery.essential_paths);
    let included_essentials = if config.discovery.verify_essentials {
        let known: HashSet<&str> = sitemap_records
            .iter()
            .chain(crawl.records.iter())
            .map(|r| r.location.as_str())
            .collect();
        verify_essentials(fetcher, &essentials, &known).await
    } else {
        essentials.clone()
    };

    let mut aggregated = aggregate(vec![sitemap_records, crawl.records, included_essentials]);

    if aggregated.records.is_empty() {
        tracing::warn!(
            "No URLs discovered for {}, falling back to {} essential URLs",
            base,
            essentials.len()
        );
        aggregated = aggregate(vec![essentials]);
        diagnostics.used_essential_fallback = true;
    }

    diagnostics.essentials_included = aggregated
        .records
        .iter()
        .filter(|r| r.origin == Origin::Generated)
        .count();

    tracing::info!(
        "URL discovery completed: {} unique URLs across {} directories",
        aggregated.records.len(),
        aggregated.directories.len()
    );

    Discovery {
        base_url: base.to_string(),
        records: aggregated.records,
        directories: aggregated.directories,
        categories: aggregated.categories,
        diagnostics,
    }
}
