//! Crawler coordinator - the breadth-first crawl loop
//!
//! The loop pulls URLs from the [`CrawlState`] frontier, fetches them through
//! the [`Fetcher`], classifies each fetched page and queues the admissible
//! links it finds. It stops when the frontier is empty or the page budget is
//! spent; both are successful outcomes.

use crate::config::CrawlerConfig;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::frontier::CrawlState;
use crate::crawler::parser::extract_links;
use crate::record::{Origin, UrlRecord};
use crate::url::{site_root, AdmissionFilter, UrlClassifier};
use serde::Serialize;
use std::fmt;
use url::Url;

/// How a crawl ended
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlOutcome {
    /// The frontier ran empty
    #[default]
    Done,
    /// The page budget was reached with URLs still queued
    Capped,
}

impl fmt::Display for CrawlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrawlOutcome::Done => write!(f, "done"),
            CrawlOutcome::Capped => write!(f, "capped"),
        }
    }
}

/// Everything a crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// One record per successfully fetched page, in crawl order
    pub records: Vec<UrlRecord>,
    /// Fetch attempts made
    pub pages_crawled: usize,
    /// Attempts whose fetch returned nothing
    pub fetch_failures: usize,
    pub outcome: CrawlOutcome,
}

/// Main crawler structure
pub struct Crawler<'a> {
    fetcher: &'a dyn Fetcher,
    filter: &'a AdmissionFilter,
    classifier: &'a UrlClassifier,
    max_pages: usize,
    max_frontier: usize,
}

impl<'a> Crawler<'a> {
    /// Creates a crawler
    ///
    /// # Arguments
    ///
    /// * `fetcher` - The fetch collaborator
    /// * `filter` - Admission filter scoped to the site
    /// * `classifier` - Classifier scoped to the same base URL
    /// * `limits` - Page and frontier budgets
    pub fn new(
        fetcher: &'a dyn Fetcher,
        filter: &'a AdmissionFilter,
        classifier: &'a UrlClassifier,
        limits: &CrawlerConfig,
    ) -> Self {
        Self {
            fetcher,
            filter,
            classifier,
            max_pages: limits.max_crawl_pages,
            max_frontier: limits.max_frontier_size,
        }
    }

    /// Runs a breadth-first crawl seeded with the site root
    pub async fn run(&self) -> CrawlReport {
        let seed = site_root(self.filter.base());
        tracing::info!("Crawling from {} (max {} pages)", seed, self.max_pages);

        let mut state = CrawlState::new(seed, self.max_frontier);
        let mut records = Vec::new();
        let mut fetch_failures = 0;
        let start_time = std::time::Instant::now();

        while state.page_count() < self.max_pages {
            let url = match state.next_url() {
                Some(url) => url,
                None => break,
            };

            tracing::debug!("Crawling: {}", url);

            match self.fetcher.fetch(&url).await {
                Some(body) => {
                    records.push(self.classifier.classify(&url, Origin::Crawler));
                    self.queue_links(&mut state, &url, &body);
                }
                None => {
                    tracing::debug!("Dropping unreachable page {}", url);
                    fetch_failures += 1;
                }
            }

            if state.page_count() % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {} URLs found, {:.1}s elapsed",
                    state.page_count(),
                    state.frontier_len(),
                    records.len(),
                    start_time.elapsed().as_secs_f64()
                );
            }
        }

        let outcome = if state.has_pending() {
            CrawlOutcome::Capped
        } else {
            CrawlOutcome::Done
        };

        tracing::info!(
            "Crawl {}: {} pages crawled, {} URLs found, {} failures",
            outcome,
            state.page_count(),
            records.len(),
            fetch_failures
        );

        CrawlReport {
            records,
            pages_crawled: state.page_count(),
            fetch_failures,
            outcome,
        }
    }

    /// Queues the admissible links of a fetched page
    fn queue_links(&self, state: &mut CrawlState, page: &str, body: &str) {
        let page_url = match Url::parse(page) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Cannot resolve links on {}: {}", page, e);
                return;
            }
        };

        for link in extract_links(body, &page_url) {
            if !self.filter.is_admissible(&link) {
                tracing::trace!("Not admitted: {}", link);
                continue;
            }
            state.enqueue(link);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Category;
    use crate::testing::MapFetcher;
    use std::collections::HashSet;

    const BASE: &str = "https://example.com";

    fn limits(max_crawl_pages: usize, max_frontier_size: usize) -> CrawlerConfig {
        CrawlerConfig {
            max_crawl_pages,
            max_frontier_size,
        }
    }

    async fn crawl(fetcher: &MapFetcher, limits: CrawlerConfig) -> CrawlReport {
        let filter = AdmissionFilter::new(BASE);
        let classifier = UrlClassifier::new(BASE);
        Crawler::new(fetcher, &filter, &classifier, &limits).run().await
    }

    #[tokio::test]
    async fn test_breadth_first_order() {
        let fetcher = MapFetcher::new()
            .with(
                "https://example.com/",
                r#"<a href="/news/">News</a><a href="/about">About</a>"#,
            )
            .with("https://example.com/news/", r#"<a href="/news/story-1">One</a>"#)
            .with("https://example.com/about", "<p>About us</p>")
            .with("https://example.com/news/story-1", "<p>Story</p>");

        let report = crawl(&fetcher, limits(100, 100)).await;

        assert_eq!(
            fetcher.requests(),
            vec![
                "https://example.com/",
                "https://example.com/news/",
                "https://example.com/about",
                "https://example.com/news/story-1",
            ]
        );
        assert_eq!(report.records.len(), 4);
        assert_eq!(report.outcome, CrawlOutcome::Done);
        assert_eq!(report.records[0].category, Category::Homepage);
        assert!(report
            .records
            .iter()
            .all(|record| record.origin == Origin::Crawler));
    }

    #[tokio::test]
    async fn test_cycle_never_revisits() {
        let fetcher = MapFetcher::new()
            .with(
                "https://example.com/",
                r#"<a href="/a">A</a><a href="https://example.com">Home</a>"#,
            )
            .with("https://example.com/a", r#"<a href="/">Home</a><a href="/a">Self</a>"#);

        let report = crawl(&fetcher, limits(100, 100)).await;

        let requests = fetcher.requests();
        let unique: HashSet<_> = requests.iter().collect();
        assert_eq!(requests.len(), unique.len());
        assert_eq!(requests.len(), 2);
        assert_eq!(report.outcome, CrawlOutcome::Done);
    }

    #[tokio::test]
    async fn test_page_cap() {
        let fetcher = MapFetcher::new()
            .with(
                "https://example.com/",
                r#"<a href="/a">A</a><a href="/b">B</a><a href="/c">C</a>"#,
            )
            .with("https://example.com/a", r#"<a href="/">Home</a>"#)
            .with("https://example.com/b", r#"<a href="/">Home</a>"#)
            .with("https://example.com/c", r#"<a href="/">Home</a>"#);

        let report = crawl(&fetcher, limits(2, 100)).await;

        assert_eq!(fetcher.requests().len(), 2);
        assert_eq!(report.pages_crawled, 2);
        assert_eq!(report.outcome, CrawlOutcome::Capped);
    }

    #[tokio::test]
    async fn test_failed_fetch_counts_and_is_not_retried() {
        let fetcher = MapFetcher::new().with(
            "https://example.com/",
            r#"<a href="/missing">Gone</a><a href="/missing">Again</a>"#,
        );

        let report = crawl(&fetcher, limits(100, 100)).await;

        assert_eq!(report.pages_crawled, 2);
        assert_eq!(report.fetch_failures, 1);
        assert_eq!(report.records.len(), 1);
        assert_eq!(fetcher.request_count("https://example.com/missing"), 1);
    }

    #[tokio::test]
    async fn test_inadmissible_links_not_followed() {
        let fetcher = MapFetcher::new().with(
            "https://example.com/",
            r#"
                <a href="/wp-admin/edit">Admin</a>
                <a href="/img/photo.JPG">Photo</a>
                <a href="https://other.org/page">Elsewhere</a>
                <a href="mailto:hi@example.com">Mail</a>
            "#,
        );

        let report = crawl(&fetcher, limits(100, 100)).await;

        assert_eq!(fetcher.requests(), vec!["https://example.com/"]);
        assert_eq!(report.records.len(), 1);
    }

    #[tokio::test]
    async fn test_frontier_cap_bounds_queue() {
        let links: String = (0..20)
            .map(|i| format!(r#"<a href="/p{}">P</a>"#, i))
            .collect();
        let fetcher = MapFetcher::new().with("https://example.com/", &links);

        let report = crawl(&fetcher, limits(100, 5)).await;

        // Seed plus the five links that fit in the frontier
        assert_eq!(report.pages_crawled, 6);
        assert_eq!(report.outcome, CrawlOutcome::Done);
    }

    #[tokio::test]
    async fn test_unreachable_site_yields_no_records() {
        let fetcher = MapFetcher::new();
        let report = crawl(&fetcher, limits(100, 100)).await;
        assert!(report.records.is_empty());
        assert_eq!(report.pages_crawled, 1);
        assert_eq!(report.fetch_failures, 1);
        assert_eq!(report.outcome, CrawlOutcome::Done);
    }
}
