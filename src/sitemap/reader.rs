//! Budgeted sitemap reading
//!
//! Fetches located sitemaps and expands sitemap indexes depth-first, under a
//! fan-out cap per index, a nesting cap and a cap on total documents. A
//! sitemap URL is read at most once per run, so self-referencing or cyclic
//! indexes terminate.

use crate::config::SitemapConfig;
use crate::crawler::Fetcher;
use crate::record::{is_w3c_datetime, ChangeFrequency, Origin, Priority, UrlRecord};
use crate::sitemap::parser::{parse_sitemap, SitemapDocument, SitemapEntry};
use crate::url::UrlClassifier;
use std::collections::HashSet;

/// Limits on sitemap index expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SitemapBudget {
    /// Children expanded per index (document order)
    pub max_index_children: usize,
    /// Indexes at this nesting level or deeper are not expanded
    pub max_index_depth: usize,
    /// Total documents fetched
    pub max_sitemaps: usize,
}

impl SitemapBudget {
    pub fn from_config(config: &SitemapConfig) -> Self {
        Self {
            max_index_children: config.max_index_children,
            max_index_depth: config.max_index_depth,
            max_sitemaps: config.max_sitemaps,
        }
    }
}

/// Counters describing one reading pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapStats {
    /// Documents fetched successfully
    pub sitemaps_read: usize,
    pub fetch_failures: usize,
    pub parse_failures: usize,
    /// Entries skipped for lacking a usable location
    pub malformed_entries: usize,
    /// Child sitemaps not read because of a budget or because they were
    /// already read
    pub recursion_truncated: usize,
}

/// A sitemap URL waiting to be read and its index nesting level
struct Pending {
    url: String,
    depth: usize,
}

/// Reads sitemaps into URL records
pub struct SitemapReader<'a> {
    fetcher: &'a dyn Fetcher,
    classifier: &'a UrlClassifier,
    budget: SitemapBudget,
}

impl<'a> SitemapReader<'a> {
    pub fn new(
        fetcher: &'a dyn Fetcher,
        classifier: &'a UrlClassifier,
        budget: SitemapBudget,
    ) -> Self {
        Self {
            fetcher,
            classifier,
            budget,
        }
    }

    /// Reads every located sitemap, expanding indexes within the budget
    ///
    /// Records come out in document order, with an index's children read
    /// in place of the index. Failures are counted, never returned.
    pub async fn read_all(&self, located: &[String]) -> (Vec<UrlRecord>, SitemapStats) {
        let mut stats = SitemapStats::default();
        let mut records = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut attempted = 0usize;

        // Explicit stack instead of recursion; pushed in reverse so the
        // first child is read first.
        let mut stack: Vec<Pending> = located
            .iter()
            .rev()
            .map(|url| Pending {
                url: url.clone(),
                depth: 0,
            })
            .collect();

        while let Some(Pending { url, depth }) = stack.pop() {
            if visited.contains(&url) {
                if depth > 0 {
                    tracing::debug!("Sitemap {} already read, not expanding again", url);
                    stats.recursion_truncated += 1;
                }
                continue;
            }

            if attempted >= self.budget.max_sitemaps {
                tracing::debug!("Sitemap budget exhausted, skipping {}", url);
                stats.recursion_truncated += 1;
                continue;
            }

            visited.insert(url.clone());
            attempted += 1;
            tracing::info!("Reading sitemap: {}", url);

            let content = match self.fetcher.fetch(&url).await {
                Some(content) => content,
                None => {
                    tracing::warn!("Failed to fetch sitemap {}", url);
                    stats.fetch_failures += 1;
                    continue;
                }
            };
            stats.sitemaps_read += 1;

            let parsed = match parse_sitemap(&content) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!("Error parsing sitemap {}: {}", url, e);
                    stats.parse_failures += 1;
                    continue;
                }
            };
            stats.malformed_entries += parsed.malformed;

            match parsed.document {
                SitemapDocument::UrlSet(entries) => {
                    tracing::info!("Extracted {} URLs from {}", entries.len(), url);
                    records.extend(entries.into_iter().map(|entry| self.to_record(entry)));
                }
                SitemapDocument::Index(children) => {
                    tracing::info!(
                        "Found sitemap index {} with {} child sitemaps",
                        url,
                        children.len()
                    );

                    if depth >= self.budget.max_index_depth {
                        tracing::debug!("Index nesting limit reached at {}", url);
                        stats.recursion_truncated += children.len();
                        continue;
                    }

                    let expanded = children.len().min(self.budget.max_index_children);
                    stats.recursion_truncated += children.len() - expanded;

                    stack.extend(children.into_iter().take(expanded).rev().map(|child| {
                        Pending {
                            url: child,
                            depth: depth + 1,
                        }
                    }));
                }
            }
        }

        tracing::info!(
            "Read {} sitemaps: {} URLs, {} fetch failures, {} parse failures, {} truncated",
            stats.sitemaps_read,
            records.len(),
            stats.fetch_failures,
            stats.parse_failures,
            stats.recursion_truncated
        );

        (records, stats)
    }

    /// Classifies an entry, letting valid source metadata win
    fn to_record(&self, entry: SitemapEntry) -> UrlRecord {
        let mut record = self
            .classifier
            .classify(&entry.loc, Origin::ExistingSitemap);

        if let Some(lastmod) = entry
            .lastmod
            .map(|v| v.trim().to_string())
            .filter(|v| is_w3c_datetime(v))
        {
            record.last_modified = lastmod;
        }

        if let Some(change_frequency) = entry.changefreq.as_deref().and_then(ChangeFrequency::parse)
        {
            record.change_frequency = change_frequency;
        }

        if let Some(priority) = entry.priority.as_deref().and_then(Priority::parse) {
            record.priority = priority;
        }

        record
    }
}
