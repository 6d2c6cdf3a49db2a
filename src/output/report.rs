//! JSON analytics report
//!
//! Summarizes one generation run: what was discovered, how it was grouped,
//! which files were written and the discovery diagnostics.

use crate::discovery::{Discovery, DiscoveryDiagnostics, SitemapGroup};
use crate::output::partition::SitemapFile;
use crate::output::traits::OutputResult;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of sample URLs listed per directory
pub const SAMPLE_URLS_PER_DIRECTORY: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub generation_info: GenerationInfo,
    pub url_statistics: UrlStatistics,
    pub directory_breakdown: BTreeMap<String, DirectoryBreakdown>,
    pub category_breakdown: BTreeMap<String, CategoryBreakdown>,
    pub sitemap_files: Vec<String>,
    pub diagnostics: DiscoveryDiagnostics,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationInfo {
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub base_url: String,
    pub total_sitemap_files: usize,
    pub sitemap_index_url: String,
    /// SHA-256 of the configuration file, when one was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UrlStatistics {
    pub total_urls: usize,
    pub directories_count: usize,
    pub categories_count: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryBreakdown {
    pub url_count: usize,
    pub sample_urls: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryBreakdown {
    pub url_count: usize,
}

impl AnalyticsReport {
    /// Builds the report for a finished generation run
    pub fn build(
        discovery: &Discovery,
        files: &[SitemapFile],
        sitemap_index_url: &str,
        config_hash: Option<&str>,
    ) -> Self {
        Self {
            generation_info: GenerationInfo {
                generated_at: chrono::Utc::now().to_rfc3339(),
                base_url: discovery.base_url.clone(),
                total_sitemap_files: files.len(),
                sitemap_index_url: sitemap_index_url.to_string(),
                config_hash: config_hash.map(str::to_string),
            },
            url_statistics: UrlStatistics {
                total_urls: discovery.records.len(),
                directories_count: discovery.directories.len(),
                categories_count: discovery.categories.len(),
            },
            directory_breakdown: directory_breakdown(&discovery.directories),
            category_breakdown: discovery
                .categories
                .iter()
                .map(|group| {
                    (
                        group.name.clone(),
                        CategoryBreakdown {
                            url_count: group.len(),
                        },
                    )
                })
                .collect(),
            sitemap_files: files.iter().map(|f| f.filename.clone()).collect(),
            diagnostics: discovery.diagnostics.clone(),
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> OutputResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Per-directory counts and samples
///
/// The root group and a literal `homepage` directory share a key here;
/// their counts are merged and samples are taken root first.
fn directory_breakdown(groups: &[SitemapGroup]) -> BTreeMap<String, DirectoryBreakdown> {
    let mut breakdown: BTreeMap<String, DirectoryBreakdown> = BTreeMap::new();

    for group in groups {
        let entry = breakdown.entry(group.name.clone()).or_default();
        entry.url_count += group.len();

        let room = SAMPLE_URLS_PER_DIRECTORY.saturating_sub(entry.sample_urls.len());
        entry
            .sample_urls
            .extend(group.records.iter().take(room).map(|r| r.location.clone()));
    }

    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::aggregate;
    use crate::output::partition::partition;
    use crate::record::Origin;
    use crate::url::UrlClassifier;

    fn discovery(urls: &[&str]) -> Discovery {
        let classifier = UrlClassifier::new("https://example.com");
        let records = urls
            .iter()
            .map(|url| classifier.classify(url, Origin::Crawler))
            .collect();
        let agg = aggregate(vec![records]);
        Discovery {
            base_url: "https://example.com".to_string(),
            records: agg.records,
            directories: agg.directories,
            categories: agg.categories,
            diagnostics: DiscoveryDiagnostics::default(),
        }
    }

    #[test]
    fn test_report_contents() {
        let discovery = discovery(&[
            "https://example.com/",
            "https://example.com/blog/a",
            "https://example.com/blog/b",
            "https://example.com/blog/c",
            "https://example.com/blog/d",
        ]);
        let files = partition(&discovery.directories, &discovery.categories, 50_000);

        let report = AnalyticsReport::build(
            &discovery,
            &files,
            "https://example.com/sitemap_index.xml",
            Some("abc123"),
        );

        assert_eq!(report.url_statistics.total_urls, 5);
        assert_eq!(report.url_statistics.directories_count, 2);
        assert_eq!(report.generation_info.total_sitemap_files, 2);
        assert_eq!(report.sitemap_files, vec!["sitemap.xml", "sitemap-blog.xml"]);

        let blog = &report.directory_breakdown["blog"];
        assert_eq!(blog.url_count, 4);
        assert_eq!(blog.sample_urls.len(), SAMPLE_URLS_PER_DIRECTORY);
        assert_eq!(blog.sample_urls[0], "https://example.com/blog/a");
    }

    #[test]
    fn test_report_json_shape() {
        let discovery = discovery(&["https://example.com/"]);
        let files = partition(&discovery.directories, &discovery.categories, 50_000);
        let report =
            AnalyticsReport::build(&discovery, &files, "https://example.com/sitemap_index.xml", None);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        assert_eq!(json["generation_info"]["base_url"], "https://example.com");
        assert!(json["generation_info"].get("config_hash").is_none());
        assert!(chrono::DateTime::parse_from_rfc3339(
            json["generation_info"]["generated_at"].as_str().unwrap()
        )
        .is_ok());
        assert_eq!(json["category_breakdown"]["homepage"]["url_count"], 1);
        assert_eq!(json["diagnostics"]["crawl_outcome"], "done");
        assert_eq!(json["sitemap_files"][0], "sitemap.xml");
    }

    #[test]
    fn test_root_and_homepage_directory_merge_in_breakdown() {
        let discovery = discovery(&[
            "https://example.com/",
            "https://example.com/homepage/a",
            "https://example.com/homepage/b",
        ]);

        let breakdown = directory_breakdown(&discovery.directories);

        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown["homepage"].url_count, 3);
        assert_eq!(breakdown["homepage"].sample_urls[0], "https://example.com/");
    }
}
