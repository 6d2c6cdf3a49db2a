//! Sitemap locator
//!
//! Finds candidate sitemap URLs from robots.txt directives, then by probing
//! well-known sitemap paths.

use crate::crawler::Fetcher;
use crate::sitemap::parser::is_absolute_http;
use crate::sitemap::robots::extract_sitemap_directives;

/// Paths probed for sitemaps on every site, in probe order
pub const WELL_KNOWN_SITEMAP_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap-index.xml",
    "/wp-sitemap.xml",
    "/sitemap.php",
    "/sitemap.txt",
    "/sitemap_news.xml",
    "/sitemap_video.xml",
    "/sitemap_image.xml",
    "/sitemap-mobile.xml",
    "/sitemap-news.xml",
    "/sitemap-posts.xml",
];

/// Candidate sitemaps, in discovery order, with per-source counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatedSitemaps {
    pub candidates: Vec<String>,
    pub from_robots: usize,
    pub from_probes: usize,
}

/// Locates existing sitemaps for one site
pub struct SitemapLocator<'a> {
    fetcher: &'a dyn Fetcher,
    base: &'a str,
    extra_paths: &'a [String],
}

impl<'a> SitemapLocator<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, base: &'a str, extra_paths: &'a [String]) -> Self {
        Self {
            fetcher,
            base,
            extra_paths,
        }
    }

    /// URL of the site's robots.txt
    pub fn robots_url(&self) -> String {
        robots_url(self.base)
    }

    /// URLs probed after robots.txt, see [`probe_urls`]
    pub fn probe_urls(&self) -> Vec<String> {
        probe_urls(self.base, self.extra_paths)
    }

    /// Finds candidate sitemap URLs
    ///
    /// Candidates are not deduplicated; a sitemap listed in robots.txt and
    /// found by probing appears twice.
    pub async fn locate(&self) -> LocatedSitemaps {
        let mut located = LocatedSitemaps::default();

        let robots_url = self.robots_url();
        match self.fetcher.fetch(&robots_url).await {
            Some(content) => {
                for sitemap_url in extract_sitemap_directives(&content) {
                    tracing::info!("Found in robots.txt: {}", sitemap_url);
                    located.candidates.push(sitemap_url);
                    located.from_robots += 1;
                }
            }
            None => tracing::debug!("No robots.txt at {}", robots_url),
        }

        for probe_url in self.probe_urls() {
            match self.fetcher.fetch(&probe_url).await {
                Some(content) if looks_like_sitemap(&content) => {
                    tracing::info!("Found sitemap: {}", probe_url);
                    located.candidates.push(probe_url);
                    located.from_probes += 1;
                }
                Some(_) => tracing::debug!("Found file but not a sitemap: {}", probe_url),
                None => tracing::trace!("No sitemap at {}", probe_url),
            }
        }

        tracing::info!(
            "Located {} candidate sitemaps ({} from robots.txt, {} probed)",
            located.candidates.len(),
            located.from_robots,
            located.from_probes
        );

        located
    }
}

/// URL of a site's robots.txt
pub fn robots_url(base: &str) -> String {
    format!("{}/robots.txt", base)
}

/// URLs probed for sitemaps: the well-known paths, then `extra_paths`
pub fn probe_urls(base: &str, extra_paths: &[String]) -> Vec<String> {
    WELL_KNOWN_SITEMAP_PATHS
        .iter()
        .copied()
        .chain(extra_paths.iter().map(String::as_str))
        .map(|path| format!("{}{}", base, path))
        .collect()
}

/// Whether probed content is plausibly a sitemap
///
/// Accepts non-empty content mentioning `<urlset`, `<sitemapindex` or
/// `sitemap` (case-insensitive), and plain-text sitemaps whose first line is
/// an absolute HTTP(S) URL.
pub fn looks_like_sitemap(content: &str) -> bool {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return false;
    }

    let lowered = trimmed.to_lowercase();
    if ["<urlset", "<sitemapindex", "sitemap"]
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        return true;
    }

    trimmed
        .lines()
        .next()
        .map(|line| is_absolute_http(line.trim()))
        .unwrap_or(false)
}
