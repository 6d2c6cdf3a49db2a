//! Existing sitemap discovery
//!
//! This module locates a site's sitemaps (robots.txt directives and
//! well-known paths), parses sitemap documents and reads them into URL
//! records within a recursion budget.

mod locator;
mod parser;
mod reader;
mod robots;

pub use locator::{
    looks_like_sitemap, probe_urls, robots_url, LocatedSitemaps, SitemapLocator,
    WELL_KNOWN_SITEMAP_PATHS,
};
pub use parser::{
    is_absolute_http, parse_sitemap, ParsedSitemap, SitemapDocument, SitemapEntry,
    SitemapParseError,
};
pub use reader::{SitemapBudget, SitemapReader, SitemapStats};
pub use robots::extract_sitemap_directives;
