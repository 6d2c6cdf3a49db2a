//! URL records and their derived metadata
//!
//! A [`UrlRecord`] is one discovered URL together with everything the sitemap
//! writer needs to emit it: the classifier's category, the change frequency,
//! the priority and the last modification date.

mod attributes;

pub use attributes::{Category, ChangeFrequency, Priority};

use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

/// Group name used for URLs with no path segments
pub const ROOT_GROUP: &str = "homepage";

/// Where a record was discovered
///
/// Provenance is kept for diagnostics only; deduplication never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Read from a sitemap the site already publishes
    ExistingSitemap,
    /// Found by crawling the live site
    Crawler,
    /// Produced by the essential URL generator
    Generated,
    /// The location could not be parsed and carries fallback metadata
    ErrorFallback,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExistingSitemap => "existing_sitemap",
            Self::Crawler => "crawler",
            Self::Generated => "generated",
            Self::ErrorFallback => "error_fallback",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered URL with derived metadata
#[derive(Debug, Clone, PartialEq)]
pub struct UrlRecord {
    /// Absolute URL; the canonical identity key
    pub location: String,

    /// URL path component (`/` for the root)
    pub path: String,

    /// Non-empty path components, in order
    pub path_segments: Vec<String>,

    /// Last modification date (`YYYY-MM-DD` or a W3C datetime from a sitemap)
    pub last_modified: String,

    pub change_frequency: ChangeFrequency,

    pub priority: Priority,

    pub category: Category,

    pub origin: Origin,
}

impl UrlRecord {
    /// Number of path segments
    pub fn depth(&self) -> usize {
        self.path_segments.len()
    }

    /// Name of the directory group this record belongs to
    ///
    /// This is the first path segment, or [`ROOT_GROUP`] for the site root.
    pub fn directory(&self) -> &str {
        self.path_segments
            .first()
            .map(String::as_str)
            .unwrap_or(ROOT_GROUP)
    }

    /// True for the site root itself
    pub fn is_root(&self) -> bool {
        self.path_segments.is_empty()
    }

    /// Replaces the provenance, keeping `ErrorFallback` if classification failed
    pub fn with_origin(mut self, origin: Origin) -> Self {
        if self.origin != Origin::ErrorFallback {
            self.origin = origin;
        }
        self
    }
}

/// Today's date in sitemap `lastmod` format
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Checks whether a `lastmod` value is a W3C date or datetime
///
/// Accepts `YYYY-MM-DD`, full RFC 3339 timestamps, and minute-precision
/// timestamps with an offset (`2024-01-31T10:30+00:00`).
pub fn is_w3c_datetime(value: &str) -> bool {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
        || DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%:z").is_ok()
}
