/// File extensions that never belong in a sitemap (matched against the
/// lowercased URL suffix)
const EXCLUDED_EXTENSIONS: &[&str] = &[
    // images
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".ico",
    // documents and archives
    ".pdf", ".doc", ".docx", ".zip", ".rar",
    // media
    ".mp4", ".mp3", ".avi", ".mov",
    // stylesheets, scripts and fonts
    ".css", ".js", ".woff", ".ttf",
];

/// Substrings marking non-content URLs (matched against the lowercased URL)
const EXCLUDED_PATTERNS: &[&str] = &[
    "/cdn-cgi/",
    "/wp-admin/",
    "/wp-json/",
    "/api/",
    "/ajax/",
    "/logout",
    "/login",
    "/signin",
    "/signup",
    "/register",
    "/admin",
    "/dashboard",
    "/backend",
    "/cart",
    "/checkout",
    "/account",
    "?replytocom=",
    "?share=",
    "?feed=",
    "?s=",
    "#",
    "tel:",
    "mailto:",
    "javascript:",
];

/// Decides whether a candidate link is in scope for crawling and inclusion
///
/// A candidate is admitted when it:
/// 1. starts with the base URL,
/// 2. does not end with an excluded file extension (case-insensitive),
/// 3. contains none of the excluded non-content patterns (case-insensitive).
///
/// The filter is a pure predicate; it never fails.
///
/// # Examples
///
/// ```
/// use sumi_atlas::url::AdmissionFilter;
///
/// let filter = AdmissionFilter::new("https://example.com");
/// assert!(filter.is_admissible("https://example.com/news/story-1"));
/// assert!(!filter.is_admissible("https://example.com/img/photo.JPG"));
/// assert!(!filter.is_admissible("https://example.com/wp-admin/edit"));
/// ```
#[derive(Debug, Clone)]
pub struct AdmissionFilter {
    base: String,
}

impl AdmissionFilter {
    /// Creates a filter scoped to a normalized base URL
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn is_admissible(&self, candidate: &str) -> bool {
        // The base must end at a path, query or fragment boundary
        match candidate.strip_prefix(self.base.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with(['/', '?', '#']) => {}
            _ => return false,
        }

        let lowered = candidate.to_lowercase();

        if EXCLUDED_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext)) {
            return false;
        }

        !EXCLUDED_PATTERNS
            .iter()
            .any(|pattern| lowered.contains(pattern))
    }
}
