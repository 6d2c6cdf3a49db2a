use crate::{UrlError, UrlResult};
use url::Url;

/// Normalizes the operator-supplied site address into a base URL
///
/// # Normalization Steps
///
/// 1. Trim whitespace; prefix `https://` when no HTTP(S) scheme is given
/// 2. Parse the URL; reject if malformed
/// 3. Reject anything other than HTTP and HTTPS
/// 4. Require a host (lowercased by the parser)
/// 5. Drop query and fragment
/// 6. Remove trailing slashes
///
/// The result never ends with `/`, so the site root is `base + "/"`.
///
/// # Examples
///
/// ```
/// use sumi_atlas::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("Example.COM/").unwrap(), "https://example.com");
/// assert_eq!(normalize_base_url("http://example.com/docs/").unwrap(), "http://example.com/docs");
/// ```
pub fn normalize_base_url(input: &str) -> UrlResult<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Parse("base URL is empty".to_string()));
    }

    let lowered = trimmed.to_ascii_lowercase();
    let with_scheme = if lowered.starts_with("http://") || lowered.starts_with("https://") {
        trimmed.to_string()
    } else if lowered.contains("://") {
        let scheme = trimmed.split("://").next().unwrap_or_default();
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            scheme
        )));
    } else {
        format!("https://{}", trimmed)
    };

    let mut url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    url.set_query(None);
    url.set_fragment(None);

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Returns the crawl seed for a normalized base URL (the site root)
pub fn site_root(base: &str) -> String {
    format!("{}/", base)
}
