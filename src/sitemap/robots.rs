//! robots.txt `Sitemap:` directive extraction
//!
//! Only sitemap directives are read; allow/disallow rules are ignored.

/// Extracts every `Sitemap:` directive value from robots.txt content
///
/// The key is matched case-insensitively at the start of a line; the value
/// is the trimmed text after the first colon. Lines with an empty value are
/// skipped. Values are returned in file order, duplicates included.
///
/// # Example
///
/// ```
/// use sumi_atlas::sitemap::extract_sitemap_directives;
///
/// let robots = "User-agent: *\nDisallow: /private\nSITEMAP: https://example.com/sitemap.xml\n";
/// assert_eq!(
///     extract_sitemap_directives(robots),
///     vec!["https://example.com/sitemap.xml"]
/// );
/// ```
pub fn extract_sitemap_directives(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let (key, value) = line.split_once(':')?;
            if !key.eq_ignore_ascii_case("sitemap") {
                return None;
            }
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        })
        .collect()
}
