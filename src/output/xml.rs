//! Sitemap XML rendering
//!
//! Produces sitemaps protocol 0.9 documents: a `<urlset>` per sitemap file
//! and a `<sitemapindex>` listing the files.

use crate::record::UrlRecord;

/// Namespace of the sitemaps protocol
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// One `<sitemap>` entry of a sitemap index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapIndexEntry {
    /// Absolute URL of the sitemap file
    pub sitemap_url: String,
    pub last_modified: String,
}

/// Escapes `&`, `<`, `>`, `"` and `'` for XML text and attribute values
///
/// ```
/// use sumi_atlas::output::escape_xml;
///
/// assert_eq!(escape_xml("a&b<c>"), "a&amp;b&lt;c&gt;");
/// ```
pub fn escape_xml(text: &str) -> String {
    quick_xml::escape::escape(text).into_owned()
}

/// Renders a `<urlset>` document with one `<url>` per record
///
/// Children are written in protocol order: `loc`, `lastmod`, `changefreq`,
/// `priority`.
pub fn render_urlset(records: &[UrlRecord]) -> String {
    let mut xml = String::with_capacity(128 + records.len() * 160);
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NAMESPACE));

    for record in records {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&record.location)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            escape_xml(&record.last_modified)
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            record.change_frequency
        ));
        xml.push_str(&format!("    <priority>{}</priority>\n", record.priority));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Renders a `<sitemapindex>` document
pub fn render_index(entries: &[SitemapIndexEntry]) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push('\n');
    xml.push_str(&format!("<sitemapindex xmlns=\"{}\">\n", SITEMAP_NAMESPACE));

    for entry in entries {
        xml.push_str("  <sitemap>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.sitemap_url)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            escape_xml(&entry.last_modified)
        ));
        xml.push_str("  </sitemap>\n");
    }

    xml.push_str("</sitemapindex>\n");
    xml
}
