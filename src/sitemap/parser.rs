//! Sitemap format parser
//!
//! Parses the two XML document types of the sitemaps protocol (`urlset` and
//! `sitemapindex`) and the plain-text format (one URL per line). Element
//! names are matched on their local name, so namespace declarations and
//! prefixes do not matter.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;
use url::Url;

/// Errors that make a whole sitemap document unusable
#[derive(Debug, Error)]
pub enum SitemapParseError {
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document is empty")]
    Empty,

    #[error("unrecognized root element <{0}>")]
    UnrecognizedRoot(String),
}

/// One `<url>` entry of a urlset, or one line of a text sitemap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: Option<String>,
    pub priority: Option<String>,
}

/// The content of a parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// Page entries
    UrlSet(Vec<SitemapEntry>),
    /// Child sitemap URLs, in document order
    Index(Vec<String>),
}

/// A parsed document plus the number of entries that were skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSitemap {
    pub document: SitemapDocument,
    /// Entries without a usable absolute HTTP(S) location
    pub malformed: usize,
}

/// Which child element of an entry is being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Loc,
    LastMod,
    ChangeFreq,
    Priority,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "loc" => Some(Field::Loc),
            "lastmod" => Some(Field::LastMod),
            "changefreq" => Some(Field::ChangeFreq),
            "priority" => Some(Field::Priority),
            _ => None,
        }
    }
}

/// Parses sitemap content of either format
///
/// Content whose first non-whitespace character is `<` is parsed as XML,
/// anything else as a text sitemap. Individual bad entries are skipped and
/// counted; only an unusable document is an error.
///
/// # Example
///
/// ```
/// use sumi_atlas::sitemap::{parse_sitemap, SitemapDocument};
///
/// let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://example.com/news/</loc><priority>0.9</priority></url>
/// </urlset>"#;
/// let parsed = parse_sitemap(xml).unwrap();
/// match parsed.document {
///     SitemapDocument::UrlSet(entries) => assert_eq!(entries[0].loc, "https://example.com/news/"),
///     SitemapDocument::Index(_) => unreachable!(),
/// }
/// ```
pub fn parse_sitemap(content: &str) -> Result<ParsedSitemap, SitemapParseError> {
    let content = content.trim_start_matches('\u{feff}').trim();
    if content.is_empty() {
        return Err(SitemapParseError::Empty);
    }

    if content.starts_with('<') {
        parse_xml(content)
    } else {
        Ok(parse_text(content))
    }
}

/// Parses a plain-text sitemap: one absolute URL per non-blank line
fn parse_text(content: &str) -> ParsedSitemap {
    let mut entries = Vec::new();
    let mut malformed = 0;

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_absolute_http(line) {
            entries.push(SitemapEntry {
                loc: line.to_string(),
                ..SitemapEntry::default()
            });
        } else {
            tracing::debug!("Skipping text sitemap line: {}", line);
            malformed += 1;
        }
    }

    ParsedSitemap {
        document: SitemapDocument::UrlSet(entries),
        malformed,
    }
}

/// Parses an XML document, recovering entry by entry when it is ill-formed
///
/// When the document as a whole does not parse, each `<url>` (or
/// `<sitemap>`) block is parsed on its own and the blocks that fail are
/// counted as malformed. The document error is returned only when no block
/// can be recovered.
fn parse_xml(content: &str) -> Result<ParsedSitemap, SitemapParseError> {
    match parse_xml_strict(content) {
        Ok(parsed) => Ok(parsed),
        Err(SitemapParseError::Xml(err)) => match recover_blocks(content) {
            Some(parsed) => {
                tracing::debug!("Recovered sitemap entries after XML error: {}", err);
                Ok(parsed)
            }
            None => Err(SitemapParseError::Xml(err)),
        },
        Err(other) => Err(other),
    }
}

/// Parses each entry block of an ill-formed document separately
///
/// Returns `None` when the root is unknown or no block yields an entry.
fn recover_blocks(content: &str) -> Option<ParsedSitemap> {
    let lowered = content.to_ascii_lowercase();
    let (root, entry_tag) = if lowered.contains("<sitemapindex") {
        ("sitemapindex", "sitemap")
    } else if lowered.contains("<urlset") {
        ("urlset", "url")
    } else {
        return None;
    };

    let mut entries = Vec::new();
    let mut children = Vec::new();
    let mut malformed = 0;

    for block in entry_blocks(content, entry_tag) {
        let wrapped = format!("<{root}>{block}</{root}>");
        match parse_xml_strict(&wrapped) {
            Ok(parsed) => {
                malformed += parsed.malformed;
                match parsed.document {
                    SitemapDocument::UrlSet(found) => entries.extend(found),
                    SitemapDocument::Index(found) => children.extend(found),
                }
            }
            Err(err) => {
                tracing::debug!("Skipping ill-formed <{}> block: {}", entry_tag, err);
                malformed += 1;
            }
        }
    }

    if entries.is_empty() && children.is_empty() {
        return None;
    }

    let document = if root == "sitemapindex" {
        SitemapDocument::Index(children)
    } else {
        SitemapDocument::UrlSet(entries)
    };
    Some(ParsedSitemap {
        document,
        malformed,
    })
}

/// A tag found by the block scanner
struct TagSpan {
    start: usize,
    end: usize,
    local: String,
    closing: bool,
    self_closing: bool,
}

/// Scans the tags of a document without checking nesting
fn scan_tags(content: &str) -> Vec<TagSpan> {
    let mut tags = Vec::new();
    let mut from = 0;

    while let Some(offset) = content[from..].find('<') {
        let start = from + offset;
        let Some(len) = content[start..].find('>') else {
            break;
        };
        let end = start + len + 1;
        let inner = &content[start + 1..end - 1];
        let closing = inner.starts_with('/');
        let name: String = inner
            .trim_start_matches('/')
            .chars()
            .take_while(|c| !c.is_whitespace() && *c != '/')
            .collect();
        let local = name
            .rsplit(':')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        tags.push(TagSpan {
            start,
            end,
            local,
            closing,
            self_closing: inner.ends_with('/'),
        });
        from = end;
    }

    tags
}

/// Splits a document into entry blocks
///
/// A block runs from an opening entry tag to its closing tag, or up to the
/// next opening entry tag when the closing tag is missing or misspelled.
fn entry_blocks<'c>(content: &'c str, entry_tag: &str) -> Vec<&'c str> {
    let tags = scan_tags(content);
    let mut blocks = Vec::new();
    let mut open: Option<usize> = None;

    for tag in &tags {
        if tag.local != entry_tag {
            continue;
        }
        match (open, tag.closing) {
            (None, false) if tag.self_closing => blocks.push(&content[tag.start..tag.end]),
            (None, false) => open = Some(tag.start),
            (Some(start), true) => {
                blocks.push(&content[start..tag.end]);
                open = None;
            }
            (Some(start), false) => {
                blocks.push(&content[start..tag.start]);
                open = if tag.self_closing {
                    blocks.push(&content[tag.start..tag.end]);
                    None
                } else {
                    Some(tag.start)
                };
            }
            (None, true) => {}
        }
    }

    if let Some(start) = open {
        blocks.push(&content[start..]);
    }

    blocks
}

/// Parses an XML `urlset` or `sitemapindex` document, failing on any XML error
///
/// Entries are the root's direct `<url>` (or `<sitemap>`) children and
/// fields are the direct children of an entry, so extension elements such
/// as `<image:loc>` never leak into an entry's location.
fn parse_xml_strict(content: &str) -> Result<ParsedSitemap, SitemapParseError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut root: Option<String> = None;
    let mut entry: Option<SitemapEntry> = None;
    let mut field: Option<Field> = None;

    let mut entries = Vec::new();
    let mut children = Vec::new();
    let mut malformed = 0;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth += 1;
                let name = local_name(&e);
                match depth {
                    1 => root = Some(check_root(name)?),
                    2 if is_entry_tag(root.as_deref(), &name) => {
                        entry = Some(SitemapEntry::default());
                    }
                    3 if entry.is_some() => field = Field::from_name(&name),
                    _ => {}
                }
            }
            Event::Empty(e) => {
                let name = local_name(&e);
                match depth + 1 {
                    1 => root = Some(check_root(name)?),
                    // `<url/>` is an entry without a location
                    2 if is_entry_tag(root.as_deref(), &name) => malformed += 1,
                    _ => {}
                }
            }
            Event::Text(e) if depth == 3 => {
                if let (Some(current), Some(f)) = (entry.as_mut(), field) {
                    match e.unescape() {
                        Ok(text) => append_field(current, f, &text),
                        Err(_) => {
                            let raw = String::from_utf8_lossy(&e);
                            append_field(current, f, &unescape_lenient(&raw));
                        }
                    }
                }
            }
            Event::CData(e) if depth == 3 => {
                if let (Some(current), Some(f)) = (entry.as_mut(), field) {
                    let text = String::from_utf8_lossy(&e);
                    append_field(current, f, &text);
                }
            }
            Event::End(_) => {
                match depth {
                    2 => {
                        if let Some(finished) = entry.take() {
                            if !is_absolute_http(&finished.loc) {
                                tracing::debug!(
                                    "Skipping entry without usable <loc>: {:?}",
                                    finished.loc
                                );
                                malformed += 1;
                            } else if root.as_deref() == Some("sitemapindex") {
                                children.push(finished.loc);
                            } else {
                                entries.push(finished);
                            }
                        }
                    }
                    3 => field = None,
                    _ => {}
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let document = match root.as_deref() {
        Some("sitemapindex") => SitemapDocument::Index(children),
        Some(_) => SitemapDocument::UrlSet(entries),
        None => return Err(SitemapParseError::Empty),
    };

    Ok(ParsedSitemap {
        document,
        malformed,
    })
}

/// `<url>` entries belong to a urlset, `<sitemap>` entries to an index
fn is_entry_tag(root: Option<&str>, name: &str) -> bool {
    matches!(
        (root, name),
        (Some("urlset"), "url") | (Some("sitemapindex"), "sitemap")
    )
}

/// Lowercased local name of an element (namespace prefix removed)
fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase()
}

fn check_root(name: String) -> Result<String, SitemapParseError> {
    match name.as_str() {
        "urlset" | "sitemapindex" => Ok(name),
        _ => Err(SitemapParseError::UnrecognizedRoot(name)),
    }
}

fn append_field(entry: &mut SitemapEntry, field: Field, text: &str) {
    let text = text.trim();
    match field {
        Field::Loc => entry.loc.push_str(text),
        Field::LastMod => entry.lastmod.get_or_insert_with(String::new).push_str(text),
        Field::ChangeFreq => entry
            .changefreq
            .get_or_insert_with(String::new)
            .push_str(text),
        Field::Priority => entry
            .priority
            .get_or_insert_with(String::new)
            .push_str(text),
    }
}

/// Resolves well-formed entity references and keeps stray `&` literally
///
/// Sitemaps in the wild often carry unescaped query strings such as
/// `?a=1&b=2`, which strict unescaping rejects.
fn unescape_lenient(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let entity = tail.find(';').and_then(|semi| {
            quick_xml::escape::unescape(&tail[..=semi])
                .ok()
                .map(|text| (text.into_owned(), semi + 1))
        });
        match entity {
            Some((text, len)) => {
                out.push_str(&text);
                rest = &tail[len..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Whether a string is an absolute HTTP(S) URL with a host
pub fn is_absolute_http(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => matches!(url.scheme(), "http" | "https") && url.host_str().is_some(),
        Err(_) => false,
    }
}
