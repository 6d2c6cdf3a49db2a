//! Sitemap partitioning and file naming
//!
//! Turns grouped records into size-bounded sitemap files. Directory groups
//! are tried first, then category groups, then a single `all` file.

use crate::discovery::SitemapGroup;
use crate::record::UrlRecord;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Filename reserved for the root directory group
pub const ROOT_SITEMAP_FILENAME: &str = "sitemap.xml";

/// How a sitemap file was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SitemapKind {
    /// A whole group in one file
    #[serde(rename = "urlset")]
    Urlset,
    /// One chunk of a group too large for a single file
    #[serde(rename = "generated-from-split")]
    Split,
}

impl fmt::Display for SitemapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SitemapKind::Urlset => write!(f, "urlset"),
            SitemapKind::Split => write!(f, "generated-from-split"),
        }
    }
}

/// One sitemap file to be written
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapFile {
    pub filename: String,
    /// Name of the group (or chunk, e.g. `blog-part2`) it was made from
    pub name: String,
    pub records: Vec<UrlRecord>,
    pub kind: SitemapKind,
}

/// Hands out unique sitemap filenames
#[derive(Debug, Default)]
struct FileNamer {
    used: HashSet<String>,
}

impl FileNamer {
    /// Filename for a group; the root group gets [`ROOT_SITEMAP_FILENAME`]
    fn name(&mut self, group: &str, is_root: bool) -> String {
        let stem = if is_root {
            ROOT_SITEMAP_FILENAME.trim_end_matches(".xml").to_string()
        } else {
            format!("sitemap-{}", sanitize_group_name(group))
        };

        let mut candidate = format!("{}.xml", stem);
        let mut suffix = 2;
        while !self.used.insert(candidate.clone()) {
            candidate = format!("{}-{}.xml", stem, suffix);
            suffix += 1;
        }
        candidate
    }
}

/// Whether a filename could be handed out to a generated sitemap
///
/// Covers `sitemap.xml` and every `sitemap-*.xml`, compared without case so
/// that case-insensitive filesystems cannot collide either.
pub fn is_sitemap_filename(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name == ROOT_SITEMAP_FILENAME || (name.starts_with("sitemap-") && name.ends_with(".xml"))
}

/// Lowercases a group name and keeps only `[a-z0-9_-]`
///
/// A name with nothing left becomes `group`.
pub fn sanitize_group_name(name: &str) -> String {
    let cleaned: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        "group".to_string()
    } else {
        cleaned
    }
}

/// Splits groups into sitemap files of at most `max_per_file` records
///
/// Policy, stopping at the first step that yields a file:
/// 1. one file per non-empty directory group, oversized groups split into
///    `<name>-part<N>` chunks
/// 2. the same for category groups
/// 3. a single `all` file with every directory group's records
pub fn partition(
    directories: &[SitemapGroup],
    categories: &[SitemapGroup],
    max_per_file: usize,
) -> Vec<SitemapFile> {
    let max_per_file = max_per_file.max(1);
    let mut namer = FileNamer::default();

    let files = partition_groups(directories, max_per_file, &mut namer);
    if !files.is_empty() {
        return files;
    }

    tracing::info!("No directory sitemaps created, using categories");
    let files = partition_groups(categories, max_per_file, &mut namer);
    if !files.is_empty() {
        return files;
    }

    tracing::info!("Creating single combined sitemap");
    let all = SitemapGroup {
        name: "all".to_string(),
        is_root: false,
        records: directories
            .iter()
            .flat_map(|group| group.records.iter().cloned())
            .collect(),
    };
    let files = partition_groups(std::slice::from_ref(&all), max_per_file, &mut namer);
    if files.is_empty() {
        // Nothing at all was discovered; still emit a valid empty urlset
        return vec![SitemapFile {
            filename: namer.name(&all.name, false),
            name: all.name,
            records: Vec::new(),
            kind: SitemapKind::Urlset,
        }];
    }
    files
}

fn partition_groups(
    groups: &[SitemapGroup],
    max_per_file: usize,
    namer: &mut FileNamer,
) -> Vec<SitemapFile> {
    let mut files = Vec::new();

    for group in groups.iter().filter(|g| !g.is_empty()) {
        if group.len() <= max_per_file {
            files.push(SitemapFile {
                filename: namer.name(&group.name, group.is_root),
                name: group.name.clone(),
                records: group.records.clone(),
                kind: SitemapKind::Urlset,
            });
            continue;
        }

        let chunks = group.records.chunks(max_per_file);
        tracing::info!("Splitting {} into {} sitemaps", group.name, chunks.len());

        for (i, chunk) in chunks.enumerate() {
            let name = format!("{}-part{}", group.name, i + 1);
            files.push(SitemapFile {
                filename: namer.name(&name, false),
                name,
                records: chunk.to_vec(),
                kind: SitemapKind::Split,
            });
        }
    }

    files
}
