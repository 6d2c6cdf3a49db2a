//! Aggregation: cross-source deduplication and grouping
//!
//! Streams are concatenated in arrival order (sitemaps, crawl, essentials)
//! and deduplicated by location, first occurrence wins. Unique records are
//! then grouped by directory and by category.

use crate::record::UrlRecord;
use std::collections::{HashMap, HashSet};

/// A named bucket of records: a directory or a category
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapGroup {
    pub name: String,
    /// Set only on the directory group holding the site root
    pub is_root: bool,
    pub records: Vec<UrlRecord>,
}

impl SitemapGroup {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Unique records and their groupings
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    pub records: Vec<UrlRecord>,
    /// Keyed by first path segment, `homepage` for the root
    pub directories: Vec<SitemapGroup>,
    /// Keyed by category name
    pub categories: Vec<SitemapGroup>,
}

/// Concatenates the streams in order and keeps the first record per location
pub fn deduplicate<I>(streams: I) -> Vec<UrlRecord>
where
    I: IntoIterator<Item = Vec<UrlRecord>>,
{
    let mut seen = HashSet::new();
    streams
        .into_iter()
        .flatten()
        .filter(|record| seen.insert(record.location.clone()))
        .collect()
}

/// Groups records by `(name, is_root)`, in order of each key's first appearance
///
/// Every record lands in exactly one group; record order within a group is
/// preserved. Two keys with the same name but a different root flag make
/// two groups.
pub fn group_by<F>(records: &[UrlRecord], key: F) -> Vec<SitemapGroup>
where
    F: Fn(&UrlRecord) -> (String, bool),
{
    let mut groups: Vec<SitemapGroup> = Vec::new();
    let mut index: HashMap<(String, bool), usize> = HashMap::new();

    for record in records {
        let (name, is_root) = key(record);
        match index.get(&(name.clone(), is_root)) {
            Some(&i) => groups[i].records.push(record.clone()),
            None => {
                index.insert((name.clone(), is_root), groups.len());
                groups.push(SitemapGroup {
                    name,
                    is_root,
                    records: vec![record.clone()],
                });
            }
        }
    }

    groups
}

/// Groups records by first path segment
///
/// The site root goes into its own group named `homepage`, separate from a
/// literal `/homepage/` directory.
pub fn directory_groups(records: &[UrlRecord]) -> Vec<SitemapGroup> {
    group_by(records, |r| (r.directory().to_string(), r.is_root()))
}

/// Groups records by category
pub fn category_groups(records: &[UrlRecord]) -> Vec<SitemapGroup> {
    group_by(records, |r| (r.category.as_str().to_string(), false))
}

/// Deduplicates the streams and groups the unique records
pub fn aggregate<I>(streams: I) -> Aggregate
where
    I: IntoIterator<Item = Vec<UrlRecord>>,
{
    let records = deduplicate(streams);
    let directories = directory_groups(&records);
    let categories = category_groups(&records);

    tracing::info!(
        "Aggregated {} unique URLs across {} directories and {} categories",
        records.len(),
        directories.len(),
        categories.len()
    );

    Aggregate {
        records,
        directories,
        categories,
    }
}
