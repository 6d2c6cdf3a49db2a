//! Sitemap synthesis and reporting
//!
//! This module handles:
//! - Partitioning discovered groups into size-bounded sitemap files
//! - Rendering urlset and index XML
//! - Writing the files, the index and the JSON analytics report
//! - Printing the executive summary

mod partition;
mod report;
pub mod stats;
mod traits;
mod writer;
mod xml;

pub use partition::{
    is_sitemap_filename, partition, sanitize_group_name, SitemapFile, SitemapKind,
    ROOT_SITEMAP_FILENAME,
};
pub use report::{AnalyticsReport, CategoryBreakdown, DirectoryBreakdown, GenerationInfo, UrlStatistics};
pub use stats::print_summary;
pub use traits::{ArtifactWriter, OutputError, OutputResult};
pub use writer::DirectoryWriter;
pub use xml::{escape_xml, render_index, render_urlset, SitemapIndexEntry, SITEMAP_NAMESPACE};

use crate::config::Config;
use crate::discovery::Discovery;
use crate::record::today;
use std::path::PathBuf;

/// What a generation run wrote
#[derive(Debug, Clone)]
pub struct GenerationSummary {
    /// Sitemap filenames in index order
    pub files: Vec<String>,
    pub index_url: String,
    pub report_path: PathBuf,
    pub report: AnalyticsReport,
}

/// Partitions a discovery result and writes every artifact
///
/// # Arguments
///
/// * `discovery` - Aggregated discovery result
/// * `config` - Output filenames and per-file cap
/// * `writer` - Where artifacts go
/// * `config_hash` - Hash of the configuration file, recorded in the report
///
/// # Returns
///
/// * `Ok(GenerationSummary)` - All files, the index and the report were written
/// * `Err(OutputError)` - A write or serialization failed
pub fn generate(
    discovery: &Discovery,
    config: &Config,
    writer: &dyn ArtifactWriter,
    config_hash: Option<&str>,
) -> OutputResult<GenerationSummary> {
    let files = partition(
        &discovery.directories,
        &discovery.categories,
        config.sitemap.max_urls_per_file,
    );

    tracing::info!("Generating {} sitemap files", files.len());

    let lastmod = today();
    let mut index_entries = Vec::with_capacity(files.len());
    for file in &files {
        writer.write_artifact(&file.filename, &render_urlset(&file.records))?;
        tracing::info!(
            "Created {} with {} URLs ({})",
            file.filename,
            file.records.len(),
            file.kind
        );
        index_entries.push(SitemapIndexEntry {
            sitemap_url: artifact_url(&discovery.base_url, &file.filename),
            last_modified: lastmod.clone(),
        });
    }

    let index_filename = &config.output.index_filename;
    writer.write_artifact(index_filename, &render_index(&index_entries))?;
    let index_url = artifact_url(&discovery.base_url, index_filename);
    tracing::info!("Created sitemap index {}", index_filename);

    let report = AnalyticsReport::build(discovery, &files, &index_url, config_hash);
    writer.write_artifact(&config.output.report_filename, &report.to_json()?)?;

    Ok(GenerationSummary {
        files: files.into_iter().map(|f| f.filename).collect(),
        index_url,
        report_path: PathBuf::from(&config.output.directory).join(&config.output.report_filename),
        report,
    })
}

/// Public URL of an artifact served from the site root
fn artifact_url(base: &str, filename: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), filename)
}
