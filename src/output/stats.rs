//! Console executive summary

use crate::output::GenerationSummary;

/// Directories listed in the summary
const TOP_DIRECTORIES: usize = 8;

/// Prints the executive summary of a generation run to stdout
pub fn print_summary(summary: &GenerationSummary) {
    let report = &summary.report;

    println!("=== Sitemap Generation Summary ===\n");

    println!("Overview:");
    println!("  Website: {}", report.generation_info.base_url);
    println!("  Total URLs: {}", report.url_statistics.total_urls);
    println!(
        "  Sitemap files: {}",
        report.generation_info.total_sitemap_files
    );
    println!("  Directories: {}", report.url_statistics.directories_count);
    println!("  Categories: {}", report.url_statistics.categories_count);
    println!();

    println!("Top Directories:");
    for (name, count) in top_directories(summary) {
        println!("  {}: {} URLs", name, count);
    }
    println!();

    let diagnostics = &report.diagnostics;
    println!("Discovery:");
    println!(
        "  Sitemaps read: {} ({} fetch failures, {} parse failures)",
        diagnostics.sitemaps_read,
        diagnostics.sitemap_fetch_failures,
        diagnostics.sitemap_parse_failures
    );
    println!(
        "  Pages crawled: {} ({}, {} failures)",
        diagnostics.pages_crawled, diagnostics.crawl_outcome, diagnostics.crawl_fetch_failures
    );
    if diagnostics.used_essential_fallback {
        println!("  Nothing discovered; essential URLs were used instead");
    }
    println!();

    println!("Next Steps:");
    println!(
        "  1. Submit {} to your search engine webmaster tools",
        report.generation_info.sitemap_index_url
    );
    println!(
        "  2. Review {} for detailed analysis",
        summary.report_path.display()
    );
}

/// Directories by URL count, largest first, ties by name
fn top_directories(summary: &GenerationSummary) -> Vec<(&str, usize)> {
    let mut counts: Vec<(&str, usize)> = summary
        .report
        .directory_breakdown
        .iter()
        .map(|(name, breakdown)| (name.as_str(), breakdown.url_count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    counts.truncate(TOP_DIRECTORIES);
    counts
}
