//! Sumi-Atlas main entry point
//!
//! This is the command-line interface for the Sumi-Atlas sitemap synthesizer.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use sumi_atlas::config::{load_config_with_hash, validate, Config};
use sumi_atlas::output::print_summary;
use sumi_atlas::sitemap::{probe_urls, robots_url};
use sumi_atlas::{build_sitemaps, normalize_base_url};
use tracing_subscriber::EnvFilter;

/// Sumi-Atlas: a polite sitemap synthesizer
///
/// Sumi-Atlas reads a site's existing sitemaps, crawls it breadth-first and
/// writes a complete, size-bounded sitemap set with an index and an
/// analytics report.
#[derive(Parser, Debug)]
#[command(name = "sumi-atlas")]
#[command(version)]
#[command(about = "A polite sitemap synthesizer", long_about = None)]
struct Cli {
    /// Website to map (https:// is assumed when no scheme is given)
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum URLs per sitemap file
    #[arg(long, value_name = "N")]
    max_urls: Option<usize>,

    /// Maximum pages to crawl
    #[arg(long, value_name = "N")]
    max_crawl: Option<usize>,

    /// Directory the sitemaps are written to
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate configuration and show what would be probed without any network access
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (config, config_hash) = resolve_config(&cli)?;
    let base = normalize_base_url(&cli.url)
        .with_context(|| format!("Invalid website URL: {}", cli.url))?;

    if cli.dry_run {
        handle_dry_run(&base, &config, config_hash.as_deref());
        return Ok(());
    }

    handle_generate(&base, &config, config_hash.as_deref()).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_atlas=info,warn"),
            1 => EnvFilter::new("sumi_atlas=debug,info"),
            2 => EnvFilter::new("sumi_atlas=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file (if any), applies CLI overrides and validates
fn resolve_config(cli: &Cli) -> anyhow::Result<(Config, Option<String>)> {
    let (mut config, hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (config, Some(hash))
        }
        None => (Config::default(), None),
    };

    if let Some(max_urls) = cli.max_urls {
        config.sitemap.max_urls_per_file = max_urls;
    }
    if let Some(max_crawl) = cli.max_crawl {
        config.crawler.max_crawl_pages = max_crawl;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok((config, hash))
}

/// Handles the --dry-run mode: shows the effective configuration and probe plan
fn handle_dry_run(base: &str, config: &Config, config_hash: Option<&str>) {
    println!("=== Sumi-Atlas Dry Run ===\n");

    println!("Website: {}", base);
    if let Some(hash) = config_hash {
        println!("Config hash: {}", hash);
    }

    println!("\nCrawler:");
    println!("  Max pages: {}", config.crawler.max_crawl_pages);
    println!("  Max frontier: {}", config.crawler.max_frontier_size);

    println!("\nFetch:");
    println!("  User agent: {}", config.user_agent.header_value());
    println!("  Timeout: {}s", config.fetch.timeout_secs);
    println!(
        "  Retries: {} (backoff {}ms to {}ms)",
        config.fetch.max_retries, config.fetch.retry_base_delay_ms, config.fetch.retry_max_delay_ms
    );
    println!("  Politeness delay: {}ms", config.fetch.politeness_delay_ms);

    println!("\nSitemaps:");
    println!("  Max URLs per file: {}", config.sitemap.max_urls_per_file);
    println!(
        "  Index budget: {} children, depth {}, {} documents",
        config.sitemap.max_index_children,
        config.sitemap.max_index_depth,
        config.sitemap.max_sitemaps
    );

    println!("\nProbe plan:");
    println!("  - {}", robots_url(base));
    for url in probe_urls(base, &config.sitemap.extra_paths) {
        println!("  - {}", url);
    }

    println!(
        "\nEssential URLs ({}, verified: {}):",
        config.discovery.essential_paths.len(),
        config.discovery.verify_essentials
    );
    for path in &config.discovery.essential_paths {
        println!("  - {}{}", base, path);
    }

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Index: {}", config.output.index_filename);
    println!("  Report: {}", config.output.report_filename);

    println!("\n✓ Configuration is valid");
}

/// Runs discovery and writes the sitemap set
async fn handle_generate(
    base: &str,
    config: &Config,
    config_hash: Option<&str>,
) -> anyhow::Result<()> {
    let summary = build_sitemaps(base, config, config_hash)
        .await
        .with_context(|| format!("Failed to build sitemaps for {}", base))?;

    tracing::info!(
        "Wrote {} sitemap files to {}",
        summary.files.len(),
        config.output.directory
    );

    print_summary(&summary);
    Ok(())
}
