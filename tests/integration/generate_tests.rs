//! End-to-end discovery and sitemap generation

use crate::{fast_fetcher, quick_retry};
use std::fs;
use std::path::Path;
use sumi_atlas::config::Config;
use sumi_atlas::crawler::RetryPolicy;
use sumi_atlas::output::{self, DirectoryWriter};
use sumi_atlas::sitemap::{parse_sitemap, SitemapDocument};
use sumi_atlas::{build_sitemaps, discover, normalize_base_url, AtlasError, Origin, UrlError};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_xml(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "application/xml"),
        )
        .mount(server)
        .await;
}

fn read(dir: &Path, filename: &str) -> String {
    fs::read_to_string(dir.join(filename))
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", filename, e))
}

#[tokio::test]
async fn test_homepage_only_site() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        "<html><head><title>Home</title></head><body>Welcome</body></html>",
    )
    .await;

    let base = normalize_base_url(&server.uri()).unwrap();
    let config = Config::default();
    let fetcher = fast_fetcher(&config, RetryPolicy::none());

    let discovery = discover(&base, &config, &fetcher).await;

    let temp = TempDir::new().unwrap();
    let writer = DirectoryWriter::create(temp.path()).unwrap();
    let summary = output::generate(&discovery, &config, &writer, None).unwrap();

    assert_eq!(summary.files, vec!["sitemap.xml"]);

    let sitemap = read(temp.path(), "sitemap.xml");
    assert_eq!(sitemap.matches("<url>").count(), 1);
    assert!(sitemap.contains(&format!("<loc>{}/</loc>", base)));
    assert!(sitemap.contains("<priority>1.0</priority>"));
    assert!(sitemap.contains("<changefreq>daily</changefreq>"));

    let index = read(temp.path(), "sitemap_index.xml");
    assert_eq!(index.matches("<sitemap>").count(), 1);
    assert!(index.contains(&format!("<loc>{}/sitemap.xml</loc>", base)));

    let report: serde_json::Value =
        serde_json::from_str(&read(temp.path(), "sitemap-analysis-report.json")).unwrap();
    assert_eq!(report["url_statistics"]["total_urls"], 1);
    assert_eq!(report["diagnostics"]["crawl_outcome"], "done");
    assert_eq!(report["diagnostics"]["used_essential_fallback"], false);
}

#[tokio::test]
async fn test_existing_sitemap_metadata_wins() {
    let server = MockServer::start().await;
    let base = normalize_base_url(&server.uri()).unwrap();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(format!("User-agent: *\nSitemap: {}/sitemap.xml\n", base)),
        )
        .mount(&server)
        .await;
    mount_xml(
        &server,
        "/sitemap.xml",
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>{base}/blog/first-post</loc>
    <lastmod>2020-01-15</lastmod>
    <changefreq>yearly</changefreq>
    <priority>0.3</priority>
  </url>
  <url><lastmod>2020-01-15</lastmod></url>
</urlset>"#
        ),
    )
    .await;
    mount_page(
        &server,
        "/",
        r#"<a href="/blog/first-post">First</a><a href="/about">About</a>"#,
    )
    .await;
    mount_page(&server, "/blog/first-post", "<p>Post</p>").await;
    mount_page(&server, "/about", "<p>About</p>").await;

    let config = Config::default();
    let fetcher = fast_fetcher(&config, RetryPolicy::none());
    let discovery = discover(&base, &config, &fetcher).await;

    let post = discovery
        .records
        .iter()
        .find(|r| r.location.ends_with("/blog/first-post"))
        .expect("post should be discovered");
    assert_eq!(post.origin, Origin::ExistingSitemap);
    assert_eq!(post.last_modified, "2020-01-15");
    assert_eq!(post.priority.to_string(), "0.3");
    assert_eq!(discovery.diagnostics.malformed_entries, 1);
    assert_eq!(discovery.diagnostics.robots_sitemaps, 1);

    let temp = TempDir::new().unwrap();
    let writer = DirectoryWriter::create(temp.path()).unwrap();
    let summary = output::generate(&discovery, &config, &writer, None).unwrap();

    assert_eq!(
        summary.files,
        vec!["sitemap-blog.xml", "sitemap.xml", "sitemap-about.xml"]
    );
    let blog = read(temp.path(), "sitemap-blog.xml");
    assert!(blog.contains("<lastmod>2020-01-15</lastmod>"));
    assert!(blog.contains("<changefreq>yearly</changefreq>"));
}

#[tokio::test]
async fn test_self_referencing_sitemap_index_terminates() {
    let server = MockServer::start().await;
    let base = normalize_base_url(&server.uri()).unwrap();

    mount_xml(
        &server,
        "/sitemap_index.xml",
        format!(
            r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>{base}/sitemap_index.xml</loc></sitemap>
  <sitemap><loc>{base}/sitemap-posts.xml</loc></sitemap>
</sitemapindex>"#
        ),
    )
    .await;
    mount_xml(
        &server,
        "/sitemap-posts.xml",
        format!(
            r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/posts/one</loc></url>
</urlset>"#
        ),
    )
    .await;
    mount_page(&server, "/", "<p>Home</p>").await;

    let config = Config::default();
    let fetcher = fast_fetcher(&config, quick_retry(0));
    let discovery = discover(&base, &config, &fetcher).await;

    assert!(discovery
        .records
        .iter()
        .any(|r| r.location == format!("{}/posts/one", base)));
    assert!(discovery.diagnostics.recursion_truncated >= 1);

    let index_fetches = server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == "/sitemap_index.xml")
        .count();
    assert!(index_fetches <= 3, "index fetched {} times", index_fetches);
}

#[tokio::test]
async fn test_large_site_is_split_across_files() {
    let server = MockServer::start().await;
    let base = normalize_base_url(&server.uri()).unwrap();

    let entries: String = (0..25)
        .map(|i| format!("<url><loc>{}/docs/page-{}</loc></url>", base, i))
        .collect();
    mount_xml(
        &server,
        "/sitemap.xml",
        format!(
            r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
            entries
        ),
    )
    .await;

    let mut config = Config::default();
    config.sitemap.max_urls_per_file = 10;
    config.crawler.max_crawl_pages = 1;
    let fetcher = fast_fetcher(&config, RetryPolicy::none());
    let discovery = discover(&base, &config, &fetcher).await;

    let temp = TempDir::new().unwrap();
    let writer = DirectoryWriter::create(temp.path()).unwrap();
    let summary = output::generate(&discovery, &config, &writer, None).unwrap();

    assert_eq!(
        summary.files,
        vec![
            "sitemap-docs-part1.xml",
            "sitemap-docs-part2.xml",
            "sitemap-docs-part3.xml",
        ]
    );

    let mut total = 0;
    for filename in &summary.files {
        let parsed = parse_sitemap(&read(temp.path(), filename)).unwrap();
        match parsed.document {
            SitemapDocument::UrlSet(entries) => {
                assert!(entries.len() <= 10);
                total += entries.len();
            }
            SitemapDocument::Index(_) => panic!("{} should be a urlset", filename),
        }
    }
    assert_eq!(total, 25);

    let index = read(temp.path(), "sitemap_index.xml");
    assert_eq!(index.matches("<sitemap>").count(), 3);
}

#[tokio::test]
async fn test_unreachable_site_still_produces_sitemaps() {
    let server = MockServer::start().await;
    let base = normalize_base_url(&server.uri()).unwrap();

    let config = Config::default();
    let fetcher = fast_fetcher(&config, RetryPolicy::none());
    let discovery = discover(&base, &config, &fetcher).await;

    assert!(discovery.diagnostics.used_essential_fallback);

    let temp = TempDir::new().unwrap();
    let writer = DirectoryWriter::create(temp.path()).unwrap();
    let summary = output::generate(&discovery, &config, &writer, None).unwrap();

    assert!(summary.files.contains(&"sitemap.xml".to_string()));
    let sitemap = read(temp.path(), "sitemap.xml");
    assert!(sitemap.contains(&format!("<loc>{}/</loc>", base)));
}

#[tokio::test]
async fn test_build_sitemaps_writes_into_configured_directory() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<html><body><a href="/about">About</a></body></html>"#,
    )
    .await;
    mount_page(&server, "/about", "<html><body>About us</body></html>").await;

    let temp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.fetch.politeness_delay_ms = 100;
    config.fetch.max_retries = 0;
    config.output.directory = temp.path().join("out").to_string_lossy().into_owned();

    let summary = build_sitemaps(&server.uri(), &config, Some("abc123"))
        .await
        .unwrap();

    let out = temp.path().join("out");
    assert!(summary.files.contains(&"sitemap.xml".to_string()));
    assert!(summary.files.contains(&"sitemap-about.xml".to_string()));
    assert!(out.join("sitemap_index.xml").exists());
    assert_eq!(summary.report_path, out.join("sitemap-analysis-report.json"));
    assert!(read(&out, "sitemap-analysis-report.json").contains("abc123"));
}

#[tokio::test]
async fn test_build_sitemaps_rejects_unsupported_scheme() {
    let temp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.output.directory = temp.path().to_string_lossy().into_owned();

    let result = build_sitemaps("ftp://example.com", &config, None).await;

    assert!(matches!(
        result,
        Err(AtlasError::UrlError(UrlError::InvalidScheme(_)))
    ));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_build_sitemaps_rejects_invalid_config() {
    let mut config = Config::default();
    config.output.index_filename = "sitemap.xml".to_string();

    let result = build_sitemaps("https://example.com", &config, None).await;
    assert!(matches!(result, Err(AtlasError::Config(_))));
}
