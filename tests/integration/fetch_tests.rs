//! Fetch collaborator behavior over real HTTP

use crate::{fast_fetcher, quick_retry};
use std::time::Duration;
use sumi_atlas::config::Config;
use sumi_atlas::crawler::{build_http_client, FetchError, Fetcher, HttpFetcher, RetryPolicy};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn requests_to(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == route)
        .count()
}

#[tokio::test]
async fn test_transient_failure_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .mount(&server)
        .await;

    let fetcher = fast_fetcher(&Config::default(), quick_retry(2));
    let body = fetcher
        .fetch_with_retry(&format!("{}/flaky", server.uri()))
        .await
        .expect("Fetch should succeed after one retry");

    assert_eq!(body, "recovered");
    assert_eq!(requests_to(&server, "/flaky").await, 2);
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = fast_fetcher(&Config::default(), quick_retry(3));
    let result = fetcher
        .fetch_with_retry(&format!("{}/missing", server.uri()))
        .await;

    assert!(matches!(result, Err(FetchError::Http { status: 404 })));
    assert_eq!(requests_to(&server, "/missing").await, 1);
}

#[tokio::test]
async fn test_retries_exhausted_yield_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = fast_fetcher(&Config::default(), quick_retry(2));
    let body = fetcher.fetch(&format!("{}/down", server.uri())).await;

    assert!(body.is_none());
    assert_eq!(requests_to(&server, "/down").await, 3);
}

#[tokio::test]
async fn test_rate_limited_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/busy"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let fetcher = fast_fetcher(&Config::default(), quick_retry(1));
    let body = fetcher.fetch(&format!("{}/busy", server.uri())).await;

    assert_eq!(body.as_deref(), Some("ok"));
}

#[tokio::test]
async fn test_user_agent_header() {
    let server = MockServer::start().await;
    let mut config = Config::default();
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "1.0.0".to_string();
    config.user_agent.contact_url = Some("https://example.com/contact".to_string());

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header(
            "user-agent",
            "TestBot/1.0.0 (+https://example.com/contact)",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
        .mount(&server)
        .await;

    let fetcher = fast_fetcher(&config, RetryPolicy::none());
    let body = fetcher.fetch(&format!("{}/", server.uri())).await;

    assert_eq!(body.as_deref(), Some("hello"));
}

#[tokio::test]
async fn test_politeness_delay_between_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("page"))
        .mount(&server)
        .await;

    let client = build_http_client(&Config::default()).expect("Failed to build HTTP client");
    let politeness = Duration::from_millis(150);
    let fetcher = HttpFetcher::with_client(client, RetryPolicy::none(), politeness);

    let start = std::time::Instant::now();
    fetcher.fetch(&format!("{}/a", server.uri())).await;
    fetcher.fetch(&format!("{}/b", server.uri())).await;
    fetcher.fetch(&format!("{}/c", server.uri())).await;

    assert!(start.elapsed() >= politeness * 2);
}
