//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! seed-to-file pipeline end-to-end.

use site_markdown::config::{Config, CrawlerConfig, FilterConfig, OutputConfig};
use site_markdown::crawler::{run, Fetch, HttpFetcher};
use site_markdown::url::parse_seed;
use site_markdown::FetchError;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing into `output_dir`
fn create_test_config(output_dir: &TempDir, rewrite_links: bool) -> Config {
    Config {
        crawler: CrawlerConfig {
            user_agent: "TestBot/1.0".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 2,
        },
        filters: FilterConfig {
            ids: vec!["banner".to_string()],
            classes: vec!["menu".to_string()],
        },
        output: OutputConfig {
            directory: output_dir.path().to_string_lossy().into_owned(),
            rewrite_links,
        },
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><head><title>T</title></head><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

/// Mounts a small documentation site under /docs/
async fn mount_docs_site(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/docs/intro"))
        .respond_with(html(
            r##"<nav class="menu thin-scrollbar"><a href="/docs/hidden">Hidden</a></nav>
               <h1>Introduction</h1>
               <p>Read the <a href="setup">setup page</a> next.</p>
               <a href="/">Home</a>
               <a href="/blog/post">Blog</a>
               <a href="missing">Broken</a>
               <a href="https://different.com/docs/intro">Elsewhere</a>
               <a href="#top">Top</a>"##,
        ))
        .expect(1)
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/setup"))
        .respond_with(html(
            r#"<div id="banner">Banner text</div>
               <h1>Setup</h1>
               <p>Go back to the <a href="intro">introduction</a>.</p>"#,
        ))
        .expect(1)
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(mock_server)
        .await;

    // Out of scope or filtered out; must never be requested
    for never in ["/", "/blog/post", "/docs/hidden"] {
        Mock::given(method("GET"))
            .and(path(never))
            .respond_with(html("<h1>Never</h1>"))
            .expect(0)
            .mount(mock_server)
            .await;
    }
}

#[tokio::test]
async fn test_full_crawl_writes_single_file() {
    let mock_server = MockServer::start().await;
    mount_docs_site(&mock_server).await;

    let output_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&output_dir, false);
    let seed = parse_seed(&format!("{}/docs/intro", mock_server.uri())).unwrap();

    let report = run(&seed, &config).await.expect("Run failed");

    assert_eq!(report.path, output_dir.path().join("127.0.0.1.docs.intro.md"));
    assert_eq!(report.stats.emitted, 2);
    assert_eq!(report.stats.failed, 1);

    let markdown = std::fs::read_to_string(&report.path).expect("Missing output file");
    assert_eq!(markdown.chars().count(), report.characters);

    let intro = markdown.find("Introduction").expect("intro page missing");
    let setup = markdown.find("Setup").expect("setup page missing");
    assert!(intro < setup);
    assert!(markdown.contains("setup page"));
    assert!(!markdown.contains("Banner text"));
    assert!(!markdown.contains("Hidden"));
    assert!(!markdown.contains("Never"));
}

#[tokio::test]
async fn test_full_crawl_with_link_rewriting() {
    let mock_server = MockServer::start().await;
    mount_docs_site(&mock_server).await;

    let output_dir = TempDir::new().expect("Failed to create temp dir");
    let config = create_test_config(&output_dir, true);
    let seed = parse_seed(&format!("{}/docs/intro", mock_server.uri())).unwrap();

    let report = run(&seed, &config).await.expect("Run failed");
    let markdown = std::fs::read_to_string(&report.path).expect("Missing output file");

    assert!(markdown.contains("[Setup](#setup)"));
    assert!(markdown.contains("[Introduction](#introduction)"));
    assert!(!markdown.contains("\\["));
    assert!(!markdown.contains("setup page"));
    assert!(!markdown.contains("the introduction"));
}

#[tokio::test]
async fn test_timeout_is_a_skipped_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs/slow"))
        .respond_with(html("<h1>Slow</h1>").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let output_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = create_test_config(&output_dir, false);
    config.crawler.timeout_secs = 1;
    config.crawler.connect_timeout_secs = 1;

    let seed = parse_seed(&format!("{}/docs/slow", mock_server.uri())).unwrap();
    let report = run(&seed, &config).await.expect("Run failed");

    assert_eq!(report.stats.emitted, 0);
    assert_eq!(report.stats.failed, 1);
    assert_eq!(std::fs::read_to_string(&report.path).unwrap(), "");
}

#[tokio::test]
async fn test_fetcher_classifies_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/error"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&CrawlerConfig {
        user_agent: "TestBot/1.0".to_string(),
        timeout_secs: 1,
        connect_timeout_secs: 1,
    })
    .unwrap();

    let error_url = url::Url::parse(&format!("{}/error", mock_server.uri())).unwrap();
    assert!(matches!(
        fetcher.fetch(&error_url).await,
        Err(FetchError::Status { status: 500, .. })
    ));

    let slow_url = url::Url::parse(&format!("{}/slow", mock_server.uri())).unwrap();
    assert!(matches!(
        fetcher.fetch(&slow_url).await,
        Err(FetchError::Timeout { .. })
    ));
}

#[tokio::test]
async fn test_fetcher_parses_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs/page"))
        .respond_with(html("<h1>Parsed</h1>"))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new(&CrawlerConfig::default()).unwrap();
    let page_url = url::Url::parse(&format!("{}/docs/page", mock_server.uri())).unwrap();
    let document = fetcher.fetch(&page_url).await.expect("fetch failed");

    let selector = scraper::Selector::parse("h1").unwrap();
    let heading: String = document.select(&selector).next().unwrap().text().collect();
    assert_eq!(heading, "Parsed");
}

#[test]
fn test_invalid_seed_rejected() {
    assert!(parse_seed("not a url").is_err());
    assert!(parse_seed("/docs/intro").is_err());
}
