//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, with an in-memory sink recording
//! every artifact the crawl publishes.

use async_trait::async_trait;
use page_harvest::config::{CaptureMode, Config, CrawlerConfig};
use page_harvest::crawler::Coordinator;
use page_harvest::output::{Artifact, IMAGE_MIME, TEXT_MIME};
use page_harvest::sink::{ArtifactSink, SinkError, SinkResult};
use page_harvest::{ConfigError, HarvestError};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Sink that keeps every artifact in memory
#[derive(Default)]
struct RecordingSink {
    artifacts: Mutex<Vec<Artifact>>,
}

impl RecordingSink {
    fn artifacts(&self) -> Vec<Artifact> {
        self.artifacts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactSink for RecordingSink {
    async fn store(&self, artifact: &Artifact) -> SinkResult<String> {
        self.artifacts.lock().unwrap().push(artifact.clone());
        Ok(artifact.name.clone())
    }

    fn describe(&self) -> String {
        "recording".to_string()
    }
}

/// Sink that refuses every artifact
struct RefusingSink;

#[async_trait]
impl ArtifactSink for RefusingSink {
    async fn store(&self, artifact: &Artifact) -> SinkResult<String> {
        Err(SinkError::Auth(format!("no write access for {}", artifact.name)))
    }

    fn describe(&self) -> String {
        "refusing".to_string()
    }
}

fn create_test_config(max_concurrent_fetches: u32, capture: CaptureMode) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_depth: 2,
            max_concurrent_fetches,
            capture,
        },
        ..Config::default()
    }
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: &str, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

fn coordinator(sink: Arc<RecordingSink>) -> Coordinator {
    Coordinator::new(create_test_config(8, CaptureMode::Extracted), sink)
}

#[tokio::test]
async fn test_depth_bound() {
    let server = MockServer::start().await;
    mount_page(&server, "/", r#"<a href="/b">B</a>"#, 1).await;
    mount_page(&server, "/b", r#"<a href="/c">C</a>"#, 1).await;
    mount_page(&server, "/c", "<p>too deep</p>", 0).await;

    let sink = Arc::new(RecordingSink::default());
    let summary = coordinator(sink).crawl(&server.uri(), 1).await.unwrap();

    assert_eq!(summary.pages_fetched, 2);
    assert_eq!(summary.depth_exhausted, 1);
    assert_eq!(summary.urls_claimed, 2);
}

#[tokio::test]
async fn test_depth_zero_fetches_only_seed() {
    let server = MockServer::start().await;
    mount_page(&server, "/", r#"<a href="/b">B</a>"#, 1).await;
    mount_page(&server, "/b", "", 0).await;

    let sink = Arc::new(RecordingSink::default());
    let summary = coordinator(sink).crawl(&server.uri(), 0).await.unwrap();

    assert_eq!(summary.pages_fetched, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_each_url_fetched_at_most_once() {
    let server = MockServer::start().await;

    // Diamond with a back edge to the seed
    mount_page(&server, "/", r#"<a href="/left">L</a><a href="/right">R</a>"#, 1).await;
    mount_page(&server, "/left", r#"<a href="/bottom">B</a>"#, 1).await;
    mount_page(&server, "/right", r#"<a href="/bottom">B</a>"#, 1).await;
    mount_page(&server, "/bottom", r#"<a href="/">Home</a>"#, 1).await;

    let sink = Arc::new(RecordingSink::default());
    let summary = coordinator(sink).crawl(&server.uri(), 5).await.unwrap();

    assert_eq!(summary.pages_fetched, 4);
    assert_eq!(summary.urls_claimed, 4);
    assert_eq!(summary.already_claimed, 2);
}

#[tokio::test]
async fn test_cycle_terminates() {
    let server = MockServer::start().await;
    mount_page(&server, "/", r#"<a href="/a">A</a>"#, 1).await;
    mount_page(&server, "/a", r#"<a href="/b">B</a><a href="/a">self</a>"#, 1).await;
    mount_page(&server, "/b", r#"<a href="/a">A</a><a href="/">Home</a>"#, 1).await;

    let sink = Arc::new(RecordingSink::default());
    let summary = tokio::time::timeout(
        Duration::from_secs(10),
        coordinator(sink).crawl(&server.uri(), 100),
    )
    .await
    .expect("crawl did not terminate")
    .unwrap();

    assert_eq!(summary.pages_fetched, 3);
}

#[tokio::test]
async fn test_failed_branch_does_not_affect_siblings() {
    let server = MockServer::start().await;
    mount_page(&server, "/", r#"<a href="/x">X</a><a href="/y">Y</a>"#, 1).await;
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/y", r#"<a href="/z">Z</a>"#, 1).await;
    mount_page(&server, "/z", "<p>leaf</p>", 1).await;

    let sink = Arc::new(RecordingSink::default());
    let summary = coordinator(sink).crawl(&server.uri(), 3).await.unwrap();

    assert_eq!(summary.pages_fetched, 3);
    assert_eq!(summary.http_errors, 1);
    assert_eq!(summary.fetch_failures(), 1);
}

#[tokio::test]
async fn test_unreachable_seed_is_not_a_run_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let sink = Arc::new(RecordingSink::default());
    let summary = coordinator(sink.clone())
        .crawl(&format!("http://127.0.0.1:{}/", port), 2)
        .await
        .unwrap();

    assert_eq!(summary.pages_fetched, 0);
    assert_eq!(summary.unreachable, 1);
    assert!(sink.artifacts().is_empty());
}

#[tokio::test]
async fn test_text_and_image_artifacts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(
                    r#"<html><head><title>Home</title></head><body>
                    <nav><p>Menu</p></nav>
                    <h1>Welcome</h1>
                    <p>Hello there</p>
                    <img src="/img/logo.jpg">
                    <img src="/img/missing.jpg">
                    </body></html>"#,
                )
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/img/logo.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/img/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let summary = coordinator(sink.clone()).crawl(&server.uri(), 0).await.unwrap();

    assert_eq!(summary.artifacts_stored, 2);
    assert_eq!(summary.publish_failures, 1);

    let artifacts = sink.artifacts();
    let text = artifacts
        .iter()
        .find(|a| a.name == "127_0_0_1_content.txt")
        .expect("text artifact missing");
    assert_eq!(text.mime_type, TEXT_MIME);
    assert_eq!(
        String::from_utf8(text.bytes.clone()).unwrap(),
        "Home\n\nWelcome\n\nHello there"
    );

    let image = artifacts
        .iter()
        .find(|a| a.name == "logo.jpg")
        .expect("image artifact missing");
    assert_eq!(image.mime_type, IMAGE_MIME);
    assert_eq!(image.bytes, vec![0xFF, 0xD8]);
}

#[tokio::test]
async fn test_publish_failures_do_not_stop_expansion() {
    let server = MockServer::start().await;
    mount_page(&server, "/", r#"<a href="/b">B</a>"#, 1).await;
    mount_page(&server, "/b", "<p>leaf</p>", 1).await;

    let summary = Coordinator::new(
        create_test_config(4, CaptureMode::Extracted),
        Arc::new(RefusingSink),
    )
    .crawl(&server.uri(), 1)
    .await
    .unwrap();

    assert_eq!(summary.pages_fetched, 2);
    assert_eq!(summary.artifacts_stored, 0);
    assert_eq!(summary.publish_failures, 2);
}

#[tokio::test]
async fn test_raw_capture_stores_html() {
    let server = MockServer::start().await;
    let body = "<html><body><p>raw page</p></body></html>";
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    Coordinator::new(create_test_config(4, CaptureMode::Raw), sink.clone())
        .crawl(&server.uri(), 0)
        .await
        .unwrap();

    let artifacts = sink.artifacts();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].bytes, body.as_bytes());
}

#[tokio::test]
async fn test_configuration_errors_fail_before_fetching() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "", 0).await;

    let sink = Arc::new(RecordingSink::default());
    let result = coordinator(sink.clone()).crawl(&server.uri(), -1).await;
    assert!(matches!(
        result,
        Err(HarvestError::Config(ConfigError::Validation(_)))
    ));

    let result = coordinator(sink.clone()).crawl("javascript:void(0)", 1).await;
    assert!(matches!(
        result,
        Err(HarvestError::Config(ConfigError::InvalidSeed(_)))
    ));

    assert!(sink.artifacts().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_limit_serializes_requests() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        r#"<a href="/s1">1</a><a href="/s2">2</a><a href="/s3">3</a>"#,
        1,
    )
    .await;
    for route in ["/s1", "/s2", "/s3"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html_page("<p>slow</p>").set_delay(Duration::from_millis(200)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let sink = Arc::new(RecordingSink::default());
    let start = Instant::now();
    let summary = Coordinator::new(create_test_config(1, CaptureMode::Extracted), sink)
        .crawl(&server.uri(), 1)
        .await
        .unwrap();

    assert_eq!(summary.pages_fetched, 4);
    assert!(start.elapsed() >= Duration::from_millis(600));
}
