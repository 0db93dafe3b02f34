//! End-to-end crawl tests

use crate::{mount_docs_site, mount_page, test_config};
use omni_crawler::crawl_exit_status;
use omni_crawler::crawler::{run_crawl, CrawlRequest};
use omni_crawler::output::{ProgressEvent, ProgressSink};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn collecting_sink() -> (impl ProgressSink, Arc<Mutex<Vec<ProgressEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let captured = events.clone();
    let sink = move |event: &ProgressEvent| captured.lock().unwrap().push(event.clone());
    (sink, events)
}

#[tokio::test]
async fn test_full_crawl_writes_consolidated_file() {
    let server = MockServer::start().await;
    mount_docs_site(&server).await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("docs.md");
    let seed = format!("{}/docs/", server.uri());
    let (sink, events) = collecting_sink();

    let ok = run_crawl(&test_config(), &CrawlRequest::new(&seed, &output), &sink)
        .await
        .expect("Crawl failed");
    assert!(ok);

    let content = std::fs::read_to_string(&output).unwrap();
    let domain = seed.split("//").nth(1).unwrap().split('/').next().unwrap();
    assert!(content.starts_with(&format!("# Documentación de {}\nGenerado el: ", domain)));

    // The seed and the two pages under /docs/ are fetched in the bulk phase
    assert_eq!(content.matches("## FUENTE: ").count(), 3);
    assert!(content.contains(&format!("## FUENTE: {}\n---\n\n", seed)));
    assert!(content.contains(&format!("## FUENTE: {}/docs/install\n---\n\n", server.uri())));
    assert!(content.contains(&format!("## FUENTE: {}/docs/config\n---\n\n", server.uri())));
    assert!(!content.contains(&format!("## FUENTE: {}/blog/", server.uri())));
    assert!(!content.contains("## FUENTE: https://other.example.org"));

    assert!(content.contains("Download the static binary"));
    assert!(content.contains("curl -fsSL"));
    assert!(content.contains("current working directory"));
    assert!(!content.contains("Copyright footer"));

    let events = events.lock().unwrap();
    assert_eq!(events[0], ProgressEvent::Started { url: seed.clone() });
    assert_eq!(events[1], ProgressEvent::ScanningIndex);
    assert!(events.contains(&ProgressEvent::PagesDiscovered { count: 3 }));
    assert_eq!(
        events.last(),
        Some(&ProgressEvent::Finished { path: output.clone() })
    );
}

#[tokio::test]
async fn test_index_failure_writes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/docs/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("docs.md");
    let (sink, events) = collecting_sink();

    let ok = run_crawl(
        &test_config(),
        &CrawlRequest::new(format!("{}/docs/", server.uri()), &output),
        &sink,
    )
    .await
    .unwrap();

    assert!(!ok);
    assert!(!output.exists());
    assert!(matches!(
        events.lock().unwrap().last(),
        Some(ProgressEvent::IndexFailed { .. })
    ));
}

#[tokio::test]
async fn test_failed_pages_are_skipped() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/docs/",
        crate::html_page(
            "Docs",
            r#"<p><a href="/docs/ok">Working page</a> and <a href="/docs/broken">broken page</a> and <a href="/docs/data.json">data</a></p>"#,
        ),
    )
    .await;
    mount_page(
        &server,
        "/docs/ok",
        crate::html_page("Ok", "<p>This page loads fine and has enough words to be kept.</p>"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/docs/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/docs/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"key": "value"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("docs.md");
    let (sink, events) = collecting_sink();

    let ok = run_crawl(
        &test_config(),
        &CrawlRequest::new(format!("{}/docs/", server.uri()), &output),
        &sink,
    )
    .await
    .unwrap();
    assert!(ok);

    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(content.matches("## FUENTE: ").count(), 2);
    assert!(content.contains("This page loads fine"));

    let mut failed: Vec<String> = events
        .lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e {
            ProgressEvent::PageFailed { url } => Some(url.clone()),
            _ => None,
        })
        .collect();
    failed.sort();
    assert_eq!(
        failed,
        vec![
            format!("{}/docs/broken", server.uri()),
            format!("{}/docs/data.json", server.uri()),
        ]
    );
}

#[tokio::test]
async fn test_index_without_links_writes_seed_only() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/docs/",
        crate::html_page("Docs", "<p>Nothing to see here, this index has no links at all.</p>"),
    )
    .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("docs.md");
    let (sink, events) = collecting_sink();

    let ok = run_crawl(
        &test_config(),
        &CrawlRequest::new(format!("{}/docs/", server.uri()), &output),
        &sink,
    )
    .await
    .unwrap();
    assert!(ok);

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("# Documentación de "));
    assert_eq!(content.matches("## FUENTE: ").count(), 1);
    assert!(content.contains("this index has no links"));
    assert!(events
        .lock()
        .unwrap()
        .contains(&ProgressEvent::PagesDiscovered { count: 1 }));
}

#[tokio::test]
async fn test_exit_status_follows_crawl_outcome() {
    let server = MockServer::start().await;
    mount_docs_site(&server).await;

    let dir = tempdir().unwrap();
    let (sink, _events) = collecting_sink();

    let written = run_crawl(
        &test_config(),
        &CrawlRequest::new(format!("{}/docs/", server.uri()), dir.path().join("ok.md")),
        &sink,
    )
    .await;
    assert_eq!(crawl_exit_status(&written), 0);

    // Nothing is mounted under /missing/, so the index fetch returns 404
    let index_failed = run_crawl(
        &test_config(),
        &CrawlRequest::new(format!("{}/missing/", server.uri()), dir.path().join("missing.md")),
        &sink,
    )
    .await;
    assert!(matches!(index_failed, Ok(false)));
    assert_eq!(crawl_exit_status(&index_failed), 1);

    let unwritable = run_crawl(
        &test_config(),
        &CrawlRequest::new(
            format!("{}/docs/", server.uri()),
            dir.path().join("no-such-dir").join("out.md"),
        ),
        &sink,
    )
    .await;
    assert!(unwritable.is_err());
    assert_eq!(crawl_exit_status(&unwritable), 1);
}
