//! HTTP fetcher tests against a mock server

use crate::{html_page, mount_page, test_config};
use omni_crawler::crawler::{HttpFetcher, PageFetcher};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_extracts_title_links_and_markdown() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/docs/",
        html_page(
            "Getting started",
            r#"<h1>Getting started</h1>
            <p>Read the <a href="/docs/install">install guide</a> before anything else in this manual.</p>
            <p>Questions go to <a href="https://forum.example.org/">the forum</a> or the mailing list.</p>"#,
        ),
    )
    .await;

    let fetcher = HttpFetcher::new(&test_config()).unwrap();
    let result = fetcher.fetch(&format!("{}/docs/", server.uri())).await;

    assert!(result.success, "{:?}", result.error_message);
    assert_eq!(result.status_code, Some(200));
    assert_eq!(result.title.as_deref(), Some("Getting started"));
    assert_eq!(result.links.internal.len(), 1);
    assert_eq!(
        result.links.internal[0].href,
        format!("{}/docs/install", server.uri())
    );
    assert_eq!(result.links.external.len(), 1);

    let markdown = result.fit_markdown().unwrap();
    assert!(markdown.contains("Getting started"));
    assert!(markdown.contains("install guide"));
}

#[tokio::test]
async fn test_fetch_sends_configured_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "omni-crawler-test"))
        .and(header("referer", "https://www.google.com/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(html_page("Home", "<p>Headers matched the expected values here.</p>"), "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&test_config()).unwrap();
    let result = fetcher.fetch(&format!("{}/", server.uri())).await;
    assert!(result.success, "{:?}", result.error_message);

    let requests = server.received_requests().await.unwrap();
    let accept_language: Vec<String> = requests[0]
        .headers
        .iter()
        .filter(|(name, _)| name.as_str() == "accept-language")
        .flat_map(|(_, values)| values.iter().map(|v| v.to_string()).collect::<Vec<_>>())
        .collect();
    assert_eq!(accept_language.join(","), "en-US,en;q=0.9,es;q=0.8");
}

#[tokio::test]
async fn test_fetch_without_referer() {
    let server = MockServer::start().await;
    mount_page(&server, "/", html_page("Home", "<p>Plain page</p>")).await;

    let mut config = test_config();
    config.fetch.spoof_referer = false;
    let fetcher = HttpFetcher::new(&config).unwrap();
    fetcher.fetch(&format!("{}/", server.uri())).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0]
        .headers
        .iter()
        .any(|(name, _)| name.as_str() == "referer"));
}

#[tokio::test]
async fn test_http_error_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&test_config()).unwrap();
    let result = fetcher.fetch(&format!("{}/docs/", server.uri())).await;

    assert!(!result.success);
    assert_eq!(result.status_code, Some(503));
    assert!(result.markdown.is_none());
}

#[tokio::test]
async fn test_non_html_is_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0u8; 16])
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&test_config()).unwrap();
    let result = fetcher.fetch(&format!("{}/manual.pdf", server.uri())).await;

    assert!(!result.success);
    assert!(result.error_message.unwrap().contains("application/pdf"));
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", server.uri()).as_str()),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/new", html_page("New", "<p>The page moved to a new home.</p>")).await;

    let fetcher = HttpFetcher::new(&test_config()).unwrap();
    let result = fetcher.fetch(&format!("{}/old", server.uri())).await;

    assert!(result.success);
    assert_eq!(result.redirected_url, Some(format!("{}/new", server.uri())));
}

#[tokio::test]
async fn test_fetch_many_returns_every_url() {
    let server = MockServer::start().await;
    for route in ["/a", "/b", "/c"] {
        mount_page(&server, route, html_page(route, "<p>Some page</p>")).await;
    }

    let fetcher = HttpFetcher::new(&test_config()).unwrap();
    let urls: Vec<String> = ["/a", "/b", "/c", "/missing"]
        .iter()
        .map(|route| format!("{}{}", server.uri(), route))
        .collect();

    let results = fetcher.fetch_many(&urls).await;
    assert_eq!(results.len(), 4);

    let mut succeeded: Vec<&str> = results
        .iter()
        .filter(|r| r.success)
        .map(|r| r.url.as_str())
        .collect();
    succeeded.sort();
    assert_eq!(succeeded, vec![urls[0].as_str(), urls[1].as_str(), urls[2].as_str()]);
}
