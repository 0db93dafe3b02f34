//! Integration tests for Omni-Crawler
//!
//! These tests use wiremock to create mock documentation sites and run the
//! fetcher, the full crawl and the GUI server against them.

mod crawl_tests;
mod fetch_tests;
mod gui_tests;

use omni_crawler::config::Config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Configuration without capture delay or user agent randomization
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.fetch.delay_before_capture_ms = 0;
    config.fetch.page_timeout_ms = 5_000;
    config.fetch.randomize_user_agent = false;
    config.fetch.user_agent = "omni-crawler-test".to_string();
    config
}

/// Wraps a title and body into a small HTML document
pub fn html_page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}

/// Mounts an HTML page at `route`
pub async fn mount_page(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(html, "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

/// Mounts a three page documentation site under `/docs/`
///
/// The index links to two pages inside the docs, one fragment link, one page
/// outside the docs and one external site.
pub async fn mount_docs_site(server: &MockServer) {
    mount_page(
        server,
        "/docs/",
        html_page(
            "Docs",
            r##"<nav><a href="/docs/install">Install</a></nav>
            <main>
              <h1>Documentation index</h1>
              <p>Welcome to the documentation of the example web server project.</p>
              <ul>
                <li><a href="/docs/install">Install</a></li>
                <li><a href="config">Configuration</a></li>
                <li><a href="/docs/install#linux">Install on Linux</a></li>
                <li><a href="/blog/">Blog</a></li>
                <li><a href="https://other.example.org/">Elsewhere</a></li>
              </ul>
            </main>"##,
        ),
    )
    .await;

    mount_page(
        server,
        "/docs/install",
        html_page(
            "Install",
            r#"<main><h1>Install</h1>
            <p>Download the static binary for your platform and place it somewhere on your path.</p>
            <pre><code>curl -fsSL https://example.com/install.sh | sh</code></pre></main>
            <footer>Copyright footer text that should never reach the output file.</footer>"#,
        ),
    )
    .await;

    mount_page(
        server,
        "/docs/config",
        html_page(
            "Configuration",
            r#"<main><h1>Configuration</h1>
            <p>The server reads its configuration file from the current working directory at startup.</p></main>"#,
        ),
    )
    .await;
}
