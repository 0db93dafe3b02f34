//! Page fetching
//!
//! This module defines the fetch capability the crawler depends on and its
//! HTTP implementation:
//! - `PageFetcher`: single and bulk page fetches
//! - `HttpFetcher`: reqwest client with randomized user agents, a fixed
//!   header set and an optional pause before content is captured
//! - Error classification into human-readable failure messages

use crate::config::{Config, FetchConfig};
use crate::crawler::parser::parse_html;
use crate::crawler::user_agent::random_user_agent;
use crate::markdown::{DefaultMarkdownGenerator, MarkdownResult, PruningContentFilter};
use crate::{ConfigError, CrawlerError};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT};
use reqwest::{redirect::Policy, Client};
use serde::Serialize;
use std::time::Duration;

/// A hyperlink found on a fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Absolute URL the link points to
    pub href: String,

    /// Visible link text, whitespace collapsed
    pub text: String,
}

/// Links of a page, split by whether they stay on the page's host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Links {
    pub internal: Vec<Link>,
    pub external: Vec<Link>,
}

/// Result of fetching one page
#[derive(Debug, Clone, Default, Serialize)]
pub struct PageFetchResult {
    /// The URL that was requested
    pub url: String,

    /// Whether the page was fetched and converted
    pub success: bool,

    /// HTTP status code, when a response was received
    pub status_code: Option<u16>,

    /// Final URL when the request was redirected
    pub redirected_url: Option<String>,

    /// Why the fetch failed
    pub error_message: Option<String>,

    /// Page title (from <title>)
    pub title: Option<String>,

    pub links: Links,

    /// Markdown conversion of the page, present on success
    pub markdown: Option<MarkdownResult>,
}

impl PageFetchResult {
    /// Builds a failed result for `url`
    pub fn failure(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            success: false,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    /// The filtered markdown body, if the page was converted
    pub fn fit_markdown(&self) -> Option<&str> {
        self.markdown.as_ref().map(|m| m.fit_markdown.as_str())
    }
}

/// Capability to fetch pages and convert them to markdown
///
/// Failures are reported inside `PageFetchResult` rather than as errors: a
/// page that cannot be fetched is an expected outcome of a crawl.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches a single page
    async fn fetch(&self, url: &str) -> PageFetchResult;

    /// Fetches many pages
    ///
    /// Results may come back in any order. The default implementation
    /// fetches one page after the other.
    async fn fetch_many(&self, urls: &[String]) -> Vec<PageFetchResult> {
        let mut results = Vec::with_capacity(urls.len());
        for url in urls {
            results.push(self.fetch(url).await);
        }
        results
    }
}

/// Builds an HTTP client with the configured header set
///
/// The client never caches responses and follows at most 10 redirects.
/// When user agent randomization is on, the user agent is set per request
/// instead of on the client.
///
/// # Example
///
/// ```
/// use omni_crawler::config::FetchConfig;
/// use omni_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, CrawlerError> {
    let mut headers = HeaderMap::new();
    insert_header(&mut headers, ACCEPT, &config.accept)?;
    insert_header(&mut headers, ACCEPT_LANGUAGE, &config.accept_language)?;
    if config.spoof_referer {
        insert_header(&mut headers, REFERER, &config.referer)?;
    }

    let timeout = Duration::from_millis(config.page_timeout_ms);

    let mut builder = Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true);

    if !config.randomize_user_agent {
        builder = builder.user_agent(config.user_agent.clone());
    }

    Ok(builder.build()?)
}

fn insert_header(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<(), CrawlerError> {
    let value = HeaderValue::from_str(value).map_err(|e| {
        ConfigError::Validation(format!("Invalid value for header {}: {}", name, e))
    })?;
    headers.insert(name, value);
    Ok(())
}

/// Page fetcher backed by plain HTTP requests
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
    generator: DefaultMarkdownGenerator,
}

impl HttpFetcher {
    /// Creates a fetcher from the fetch and filter sections of the configuration
    pub fn new(config: &Config) -> Result<Self, CrawlerError> {
        let client = build_http_client(&config.fetch)?;
        let generator = DefaultMarkdownGenerator::new(PruningContentFilter::new(&config.filter));

        Ok(Self {
            client,
            config: config.fetch.clone(),
            generator,
        })
    }

    fn capture_delay(&self) -> Option<Duration> {
        match self.config.delay_before_capture_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    fn classify_error(&self, error: &reqwest::Error) -> String {
        if error.is_timeout() {
            format!("Request timeout after {}ms", self.config.page_timeout_ms)
        } else if error.is_connect() {
            format!("Connection failed: {}", error)
        } else if error.is_redirect() {
            format!("Too many redirects: {}", error)
        } else {
            error.to_string()
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    /// Fetches a page over HTTP
    ///
    /// # Request Flow
    ///
    /// 1. GET the URL (random user agent when enabled)
    /// 2. Non-2xx status → failure
    /// 3. Content-Type present and not HTML → failure
    /// 4. Read the body, then wait the capture delay
    /// 5. Extract title and links, generate markdown
    async fn fetch(&self, url: &str) -> PageFetchResult {
        tracing::debug!("Fetching {}", url);

        let mut request = self.client.get(url);
        if self.config.randomize_user_agent {
            request = request.header(USER_AGENT, random_user_agent());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return PageFetchResult::failure(url, self.classify_error(&e)),
        };

        let status = response.status();
        let final_url = response.url().clone();

        if !status.is_success() {
            return PageFetchResult {
                status_code: Some(status.as_u16()),
                ..PageFetchResult::failure(url, format!("HTTP {}", status))
            };
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.is_empty()
            && !content_type.contains("text/html")
            && !content_type.contains("application/xhtml")
        {
            return PageFetchResult {
                status_code: Some(status.as_u16()),
                ..PageFetchResult::failure(url, format!("Expected HTML, got {}", content_type))
            };
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return PageFetchResult::failure(url, self.classify_error(&e)),
        };

        if let Some(delay) = self.capture_delay() {
            tokio::time::sleep(delay).await;
        }

        let parsed = parse_html(&body, &final_url);
        let markdown = self.generator.generate(&body);

        let redirected_url = if final_url.as_str() != url {
            Some(final_url.to_string())
        } else {
            None
        };

        PageFetchResult {
            url: url.to_string(),
            success: true,
            status_code: Some(status.as_u16()),
            redirected_url,
            error_message: None,
            title: parsed.title,
            links: parsed.links,
            markdown: Some(markdown),
        }
    }

    /// Fetches pages concurrently, up to `max_concurrent_fetches` at a time
    ///
    /// Results are returned in completion order.
    async fn fetch_many(&self, urls: &[String]) -> Vec<PageFetchResult> {
        let fetches: Vec<_> = urls.iter().map(|url| self.fetch(url)).collect();
        stream::iter(fetches)
            .buffer_unordered(self.config.max_concurrent_fetches.max(1))
            .collect()
            .await
    }
}
