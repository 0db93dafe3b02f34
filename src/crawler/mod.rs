//! Crawler module for page fetching and crawl orchestration
//!
//! This module contains the core crawling logic, including:
//! - The page fetching capability and its HTTP implementation
//! - HTML parsing and link extraction
//! - The two-phase crawl (index page, then every discovered page)

mod coordinator;
mod fetcher;
mod parser;
mod user_agent;

pub use coordinator::{run_crawl, Coordinator, CrawlRequest};
pub use fetcher::{build_http_client, HttpFetcher, Link, Links, PageFetchResult, PageFetcher};
pub use parser::{parse_html, ParsedPage};
pub use user_agent::random_user_agent;
