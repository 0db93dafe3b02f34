//! URL handling module for Omni-Crawler
//!
//! This module provides seed validation, host extraction and the prefix-based
//! link filter that decides which pages belong to a documentation crawl.

mod discovery;
mod domain;

// Re-export main functions
pub use discovery::discover_urls;
pub use domain::{extract_domain, header_domain};

use crate::{UrlError, UrlResult};
use url::Url;

/// Validates that a seed URL is an absolute HTTP(S) URL with a host
///
/// The seed string itself is kept verbatim by the crawler (it is used as a
/// prefix for link discovery), so this only checks it and never rewrites it.
/// Surrounding whitespace is stripped earlier, by `CrawlRequest::new`.
///
/// # Examples
///
/// ```
/// use omni_crawler::url::validate_seed;
///
/// assert!(validate_seed("https://example.com/docs/").is_ok());
/// assert!(validate_seed("ftp://example.com/").is_err());
/// assert!(validate_seed("example.com/docs").is_err());
/// ```
pub fn validate_seed(seed: &str) -> UrlResult<Url> {
    let url = Url::parse(seed).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    Ok(url)
}
