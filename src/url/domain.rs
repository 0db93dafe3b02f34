use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// It is used to split discovered links into internal and external ones.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use omni_crawler::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the domain shown in the output document header
///
/// This is the text after the scheme separator (`//`) up to the next `/`,
/// taken verbatim: ports and letter case are preserved.
///
/// # Examples
///
/// ```
/// use omni_crawler::url::header_domain;
///
/// assert_eq!(header_domain("https://caddyserver.com/docs/"), "caddyserver.com");
/// assert_eq!(header_domain("http://127.0.0.1:9000"), "127.0.0.1:9000");
/// ```
pub fn header_domain(seed: &str) -> &str {
    let after_scheme = match seed.split_once("//") {
        Some((_, rest)) => rest,
        None => seed,
    };

    after_scheme.split('/').next().unwrap_or(after_scheme)
}
