use std::collections::BTreeSet;

/// Builds the set of pages to download from the index page's internal links
///
/// # Inclusion Rules
///
/// - The seed itself is always included
/// - An href is kept only if it starts with the exact seed string
/// - An href containing `#` is dropped, even when the part before the
///   fragment would be a new page
///
/// Matching is a plain string prefix test. No normalization happens, so
/// `https://example.com/docs/a` and `https://example.com/docs/a/` are two
/// different pages, and a same-host link outside the seed path is ignored.
///
/// # Examples
///
/// ```
/// use omni_crawler::url::discover_urls;
///
/// let found = discover_urls(
///     "https://example.com/docs/",
///     ["https://example.com/docs/intro", "https://example.com/docs/intro#setup"],
/// );
/// assert_eq!(found.len(), 2);
/// ```
pub fn discover_urls<'a, I>(seed: &str, hrefs: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut urls = BTreeSet::new();
    urls.insert(seed.to_string());

    for href in hrefs {
        if href.starts_with(seed) && !href.contains('#') {
            urls.insert(href.to_string());
        }
    }

    urls
}
