//! Crawl coordinator - the two-phase crawl
//!
//! A crawl runs four strictly sequential steps:
//! - Fetch the index (seed) page
//! - Keep the internal links that live under the seed
//! - Fetch every discovered page in bulk
//! - Write all successfully fetched pages into one markdown file

use crate::config::Config;
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::output::{OutputDocument, ProgressEvent, ProgressSink};
use crate::url::{discover_urls, header_domain, validate_seed};
use std::path::PathBuf;

/// One crawl invocation: where to start and where to write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    /// Seed URL, used verbatim as the link discovery prefix
    pub seed_url: String,

    /// File the consolidated markdown is written to
    pub output_path: PathBuf,
}

impl CrawlRequest {
    /// Creates a request; surrounding whitespace is stripped from the seed
    pub fn new(seed_url: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        let seed_url: String = seed_url.into();
        Self {
            seed_url: seed_url.trim().to_string(),
            output_path: output_path.into(),
        }
    }
}

/// Runs crawls through a page fetcher
pub struct Coordinator<F> {
    fetcher: F,
}

impl<F: PageFetcher> Coordinator<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Runs one crawl
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Output file written
    /// * `Ok(false)` - Index page could not be fetched; nothing was written
    /// * `Err(CrawlerError)` - Seed is not an HTTP(S) URL, or the output
    ///   file could not be written
    ///
    /// Pages that fail during the bulk phase are reported through `sink` and
    /// left out of the output; they never fail the run.
    pub async fn run(&self, request: &CrawlRequest, sink: &dyn ProgressSink) -> crate::Result<bool> {
        let seed = request.seed_url.as_str();
        validate_seed(seed)?;

        emit(sink, ProgressEvent::Started { url: seed.to_string() });

        // Index phase
        emit(sink, ProgressEvent::ScanningIndex);
        let index = self.fetcher.fetch(seed).await;

        if !index.success {
            let message = index
                .error_message
                .unwrap_or_else(|| "unknown error".to_string());
            emit(sink, ProgressEvent::IndexFailed { message });
            return Ok(false);
        }

        // Link discovery
        let urls: Vec<String> = discover_urls(
            seed,
            index.links.internal.iter().map(|link| link.href.as_str()),
        )
        .into_iter()
        .collect();

        tracing::debug!("Discovered URLs: {:?}", urls);
        emit(sink, ProgressEvent::PagesDiscovered { count: urls.len() });

        // Bulk fetch
        let results = self.fetcher.fetch_many(&urls).await;

        // Save
        emit(sink, ProgressEvent::Consolidating);

        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
        let mut document =
            OutputDocument::create(&request.output_path, header_domain(seed), &generated_at)?;

        for result in &results {
            if result.success {
                document.append_section(&result.url, result.fit_markdown().unwrap_or(""))?;
            } else {
                tracing::debug!(
                    "Page {} failed: {}",
                    result.url,
                    result.error_message.as_deref().unwrap_or("unknown error")
                );
                emit(sink, ProgressEvent::PageFailed { url: result.url.clone() });
            }
        }

        let sections = document.finish()?;
        tracing::info!(
            "Wrote {} of {} pages to {}",
            sections,
            results.len(),
            request.output_path.display()
        );

        emit(
            sink,
            ProgressEvent::Finished {
                path: request.output_path.clone(),
            },
        );

        Ok(true)
    }
}

/// Hands an event to the sink
///
/// The sink is what the user sees, so the event is only traced at debug level.
fn emit(sink: &dyn ProgressSink, event: ProgressEvent) {
    tracing::debug!("{}", event);
    sink.report(&event);
}

/// Runs a crawl with the HTTP fetcher built from `config`
///
/// # Example
///
/// ```no_run
/// use omni_crawler::config::Config;
/// use omni_crawler::crawler::{run_crawl, CrawlRequest};
/// use omni_crawler::output::ConsoleSink;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let request = CrawlRequest::new("https://caddyserver.com/docs/", "caddy.md");
/// let ok = run_crawl(&Config::default(), &request, &ConsoleSink).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: &Config,
    request: &CrawlRequest,
    sink: &dyn ProgressSink,
) -> crate::Result<bool> {
    let fetcher = HttpFetcher::new(config)?;
    Coordinator::new(fetcher).run(request, sink).await
}
