use crate::markdown::filter::PruningContentFilter;
use serde::Serialize;

/// Markdown produced for one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkdownResult {
    /// The whole document converted to markdown
    pub raw_markdown: String,

    /// Markdown of the content that survived the pruning filter
    pub fit_markdown: String,
}

/// Converts HTML to markdown, with and without content filtering
#[derive(Debug, Clone, Default)]
pub struct DefaultMarkdownGenerator {
    content_filter: Option<PruningContentFilter>,
}

impl DefaultMarkdownGenerator {
    /// Creates a generator whose fit markdown goes through `content_filter`
    pub fn new(content_filter: PruningContentFilter) -> Self {
        Self {
            content_filter: Some(content_filter),
        }
    }

    /// Creates a generator without a content filter; fit markdown equals raw markdown
    pub fn unfiltered() -> Self {
        Self {
            content_filter: None,
        }
    }

    /// Generates both markdown variants for an HTML document
    ///
    /// # Example
    ///
    /// ```
    /// use omni_crawler::markdown::{DefaultMarkdownGenerator, PruningContentFilter};
    ///
    /// let generator = DefaultMarkdownGenerator::new(PruningContentFilter::default());
    /// let result = generator.generate(
    ///     "<body><footer>Imprint</footer><p>Routes are matched in the order they are defined.</p></body>",
    /// );
    /// assert!(result.raw_markdown.contains("Imprint"));
    /// assert!(!result.fit_markdown.contains("Imprint"));
    /// assert!(result.fit_markdown.contains("Routes are matched"));
    /// ```
    pub fn generate(&self, html: &str) -> MarkdownResult {
        let raw_markdown = tidy(&html2md::parse_html(html));

        let fit_markdown = match &self.content_filter {
            Some(filter) => tidy(&html2md::parse_html(&filter.filter(html))),
            None => raw_markdown.clone(),
        };

        MarkdownResult {
            raw_markdown,
            fit_markdown,
        }
    }
}

/// Trims trailing whitespace on every line and collapses runs of blank lines
fn tidy(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut blank_run = 0;

    for line in markdown.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    out.trim().to_string()
}
