//! Pruning content filter
//!
//! Strips navigation, boilerplate and low-value blocks from an HTML document
//! and returns the remaining body as HTML.
//!
//! # Scoring
//!
//! Leaf blocks are scored from five metrics:
//!
//! | Metric | Weight | Value |
//! |--------|--------|-------|
//! | Text density | 0.4 | text length / serialized length |
//! | Link density | 0.2 | 1 - link text length / text length |
//! | Tag weight | 0.2 | per-tag constant (see `tag_weight`) |
//! | Class/id weight | 0.1 | -0.5 for each boilerplate-looking class or id |
//! | Text length | 0.1 | ln(text length + 1), saturating at 1000 characters |
//!
//! Only leaf blocks (blocks without nested blocks) are scored; a container
//! survives as long as its class and id look like content, and its children
//! are judged one by one. A leaf whose score is below the threshold is
//! dropped. With a dynamic threshold the cut-off is lowered for important
//! tags and dense text, and raised for link-heavy blocks.

use crate::config::{FilterConfig, ThresholdType};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

/// Tags removed unconditionally, together with their content
const UNWANTED_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "form", "iframe", "noscript", "svg",
    "button", "input", "select", "textarea", "template", "object", "embed",
];

/// Tags that are scored as content blocks
const BLOCK_TAGS: &[&str] = &[
    "div", "section", "article", "main", "p", "ul", "ol", "li", "dl", "dd", "dt", "blockquote",
    "figure", "details", "summary", "center",
];

/// Tags that are never pruned and that protect their ancestors from the word count check
const PROTECTED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "pre", "code", "table", "img",
];

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "hr", "img", "link", "meta", "source", "track", "wbr",
];

/// Attributes carried over to the filtered HTML
const KEPT_ATTRIBUTES: &[&str] = &["href", "src", "alt", "title", "colspan", "rowspan"];

/// Class/id fragments that usually mark boilerplate
const NEGATIVE_PATTERNS: &[&str] = &[
    "nav", "footer", "header", "sidebar", "menu", "breadcrumb", "banner", "cookie", "comment",
    "promo", "advert", "ads", "social", "share", "related", "popup", "newsletter",
];

const WEIGHT_TEXT_DENSITY: f64 = 0.4;
const WEIGHT_LINK_DENSITY: f64 = 0.2;
const WEIGHT_TAG: f64 = 0.2;
const WEIGHT_CLASS_ID: f64 = 0.1;
const WEIGHT_TEXT_LENGTH: f64 = 0.1;

const TEXT_LENGTH_SATURATION: f64 = 1000.0;

/// Measurements taken from one block element
#[derive(Debug, Clone, Copy)]
struct BlockMetrics {
    text_len: usize,
    tag_len: usize,
    link_text_len: usize,
    word_count: usize,
}

impl BlockMetrics {
    fn measure(element: ElementRef<'_>) -> Self {
        let text: String = element.text().collect();
        let text = text.trim();

        let link_text_len = match Selector::parse("a") {
            Ok(selector) => element
                .select(&selector)
                .map(|a| a.text().map(|t| t.trim().chars().count()).sum::<usize>())
                .sum(),
            Err(_) => 0,
        };

        Self {
            text_len: text.chars().count(),
            tag_len: element.html().len().max(1),
            link_text_len,
            word_count: text.split_whitespace().count(),
        }
    }

    fn text_density(&self) -> f64 {
        self.text_len as f64 / self.tag_len as f64
    }

    fn length_score(&self) -> f64 {
        ((self.text_len as f64 + 1.0).ln() / (TEXT_LENGTH_SATURATION + 1.0).ln()).min(1.0)
    }

    /// Fraction of the text that sits inside links
    fn link_ratio(&self) -> f64 {
        if self.text_len == 0 {
            return 0.0;
        }
        (self.link_text_len as f64 / self.text_len as f64).min(1.0)
    }
}

/// Content filter that keeps the primary content of a page
#[derive(Debug, Clone)]
pub struct PruningContentFilter {
    threshold: f64,
    threshold_type: ThresholdType,
    min_word_threshold: usize,
}

impl Default for PruningContentFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}

impl PruningContentFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            threshold: config.threshold,
            threshold_type: config.threshold_type,
            min_word_threshold: config.min_word_threshold,
        }
    }

    /// Filters an HTML document and returns the surviving body content as HTML
    ///
    /// # Example
    ///
    /// ```
    /// use omni_crawler::markdown::PruningContentFilter;
    ///
    /// let html = r#"<html><body>
    ///     <nav><a href="/">Home</a></nav>
    ///     <p>Caddy is a powerful, extensible platform to serve your sites.</p>
    /// </body></html>"#;
    ///
    /// let filtered = PruningContentFilter::default().filter(html);
    /// assert!(filtered.contains("extensible platform"));
    /// assert!(!filtered.contains("Home"));
    /// ```
    pub fn filter(&self, html: &str) -> String {
        let document = Html::parse_document(html);

        let body = Selector::parse("body")
            .ok()
            .and_then(|selector| document.select(&selector).next())
            .unwrap_or_else(|| document.root_element());

        let mut out = String::with_capacity(html.len() / 2);
        self.render_children(body, &mut out);
        out
    }

    fn render_children(&self, element: ElementRef<'_>, out: &mut String) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => push_escaped(out, text),
                Node::Element(_) => {
                    if let Some(child_element) = ElementRef::wrap(child) {
                        self.render_element(child_element, out);
                    }
                }
                _ => {}
            }
        }
    }

    fn render_element(&self, element: ElementRef<'_>, out: &mut String) {
        let name = element.value().name();

        if UNWANTED_TAGS.contains(&name) || self.should_remove(element) {
            return;
        }

        out.push('<');
        out.push_str(name);
        for (attr, value) in element.value().attrs() {
            let keep = KEPT_ATTRIBUTES.contains(&attr)
                || (attr == "class" && (name == "pre" || name == "code"));
            if keep {
                out.push(' ');
                out.push_str(attr);
                out.push_str("=\"");
                push_escaped(out, value);
                out.push('"');
            }
        }
        out.push('>');

        if VOID_TAGS.contains(&name) {
            return;
        }

        self.render_children(element, out);

        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }

    /// Decides whether a block element (and its subtree) is dropped
    fn should_remove(&self, element: ElementRef<'_>) -> bool {
        let name = element.value().name();
        if !BLOCK_TAGS.contains(&name) {
            return false;
        }

        let protected = has_protected_descendant(element);

        if has_block_descendant(element) {
            return !protected && class_id_weight(element) < 0.0;
        }

        let metrics = BlockMetrics::measure(element);

        if !protected && metrics.word_count < self.min_word_threshold {
            return true;
        }

        if protected && metrics.text_len == 0 {
            return false;
        }

        self.score(element, &metrics) < self.threshold_for(name, &metrics)
    }

    fn score(&self, element: ElementRef<'_>, metrics: &BlockMetrics) -> f64 {
        let name = element.value().name();

        let score = WEIGHT_TEXT_DENSITY * metrics.text_density()
            + WEIGHT_LINK_DENSITY * (1.0 - metrics.link_ratio())
            + WEIGHT_TAG * tag_weight(name)
            + WEIGHT_CLASS_ID * class_id_weight(element)
            + WEIGHT_TEXT_LENGTH * metrics.length_score();

        score
            / (WEIGHT_TEXT_DENSITY
                + WEIGHT_LINK_DENSITY
                + WEIGHT_TAG
                + WEIGHT_CLASS_ID
                + WEIGHT_TEXT_LENGTH)
    }

    fn threshold_for(&self, name: &str, metrics: &BlockMetrics) -> f64 {
        match self.threshold_type {
            ThresholdType::Fixed => self.threshold,
            ThresholdType::Dynamic => {
                let mut threshold = self.threshold;

                if tag_weight(name) > 1.0 {
                    threshold *= 0.8;
                }
                if metrics.text_density() > 0.4 {
                    threshold *= 0.9;
                }
                if metrics.link_ratio() > 0.6 {
                    threshold *= 1.2;
                }

                threshold
            }
        }
    }
}

fn tag_weight(name: &str) -> f64 {
    match name {
        "article" => 1.5,
        "main" => 1.4,
        "section" | "p" => 1.2,
        "blockquote" | "details" => 1.0,
        "ul" | "ol" | "dl" | "figure" => 0.8,
        "li" | "dd" | "dt" | "summary" => 0.6,
        _ => 0.5,
    }
}

fn class_id_weight(element: ElementRef<'_>) -> f64 {
    let mut weight = 0.0;

    if let Some(class) = element.value().attr("class") {
        if matches_negative(class) {
            weight -= 0.5;
        }
    }
    if let Some(id) = element.value().attr("id") {
        if matches_negative(id) {
            weight -= 0.5;
        }
    }

    weight
}

fn matches_negative(value: &str) -> bool {
    value
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .any(|token| NEGATIVE_PATTERNS.contains(&token.to_lowercase().as_str()))
}

fn has_block_descendant(element: ElementRef<'_>) -> bool {
    element.descendants().skip(1).any(|node| {
        node.value()
            .as_element()
            .map_or(false, |e| BLOCK_TAGS.contains(&e.name()))
    })
}

fn has_protected_descendant(element: ElementRef<'_>) -> bool {
    element.descendants().any(|node| {
        node.value()
            .as_element()
            .map_or(false, |e| PROTECTED_TAGS.contains(&e.name()))
    })
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
