use serde::Deserialize;

/// Main configuration structure for Omni-Crawler
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub filter: FilterConfig,
    pub gui: GuiConfig,
}

/// Page fetching behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetchConfig {
    /// Per-page timeout (milliseconds)
    pub page_timeout_ms: u64,

    /// Pause after a page is loaded, before its content is captured (milliseconds)
    pub delay_before_capture_ms: u64,

    /// Pick a random browser user agent for every request
    pub randomize_user_agent: bool,

    /// User agent used when randomization is off
    pub user_agent: String,

    /// Send a `Referer` header pretending to come from a search engine
    pub spoof_referer: bool,

    /// Referer value sent when `spoof_referer` is on
    pub referer: String,

    /// `Accept-Language` header value
    pub accept_language: String,

    /// `Accept` header value
    pub accept: String,

    /// Maximum number of pages fetched at once during the bulk phase
    pub max_concurrent_fetches: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_timeout_ms: 60_000,
            delay_before_capture_ms: 2_000,
            randomize_user_agent: true,
            user_agent: format!("omni-crawler/{}", env!("CARGO_PKG_VERSION")),
            spoof_referer: true,
            referer: "https://www.google.com/".to_string(),
            accept_language: "en-US,en;q=0.9,es;q=0.8".to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            max_concurrent_fetches: 5,
        }
    }
}

/// How the pruning threshold is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThresholdType {
    /// Same threshold for every block
    Fixed,
    /// Threshold adjusted per block from its tag and densities
    Dynamic,
}

/// Content pruning filter settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FilterConfig {
    /// Minimum relevance score (0.0 - 1.0) a block needs to be kept
    pub threshold: f64,

    pub threshold_type: ThresholdType,

    /// Blocks with fewer words than this are dropped
    pub min_word_threshold: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            threshold: 0.48,
            threshold_type: ThresholdType::Dynamic,
            min_word_threshold: 5,
        }
    }
}

/// Web GUI settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GuiConfig {
    /// Socket address the GUI server listens on
    pub bind: String,

    /// Directory where GUI crawls write their output files
    pub output_dir: String,

    /// File name pre-filled in the form
    pub default_filename: String,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".to_string(),
            output_dir: ".".to_string(),
            default_filename: "docs.md".to_string(),
        }
    }
}
