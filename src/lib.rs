//! Omni-Crawler: a documentation harvester
//!
//! This crate fetches a documentation index page, discovers the pages that live
//! under it, converts each one to cleaned markdown and concatenates everything
//! into a single file. It can be driven from the command line or from a small
//! local web GUI.

pub mod config;
pub mod crawler;
pub mod gui;
pub mod launch;
pub mod markdown;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Omni-Crawler operations
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("GUI server error: {0}")]
    Gui(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),
}

/// Result type alias for Omni-Crawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Coordinator, CrawlRequest, HttpFetcher, PageFetcher};
pub use launch::{crawl_exit_status, select_mode, LaunchMode};
pub use output::{ProgressEvent, ProgressSink, Severity};
