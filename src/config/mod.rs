//! Configuration module for Omni-Crawler
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Without a file the built-in defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use omni_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("omni-crawler.toml")).unwrap();
//! println!("Page timeout: {}ms", config.fetch.page_timeout_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetchConfig, FilterConfig, GuiConfig, ThresholdType};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
