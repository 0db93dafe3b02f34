//! Markdown generation module
//!
//! This module turns fetched HTML into markdown:
//! - `PruningContentFilter` strips boilerplate and keeps the primary content
//! - `DefaultMarkdownGenerator` produces the raw and the filtered ("fit") markdown

mod filter;
mod generator;

pub use filter::PruningContentFilter;
pub use generator::{DefaultMarkdownGenerator, MarkdownResult};
