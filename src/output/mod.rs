//! Output module
//!
//! This module handles:
//! - Writing the consolidated markdown document
//! - Reporting crawl progress to the console or the GUI

mod document;
mod progress;

pub use document::{format_header, format_section, OutputDocument, OutputError, OutputResult};
pub use progress::{ConsoleSink, ProgressEvent, ProgressSink, Severity};
