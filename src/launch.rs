//! Entry-point selection
//!
//! The binary either crawls once from the terminal or serves the web GUI.
//! The GUI runs in the same process; nothing is relaunched.

/// Interface chosen at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchMode {
    /// Crawl the given URL from the terminal
    Cli { url: String },
    /// Serve the web form
    Gui,
}

/// Chooses the interface from the command line arguments
///
/// The GUI is used when it is requested explicitly or when no URL was given.
///
/// # Examples
///
/// ```
/// use omni_crawler::{select_mode, LaunchMode};
///
/// assert_eq!(select_mode(None, false), LaunchMode::Gui);
/// assert_eq!(
///     select_mode(Some("https://example.com/docs/"), false),
///     LaunchMode::Cli { url: "https://example.com/docs/".to_string() }
/// );
/// ```
pub fn select_mode(url: Option<&str>, gui: bool) -> LaunchMode {
    match url {
        Some(url) if !gui && !url.trim().is_empty() => LaunchMode::Cli {
            url: url.to_string(),
        },
        _ => LaunchMode::Gui,
    }
}

/// Process exit status of a terminal crawl
///
/// 0 when the output file was written, 1 when the index page could not be
/// fetched or the crawl returned an error.
pub fn crawl_exit_status(outcome: &crate::Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) | Err(_) => 1,
    }
}
