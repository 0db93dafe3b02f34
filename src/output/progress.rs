//! Progress reporting
//!
//! A crawl reports what it is doing through a `ProgressSink`. The same events
//! drive the console in CLI mode and the log region of the web GUI.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Something that happened during a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Crawl started for a seed URL
    Started { url: String },

    /// Fetching the index page
    ScanningIndex,

    /// The index page could not be fetched; the run stops
    IndexFailed { message: String },

    /// Link discovery finished
    PagesDiscovered { count: usize },

    /// Writing the output file
    Consolidating,

    /// One page could not be fetched; it is left out of the output
    PageFailed { url: String },

    /// Output file written
    Finished { path: PathBuf },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started { url } => write!(f, "🚀 Iniciando misión en: {}", url),
            Self::ScanningIndex => write!(f, "🔍 Escaneando índice..."),
            Self::IndexFailed { message } => write!(f, "❌ Error crítico: {}", message),
            Self::PagesDiscovered { count } => write!(
                f,
                "✅ Encontradas {} páginas. Descargando con pausas de seguridad...",
                count
            ),
            Self::Consolidating => write!(f, "💾 Consolidando archivo..."),
            Self::PageFailed { url } => write!(f, "⚠️ Falló página: {}", url),
            Self::Finished { path } => {
                write!(f, "🎉 ¡Éxito! Archivo guardado: {}", path.display())
            }
        }
    }
}

/// Visual severity of a progress message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Success,
    Celebrate,
    Warning,
    Info,
}

impl Severity {
    /// Picks a severity from the marker symbol embedded in a message
    ///
    /// # Examples
    ///
    /// ```
    /// use omni_crawler::Severity;
    ///
    /// assert_eq!(Severity::classify("❌ Error crítico: timeout"), Severity::Error);
    /// assert_eq!(Severity::classify("💾 Consolidando archivo..."), Severity::Info);
    /// ```
    pub fn classify(message: &str) -> Self {
        if message.contains('❌') {
            Self::Error
        } else if message.contains('✅') {
            Self::Success
        } else if message.contains('🎉') {
            Self::Celebrate
        } else if message.contains('⚠') {
            Self::Warning
        } else {
            Self::Info
        }
    }

    /// CSS class used by the GUI log region
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Error => "log-error",
            Self::Success => "log-success",
            Self::Celebrate => "log-celebrate",
            Self::Warning => "log-warning",
            Self::Info => "log-info",
        }
    }
}

/// Receiver of crawl progress
pub trait ProgressSink: Send + Sync {
    fn report(&self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn report(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Prints every event to standard output
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn report(&self, event: &ProgressEvent) {
        println!("{}", event);
    }
}
