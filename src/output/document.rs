//! Consolidated markdown document
//!
//! The output file starts with a header naming the documented domain and the
//! generation time, followed by one section per fetched page:
//!
//! ```text
//! # Documentación de example.com
//! Generado el: 2024-05-01 10:30
//!
//!
//!
//! ---
//! ## FUENTE: https://example.com/docs/
//! ---
//!
//! <page markdown>
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing the output document
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Formats the document header
pub fn format_header(domain: &str, generated_at: &str) -> String {
    format!("# Documentación de {}\nGenerado el: {}\n\n", domain, generated_at)
}

/// Formats one page section
pub fn format_section(url: &str, body: &str) -> String {
    format!("\n\n---\n## FUENTE: {}\n---\n\n{}", url, body)
}

/// Output file being written, one section at a time
///
/// Creating the document truncates any existing file at the same path.
#[derive(Debug)]
pub struct OutputDocument {
    path: PathBuf,
    writer: BufWriter<File>,
    sections: usize,
}

impl OutputDocument {
    /// Creates (or truncates) the output file and writes the header
    pub fn create(path: &Path, domain: &str, generated_at: &str) -> OutputResult<Self> {
        let file = File::create(path).map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        let mut document = Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            sections: 0,
        };
        document.write(&format_header(domain, generated_at))?;

        Ok(document)
    }

    /// Appends the section for one page
    pub fn append_section(&mut self, url: &str, body: &str) -> OutputResult<()> {
        self.write(&format_section(url, body))?;
        self.sections += 1;
        Ok(())
    }

    /// Flushes the file and returns the number of sections written
    pub fn finish(mut self) -> OutputResult<usize> {
        self.writer.flush().map_err(|source| OutputError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(self.sections)
    }

    fn write(&mut self, text: &str) -> OutputResult<()> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|source| OutputError::Write {
                path: self.path.clone(),
                source,
            })
    }
}
