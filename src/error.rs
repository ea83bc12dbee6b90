//! Error types for rendering and writing documents.
//!
//! Parsing never fails; only the renderers' output boundaries do.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    /// The output sink could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The Word package could not be assembled into the sink.
    #[error("failed to pack DOCX: {0}")]
    Docx(String),

    /// Typst compilation or PDF export failed.
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
