//! Error types for mdocx library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mdocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source document does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Structural error in the source text (strict mode only).
    #[error("Markdown parsing error: {0}")]
    Parse(String),

    /// The style theme is invalid or could not be loaded.
    #[error("Invalid theme: {0}")]
    Theme(String),

    /// Error while building the document model.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Error while writing the OOXML package (zip or XML).
    #[error("Package error: {0}")]
    Package(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Package(err.to_string()),
        }
    }
}

impl From<tempfile::PersistError> for Error {
    fn from(err: tempfile::PersistError) -> Self {
        Error::Io(err.error)
    }
}
