//! Resume tailoring: job listing retrieval, prompt construction and the
//! chat-completions call that rewrites the resume for a role.

pub mod files;
pub mod job;
pub mod llm;
pub mod prompt;

#[cfg(test)]
pub(crate) mod testing;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the tailoring stage.
#[derive(Debug, Error)]
pub enum TailorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch URL {url}. Status code: {status}")]
    Fetch { url: String, status: u16 },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned empty content")]
    EmptyContent,

    #[error("no API key: set OPENAI_API_KEY or pass --api-key")]
    MissingApiKey,

    #[error("cannot read settings file {}: {source}", .path.display())]
    Settings { path: PathBuf, source: io::Error },

    #[error("cannot back up {}: {source}", .path.display())]
    Backup { path: PathBuf, source: io::Error },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Convert(#[from] mdocx::Error),
}
