//! Error types shared across crates

use thiserror::Error;

/// Result alias using the core error type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse {format} document: {message}")]
    Parse { format: String, message: String },

    #[error("Span {start}..{end} is outside text of {len} characters")]
    InvalidSpan { start: usize, end: usize, len: usize },
}
