//! Error types for the newsdesk crate

use thiserror::Error;

/// Result type for newsdesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for newsdesk operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed URL, rejected before any network call
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Article fetching or extraction error
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Content processing error
    #[error("Process error: {0}")]
    Process(String),

    /// Vector index error
    #[error("Index error: {0}")]
    Index(String),

    /// Search or answer generation error
    #[error("Search error: {0}")]
    Search(String),
}
