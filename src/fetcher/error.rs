//! Error types for the fetcher module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for fetcher operations
#[derive(Debug, Error)]
pub enum FetchError {
    /// Malformed URL, rejected before any network call
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("request for {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// No extraction strategy produced content
    #[error("content extraction failed: {0}")]
    Extraction(String),
}

impl From<FetchError> for CrateError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Http(e) => CrateError::Http(e),
            FetchError::InvalidUrl(url) => CrateError::InvalidUrl(url),
            _ => CrateError::Fetch(err.to_string()),
        }
    }
}
