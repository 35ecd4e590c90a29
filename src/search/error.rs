//! Error types for the search module

use crate::error::Error as CrateError;
use crate::index::IndexError;
use thiserror::Error;

/// Errors that can occur while answering a question
#[derive(Debug, Error)]
pub enum SearchError {
    /// Error from the vector index
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    /// Error while embedding the question
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Error from the completion call; surfaced verbatim, not retried
    #[error("Completion error: {0}")]
    Completion(String),

    /// Invalid search parameters
    #[error("Invalid search parameters: {0}")]
    InvalidParameters(String),
}

impl From<SearchError> for CrateError {
    fn from(err: SearchError) -> Self {
        CrateError::Search(err.to_string())
    }
}
