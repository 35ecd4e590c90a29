//! Error types for the index module

use crate::error::Error as CrateError;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for vector index operations
#[derive(Debug, Error)]
pub enum IndexError {
    /// The parallel sequences are not index-aligned
    #[error(
        "parallel arrays out of alignment: {vectors} vectors, {texts} texts, {metadata} metadata entries"
    )]
    LengthMismatch {
        vectors: usize,
        texts: usize,
        metadata: usize,
    },

    /// A vector does not match the index dimension
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Search over an index with no entries
    #[error("the index holds no entries")]
    EmptyIndex,

    /// Search limit below 1
    #[error("search limit must be at least 1")]
    InvalidLimit,

    /// No store file at the given path
    #[error("no index found at {0}")]
    NotFound(PathBuf),

    /// The store file could not be reconstructed into a valid index
    #[error("corrupt index: {0}")]
    Corrupt(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<IndexError> for CrateError {
    fn from(err: IndexError) -> Self {
        match err {
            IndexError::Io(e) => CrateError::Io(e),
            IndexError::Serialization(e) => CrateError::Json(e),
            _ => CrateError::Index(err.to_string()),
        }
    }
}
