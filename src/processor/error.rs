//! Error types for the processor module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for processor operations
#[derive(Debug, Error)]
pub enum ProcessError {
    /// No chunk survived fetching and splitting
    #[error("no indexable content survived fetching and splitting")]
    EmptyCorpus,

    /// Embedding generation error
    #[error("Embedding generation error: {0}")]
    EmbeddingGeneration(String),
}

impl From<ProcessError> for CrateError {
    fn from(err: ProcessError) -> Self {
        CrateError::Process(err.to_string())
    }
}
