//! # Processor Configuration Module
//!
//! Configuration for the content processor stage of the pipeline. The knobs
//! here control how documents are cut into retrieval units before embedding:
//! the maximum chunk size and an optional cap on raw document length applied
//! before splitting.

/// Configuration for chunking text
#[derive(Debug, Clone)]
pub struct ChunkOptions {
    /// Maximum size of each chunk in characters
    pub max_chunk_size: usize,

    /// Cap on raw document length in characters, applied before splitting.
    /// `None` disables the cap.
    pub max_document_length: Option<usize>,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            max_chunk_size: 1000,
            max_document_length: Some(10_000),
        }
    }
}

/// Configuration for the processor
#[derive(Debug, Clone, Default)]
pub struct ProcessorConfig {
    /// Options for chunking
    pub chunk_options: ChunkOptions,
}

/// Builder for ProcessorConfig
#[derive(Debug, Default)]
pub struct ProcessorConfigBuilder {
    config: ProcessorConfig,
}

impl ProcessorConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ProcessorConfig::default(),
        }
    }

    /// Set the chunk options
    pub fn chunk_options(mut self, chunk_options: ChunkOptions) -> Self {
        self.config.chunk_options = chunk_options;
        self
    }

    /// Set the maximum chunk size in characters
    pub fn max_chunk_size(mut self, max_chunk_size: usize) -> Self {
        self.config.chunk_options.max_chunk_size = max_chunk_size;
        self
    }

    /// Set the raw document length cap in characters
    pub fn max_document_length(mut self, max_document_length: Option<usize>) -> Self {
        self.config.chunk_options.max_document_length = max_document_length;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ProcessorConfig {
        self.config
    }
}

impl ProcessorConfig {
    /// Create a new builder
    pub fn builder() -> ProcessorConfigBuilder {
        ProcessorConfigBuilder::new()
    }
}
