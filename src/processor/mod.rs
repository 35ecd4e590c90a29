//! Content processor module
//!
//! This module turns fetched documents into embedded, index-ready chunks:
//! it splits each document at natural text boundaries, drops blank chunks,
//! and generates an embedding per surviving chunk through the injected
//! embedding model.

mod chunking;
mod config;
mod error;

pub use chunking::{TextChunk, chunk_text, split_text};
pub use config::{ChunkOptions, ProcessorConfig, ProcessorConfigBuilder};
pub use error::ProcessError;

use crate::fetcher::Document;
use crate::model::Client;
use rig::{
    completion::CompletionModel,
    embeddings::{Embedding, EmbeddingModel},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Represents a processed chunk with its embedding and provenance
#[derive(Debug, Clone)]
pub struct ProcessedChunk {
    /// The text of the chunk
    pub text: String,

    /// The embedding of the chunk
    pub embedding: Embedding,

    /// Metadata for the chunk
    pub metadata: ChunkMetadata,
}

/// Metadata for a processed chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// The source URL of the chunk
    pub source_url: String,

    /// The title of the source article, if one was extracted
    pub title: Option<String>,

    /// The position of the chunk in the original document
    pub position: usize,
}

/// Split documents into chunks and embed every chunk.
///
/// Chunks that contain only whitespace are dropped. If nothing survives
/// splitting, the corpus is empty and no embedding call is made.
///
/// # Arguments
///
/// * `client` - The model client used for embedding
/// * `documents` - The fetched documents to process
/// * `config` - The processor configuration
///
/// # Returns
///
/// A vector of processed chunks, in source order
#[instrument(skip(client, documents, config), fields(documents = documents.len()))]
pub async fn process_documents<C, E>(
    client: &Client<C, E>,
    documents: &[Document],
    config: &ProcessorConfig,
) -> Result<Vec<ProcessedChunk>, ProcessError>
where
    C: CompletionModel,
    E: EmbeddingModel,
{
    let mut texts = Vec::new();
    let mut metadata = Vec::new();

    for document in documents {
        let chunks = chunk_text(&document.text, &config.chunk_options);
        debug!(
            "Split {} into {} chunks",
            document.metadata.source_url,
            chunks.len()
        );

        for chunk in chunks {
            if chunk.text.trim().is_empty() {
                continue;
            }
            metadata.push(ChunkMetadata {
                source_url: document.metadata.source_url.clone(),
                title: document.metadata.title.clone(),
                position: chunk.position,
            });
            texts.push(chunk.text);
        }
    }

    if texts.is_empty() {
        return Err(ProcessError::EmptyCorpus);
    }

    info!("Embedding {} chunks", texts.len());
    let embeddings = embed_in_batches(client, &texts).await?;
    if embeddings.len() != texts.len() {
        return Err(ProcessError::EmbeddingGeneration(format!(
            "model returned {} embeddings for {} chunks",
            embeddings.len(),
            texts.len()
        )));
    }

    Ok(texts
        .into_iter()
        .zip(metadata)
        .zip(embeddings)
        .map(|((text, metadata), embedding)| ProcessedChunk {
            text,
            embedding,
            metadata,
        })
        .collect())
}

/// Embed chunk texts, respecting the model's per-request document limit.
async fn embed_in_batches<C, E>(
    client: &Client<C, E>,
    texts: &[String],
) -> Result<Vec<Embedding>, ProcessError>
where
    C: CompletionModel,
    E: EmbeddingModel,
{
    let batch_size = E::MAX_DOCUMENTS.max(1);
    let mut embeddings = Vec::with_capacity(texts.len());
    for batch in texts.chunks(batch_size) {
        let batch_embeddings = client
            .embedding()
            .embed_texts(batch.to_vec())
            .await
            .map_err(|e| ProcessError::EmbeddingGeneration(e.to_string()))?;
        embeddings.extend(batch_embeddings);
    }
    Ok(embeddings)
}
