//! Retrieval and answer generation for the research pipeline

use rig::agent::AgentBuilder;
use rig::completion::{CompletionModel, Prompt};
use rig::embeddings::EmbeddingModel;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::error::SearchError;
use crate::index::{SearchHit, VectorIndex};
use crate::model::{Client, EmbeddingConversion};

/// Marker appended when the assembled context was cut to fit.
pub const TRUNCATION_MARKER: &str = " [truncated]";

/// Options for answering a question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Maximum number of passages to retrieve
    pub limit: usize,

    /// Maximum context length in characters handed to the completion call
    pub max_context_length: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 5,
            max_context_length: 2000,
        }
    }
}

/// An answer with the passages it was generated from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagAnswer {
    /// The generated answer text
    pub answer: String,

    /// The retrieved passages, nearest first
    pub sources: Vec<SearchHit>,
}

/// Retrieve the passages most relevant to a question.
#[instrument(skip(client, index), fields(entries = index.len()))]
pub async fn query_index<C, E>(
    client: &Client<C, E>,
    index: &VectorIndex,
    question: &str,
    options: &SearchOptions,
) -> Result<Vec<SearchHit>, SearchError>
where
    C: CompletionModel,
    E: EmbeddingModel,
{
    if options.limit == 0 {
        return Err(SearchError::InvalidParameters(
            "limit must be at least 1".to_string(),
        ));
    }

    let embedding = client
        .embedding()
        .embed_texts(vec![question.to_string()])
        .await
        .map_err(|e| SearchError::Embedding(e.to_string()))?
        .into_iter()
        .next()
        .ok_or_else(|| {
            SearchError::Embedding("embedding model returned no vector for the question".to_string())
        })?;

    let hits = index.search(&embedding.to_vec(), options.limit)?;
    debug!("Retrieved {} passages", hits.len());
    Ok(hits)
}

/// Join retrieved passages into one context string, truncating to
/// `max_length` characters with a visible marker when cut.
pub fn prepare_context(hits: &[SearchHit], max_length: usize) -> String {
    let joined = hits
        .iter()
        .map(|hit| hit.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    match joined.char_indices().nth(max_length) {
        Some((cut, _)) => {
            let mut truncated = joined[..cut].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => joined,
    }
}

/// The prompt handed to the completion model.
pub(crate) fn build_prompt(question: &str, context: &str) -> String {
    format!("Context: {context}\n\nQuestion: {question}")
}

/// Generate an answer from a question and its retrieved context.
///
/// One attempt, no retry; a completion failure is surfaced as-is.
#[instrument(skip(client, context))]
pub async fn generate_answer<C, E>(
    client: &Client<C, E>,
    question: &str,
    context: &str,
) -> Result<String, SearchError>
where
    C: CompletionModel + Clone,
    E: EmbeddingModel,
{
    let prompt = build_prompt(question, context);
    let agent = AgentBuilder::new(client.completion().clone()).build();
    agent
        .prompt(prompt.as_str())
        .await
        .map_err(|e| SearchError::Completion(e.to_string()))
}

/// Answer a question against an index: retrieve, assemble context, complete.
#[instrument(skip(client, index))]
pub async fn answer_question<C, E>(
    client: &Client<C, E>,
    index: &VectorIndex,
    question: &str,
    options: &SearchOptions,
) -> Result<RagAnswer, SearchError>
where
    C: CompletionModel + Clone,
    E: EmbeddingModel,
{
    let sources = query_index(client, index, question, options).await?;
    let context = prepare_context(&sources, options.max_context_length);
    let answer = generate_answer(client, question, &context).await?;
    Ok(RagAnswer { answer, sources })
}
