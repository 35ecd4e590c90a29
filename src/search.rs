//! # Question Answering Module
//!
//! The retrieval side of the tool: embed a question, find the nearest
//! indexed passages, assemble them into a bounded context string, and hand
//! that context to the completion model for an answer. The passages used
//! are returned alongside the answer so the user can check the sources.
//!
//! The index is an explicit, caller-owned value. `ResearchSession` holds the
//! current index together with the model client; a rebuild replaces the held
//! index wholesale rather than mutating it.

mod error;
mod search_impl;

pub use error::SearchError;
pub use search_impl::{
    RagAnswer, SearchOptions, TRUNCATION_MARKER, answer_question, generate_answer,
    prepare_context, query_index,
};

/// Re-export types surfaced in search results
pub use crate::index::{SearchHit, VectorIndex};

use crate::model::Client;
use rig::{completion::CompletionModel, embeddings::EmbeddingModel};

/// A question-answering session over one index
pub struct ResearchSession<C, E>
where
    C: CompletionModel,
    E: EmbeddingModel,
{
    client: Client<C, E>,
    index: VectorIndex,
}

impl<C, E> ResearchSession<C, E>
where
    C: CompletionModel + Clone,
    E: EmbeddingModel,
{
    /// Create a session over an index
    pub fn new(client: Client<C, E>, index: VectorIndex) -> Self {
        Self { client, index }
    }

    /// Answer a question against the session's current index
    pub async fn ask(
        &self,
        question: &str,
        options: &SearchOptions,
    ) -> Result<RagAnswer, SearchError> {
        answer_question(&self.client, &self.index, question, options).await
    }

    /// Swap in a freshly built index, returning the one it replaces
    pub fn replace_index(&mut self, index: VectorIndex) -> VectorIndex {
        std::mem::replace(&mut self.index, index)
    }

    /// The session's current index
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    /// The session's model client
    pub fn client(&self) -> &Client<C, E> {
        &self.client
    }
}
