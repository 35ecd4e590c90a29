//! # Model Client Module
//!
//! This module provides a unified client interface over the completion and
//! embedding models the tool depends on. Both models are injectable through
//! the `rig` traits, which keeps the model boundary opaque: the rest of the
//! crate only ever sees `text -> vector` and `prompt -> answer`.
//!
//! ## Key Components
//!
//! - `Client`: a pair of completion and embedding models used together
//! - `EmbeddingConversion`: helpers between `rig` embeddings and index rows
//! - `mock_model`: canned models for tests, no network involved
//!
//! API keys are read from the environment; they are never compiled into the
//! binary.

pub mod embedding;
pub mod mock_model;

pub use embedding::EmbeddingConversion;

use rig::{completion::CompletionModel, embeddings::EmbeddingModel, providers::gemini};

/// Completion model used when the caller does not pick one.
pub const DEFAULT_COMPLETION_MODEL: &str = "gemini-2.0-flash";

/// A client holding the completion and embedding models for one session.
#[derive(Debug, Clone)]
pub struct Client<C, E>
where
    C: CompletionModel,
    E: EmbeddingModel,
{
    completion_model: C,
    embedding_model: E,
}

/// The client type backed by the Gemini provider.
pub type GeminiClient =
    Client<gemini::completion::CompletionModel, gemini::embedding::EmbeddingModel>;

impl GeminiClient {
    /// Create a Gemini-backed client, reading `GEMINI_API_KEY` from the
    /// environment and using the default completion model.
    pub fn new_gemini_from_env() -> Self {
        Self::new_gemini_from_env_with_model(DEFAULT_COMPLETION_MODEL)
    }

    /// Create a Gemini-backed client with a specific completion model,
    /// reading `GEMINI_API_KEY` from the environment.
    pub fn new_gemini_from_env_with_model(model: &str) -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .expect("GEMINI_API_KEY environment variable must be set");
        Self::new_gemini(gemini::Client::new(&api_key), model)
    }

    /// Create a client from an existing Gemini client
    pub fn new_gemini(gemini_client: gemini::Client, model: &str) -> Self {
        Self {
            completion_model: gemini_client.completion_model(model),
            embedding_model: gemini_client.embedding_model(gemini::embedding::EMBEDDING_004),
        }
    }
}

impl<C, E> Client<C, E>
where
    C: CompletionModel,
    E: EmbeddingModel,
{
    /// Create a client from arbitrary completion and embedding models
    pub fn new(completion_model: C, embedding_model: E) -> Self {
        Self {
            completion_model,
            embedding_model,
        }
    }

    /// The completion model
    pub fn completion(&self) -> &C {
        &self.completion_model
    }

    /// The embedding model
    pub fn embedding(&self) -> &E {
        &self.embedding_model
    }
}
