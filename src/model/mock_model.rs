//! # Mock Models for Testing
//!
//! Canned completion and embedding models implementing the `rig` traits,
//! so the pipeline can be exercised in tests without any API calls. The
//! completion mock returns a predefined answer; the embedding mock returns
//! canned vectors per text, falling back to a deterministic hash-derived
//! vector for texts without one.

use rig::{
    completion::{
        AssistantContent, CompletionError, CompletionModel, CompletionRequest, CompletionResponse,
    },
    embeddings::{Embedding, EmbeddingError, EmbeddingModel},
    one_or_many::OneOrMany,
};
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tokio::sync::Mutex;

/// A mock completion model that returns a predefined answer.
#[derive(Debug, Clone)]
pub struct MockCompletionModel {
    response: Arc<Mutex<Option<OneOrMany<AssistantContent>>>>,
}

impl MockCompletionModel {
    /// Creates a mock that answers with an empty string until told otherwise.
    pub fn new() -> Self {
        Self {
            response: Arc::new(Mutex::new(None)),
        }
    }

    /// Set the answer text returned by the next completion calls.
    pub async fn set_text_response(&self, text: &str) {
        let mut guard = self.response.lock().await;
        *guard = Some(OneOrMany::one(AssistantContent::text(text)));
    }
}

impl Default for MockCompletionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionModel for MockCompletionModel {
    type Response = String;

    async fn completion(
        &self,
        _completion_request: CompletionRequest,
    ) -> Result<CompletionResponse<Self::Response>, CompletionError> {
        let response = {
            let guard = self.response.lock().await;
            guard.clone()
        };
        Ok(CompletionResponse {
            choice: response.unwrap_or_else(|| OneOrMany::one(AssistantContent::text(""))),
            raw_response: String::new(),
        })
    }
}

/// A mock embedding model with canned per-text vectors.
#[derive(Debug, Clone)]
pub struct MockEmbeddingModel {
    dimensions: usize,
    canned: Arc<Mutex<HashMap<String, Vec<f64>>>>,
}

impl MockEmbeddingModel {
    /// Creates a mock producing vectors of the given dimension.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            canned: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Pin the vector returned for a specific text.
    pub async fn set_vector(&self, text: &str, vector: Vec<f64>) {
        let mut guard = self.canned.lock().await;
        guard.insert(text.to_string(), vector);
    }
}

impl EmbeddingModel for MockEmbeddingModel {
    const MAX_DOCUMENTS: usize = 1024;

    fn ndims(&self) -> usize {
        self.dimensions
    }

    async fn embed_texts(
        &self,
        texts: impl IntoIterator<Item = String> + Send,
    ) -> Result<Vec<Embedding>, EmbeddingError> {
        let canned = {
            let guard = self.canned.lock().await;
            guard.clone()
        };
        Ok(texts
            .into_iter()
            .map(|text| {
                let vec = canned
                    .get(&text)
                    .cloned()
                    .unwrap_or_else(|| deterministic_vector(&text, self.dimensions));
                Embedding {
                    document: text,
                    vec,
                }
            })
            .collect())
    }
}

/// Derive a stable pseudo-vector from the text itself.
fn deterministic_vector(text: &str, dimensions: usize) -> Vec<f64> {
    (0..dimensions)
        .map(|i| {
            let mut hasher = DefaultHasher::new();
            text.hash(&mut hasher);
            i.hash(&mut hasher);
            (hasher.finish() % 1000) as f64 / 1000.0
        })
        .collect()
}
