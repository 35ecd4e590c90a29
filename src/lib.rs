//! # newsdesk - News Research with Retrieval-Augmented Generation
//!
//! This crate implements a small research tool for news articles: give it a
//! handful of article URLs, it fetches and indexes their text, and then
//! answers free-form questions against that index by retrieving the most
//! relevant passages and handing them to a language model as context.
//!
//! ## Features
//!
//! - Article fetching with a fallback chain of content-extraction strategies
//! - Boundary-aware text chunking (paragraph, line, sentence, clause)
//! - Exact nearest-neighbor search over a flat in-memory vector index
//! - Single-file index persistence with atomic writes and an overwrite gate
//! - Retrieval-augmented answer generation with cited source passages
//! - Injectable completion and embedding models via the `rig` framework
//! - Async API with Tokio
//! - Structured error handling and tracing
//!
//! ## Example
//!
//! ```rust,no_run
//! use newsdesk::fetcher::{fetch_documents, FetcherConfig};
//! use newsdesk::index::VectorIndex;
//! use newsdesk::model::Client;
//! use newsdesk::processor::{process_documents, ProcessorConfig};
//! use newsdesk::search::{answer_question, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads GEMINI_API_KEY from the environment
//!     let client = Client::new_gemini_from_env();
//!
//!     let urls = vec!["https://example.com/some-article".to_string()];
//!     let (documents, failures) = fetch_documents(&urls, &FetcherConfig::default()).await;
//!     for failure in &failures {
//!         eprintln!("skipped {}: {}", failure.url, failure.error);
//!     }
//!
//!     let chunks = process_documents(&client, &documents, &ProcessorConfig::default()).await?;
//!     let index = VectorIndex::from_chunks(chunks)?;
//!
//!     let result = answer_question(
//!         &client,
//!         &index,
//!         "What did the article announce?",
//!         &SearchOptions::default(),
//!     )
//!     .await?;
//!     println!("{}", result.answer);
//!     Ok(())
//! }
//! ```

mod error;

pub mod fetcher;
pub mod index;
pub mod model;
pub mod processor;
pub mod search;

pub use error::Error;

/// Re-export of the crate error types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
