//! # Article Fetcher Module
//!
//! This module fetches news articles from user-supplied URLs and extracts
//! their readable text. It is the first stage of the pipeline, feeding the
//! processor module which chunks and embeds the content.
//!
//! ## Key Components
//!
//! - `FetcherConfig`: request timeout and user agent configuration
//! - `Document`: extracted article text plus provenance metadata
//! - `fetch_document`: fetch and extract one URL
//! - `fetch_documents`: fetch a batch sequentially with per-URL failures
//!
//! ## Behavior
//!
//! - URLs are validated before any network call; malformed input is an
//!   `InvalidUrl` error, never a request
//! - Extraction runs through an ordered strategy chain (whole-document text
//!   first, article heuristics second); the first non-empty result wins
//! - One failing URL never aborts the rest of the batch; failures are
//!   collected per URL and reported alongside the successes
//! - Proxies configured through `HTTP_PROXY`/`HTTPS_PROXY` are honored by
//!   the underlying HTTP client

mod config;
mod error;
mod strategies;

pub use config::{FetcherConfig, FetcherConfigBuilder};
pub use error::FetchError;

use chrono::{DateTime, Utc};
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use url::Url;

/// An article fetched from one URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Extracted plain text of the article
    pub text: String,

    /// Metadata about where the text came from
    pub metadata: DocumentMetadata,
}

/// Provenance metadata for a fetched document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// URL the article was fetched from
    pub source_url: String,

    /// Title of the article, if one was found
    pub title: Option<String>,

    /// When the article was fetched
    pub fetched_at: DateTime<Utc>,
}

/// A URL that could not be fetched, with the reason
#[derive(Debug)]
pub struct FetchFailure {
    /// The offending URL as the user supplied it
    pub url: String,

    /// Why it failed
    pub error: FetchError,
}

/// Validate a URL before any network activity.
///
/// Only absolute http(s) URLs with a host are accepted.
pub fn validate_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl(url.to_string()));
    }
    if parsed.host_str().map(str::is_empty).unwrap_or(true) {
        return Err(FetchError::InvalidUrl(url.to_string()));
    }
    Ok(parsed)
}

/// Fetch one URL and extract its article text.
#[instrument(skip(config))]
pub async fn fetch_document(url: &str, config: &FetcherConfig) -> Result<Document, FetchError> {
    let parsed = validate_url(url)?;
    let client = http_client(config)?;
    fetch_with_client(&client, parsed).await
}

/// Fetch a batch of URLs sequentially.
///
/// Every URL is attempted; failures are collected instead of aborting the
/// batch.
#[instrument(skip(urls, config), fields(urls = urls.len()))]
pub async fn fetch_documents(
    urls: &[String],
    config: &FetcherConfig,
) -> (Vec<Document>, Vec<FetchFailure>) {
    let mut documents = Vec::new();
    let mut failures = Vec::new();

    let client = match http_client(config) {
        Ok(client) => client,
        Err(error) => {
            // Client construction failing means no URL can be fetched.
            failures.extend(urls.iter().map(|url| FetchFailure {
                url: url.clone(),
                error: FetchError::Extraction(format!("HTTP client setup failed: {error}")),
            }));
            return (documents, failures);
        }
    };

    for url in urls {
        let result = match validate_url(url) {
            Ok(parsed) => fetch_with_client(&client, parsed).await,
            Err(error) => Err(error),
        };
        match result {
            Ok(document) => {
                info!(
                    "Fetched {} ({} characters)",
                    url,
                    document.text.chars().count()
                );
                documents.push(document);
            }
            Err(error) => {
                warn!("Failed to fetch {}: {}", url, error);
                failures.push(FetchFailure {
                    url: url.clone(),
                    error,
                });
            }
        }
    }

    (documents, failures)
}

/// Build the HTTP client. reqwest applies `HTTP_PROXY`/`HTTPS_PROXY` from
/// the environment by default.
fn http_client(config: &FetcherConfig) -> Result<reqwest::Client, FetchError> {
    Ok(reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .build()?)
}

async fn fetch_with_client(client: &reqwest::Client, url: Url) -> Result<Document, FetchError> {
    let source_url = url.to_string();
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: source_url,
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let body = response.text().await?;

    let (text, title) = if content_type.starts_with("text/plain") {
        let text = body.trim().to_string();
        if text.is_empty() {
            return Err(FetchError::Extraction(format!(
                "empty plain-text response from {source_url}"
            )));
        }
        (text, None)
    } else {
        let (text, strategy) = strategies::extract_content(&body)?;
        info!(strategy, "Extracted content from {}", source_url);
        (text, strategies::extract_title(&body))
    };

    Ok(Document {
        text,
        metadata: DocumentMetadata {
            source_url,
            title,
            fetched_at: Utc::now(),
        },
    })
}
