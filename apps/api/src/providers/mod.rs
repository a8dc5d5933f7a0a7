//! Provider clients: thin wrappers over the external job-listings and web-search APIs.
//!
//! Clients never retry and never fall back; that policy belongs to the tool
//! handlers. Every failure mode (transport, HTTP status, undecodable body)
//! collapses into a single `ProviderError` so callers branch on one `Result`.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::models::job::{NormalizedJob, NormalizedSearchResult};

#[cfg(test)]
pub mod fakes;
pub mod google_search;
pub mod jsearch;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A page of web-search results plus the provider's own search statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub results: Vec<NormalizedSearchResult>,
    /// Provider-reported total hit count, as text ("0" when not reported).
    pub total_results: String,
    /// Provider-reported search time in seconds, as text ("0" when not reported).
    pub formatted_search_time: String,
}

/// A job-listings lookup: free-text role and area plus the inferred region code.
#[derive(Debug, Clone, PartialEq)]
pub struct JobQuery {
    pub role: String,
    pub area: String,
    pub region: &'static str,
}

/// General-purpose web search, keyed by a text query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, num: u32) -> Result<SearchPage, ProviderError>;
}

/// Specialised job-listings search, returning already-normalised jobs.
#[async_trait]
pub trait JobListingsProvider: Send + Sync {
    async fn search_jobs(&self, query: &JobQuery) -> Result<Vec<NormalizedJob>, ProviderError>;
}

/// Builds the outbound HTTP client shared by all providers.
pub fn build_http_client(timeout_secs: u64) -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Turns a non-2xx response body into an `Api` error, preferring the
/// provider's `{ "error": { "message": .. } }` text over the raw body.
pub(crate) fn api_error(status: u16, body: String) -> ProviderError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    ProviderError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_prefers_structured_message() {
        let err = api_error(
            403,
            r#"{"error": {"code": 403, "message": "API key not valid"}}"#.to_string(),
        );
        assert_eq!(
            err.to_string(),
            "API error (status 403): API key not valid"
        );
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        let err = api_error(429, "Too many requests".to_string());
        assert!(matches!(
            err,
            ProviderError::Api { status: 429, ref message } if message == "Too many requests"
        ));
    }
}
