//! Recommendation service client
//!
//! The wizard talks to two external collaborators through the traits below:
//! a prefix search for author names and book titles, and the recommendation
//! endpoint. [`HttpShelfClient`] implements both over HTTP:
//!
//! - `GET  {base}/search/authors?q=...` -> `["name", ...]`
//! - `GET  {base}/search/books?q=...`   -> `["title", ...]`
//! - `POST {base}/recommend`            -> `{"recommendations": [...]}`

use async_trait::async_trait;
use shelf_common::api::{BookResult, RecommendationResponse, SubmissionRecord};
use std::time::Duration;
use thiserror::Error;

use crate::search::SearchKind;

const USER_AGENT: &str = concat!("shelfwise/", env!("CARGO_PKG_VERSION"));

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Author/book prefix lookup
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Candidates for `query` in relevance order; an empty list is a valid
    /// answer and distinct from an error
    async fn search(&self, kind: SearchKind, query: &str) -> Result<Vec<String>, ClientError>;
}

/// Recommendation submission
#[async_trait]
pub trait RecommendationService: Send + Sync {
    /// Submit a profile once; no retry is attempted here
    async fn recommend(&self, record: &SubmissionRecord) -> Result<Vec<BookResult>, ClientError>;
}

/// HTTP client for the recommendation service
#[derive(Debug, Clone)]
pub struct HttpShelfClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpShelfClient {
    /// `base_url` must already be normalized (no trailing slash)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::ApiError(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl SearchBackend for HttpShelfClient {
    async fn search(&self, kind: SearchKind, query: &str) -> Result<Vec<String>, ClientError> {
        let url = format!("{}/search/{}", self.base_url, kind.as_str());

        tracing::debug!(kind = %kind.as_str(), query = %query, url = %url, "Querying search endpoint");

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;

        let results: Vec<String> = Self::read_json(response).await?;

        tracing::debug!(kind = %kind.as_str(), count = results.len(), "Search results received");
        Ok(results)
    }
}

#[async_trait]
impl RecommendationService for HttpShelfClient {
    async fn recommend(&self, record: &SubmissionRecord) -> Result<Vec<BookResult>, ClientError> {
        let url = format!("{}/recommend", self.base_url);

        tracing::debug!(url = %url, genres = ?record.genres, "Submitting reading profile");

        let response = self
            .http_client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;

        let body: RecommendationResponse = Self::read_json(response).await?;

        tracing::info!(
            count = body.recommendations.len(),
            "Received recommendations"
        );
        Ok(body.recommendations)
    }
}
