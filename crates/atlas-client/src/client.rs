//! HTTP client for the Atlas REST API.
//!
//! Wraps `reqwest` with Atlas-specific error handling and typed response
//! deserialization. Non-success responses are mined for the service's
//! `detail` field so callers can show the server-provided message instead
//! of a bare status code.

use std::time::Duration;

use reqwest::{Client, Url};

use atlas_core::types::{HistoryEntry, HistoryResponse, SearchRequest, SearchResponse};

use crate::error::ApiError;

/// Client for the Atlas REST API.
///
/// Holds the HTTP client and the prebuilt endpoint URLs. Point `base_url`
/// at a mock server in tests.
#[derive(Debug, Clone)]
pub struct AtlasClient {
    client: Client,
    search_url: Url,
    history_url: Url,
}

impl AtlasClient {
    /// Creates a client for the service at `base_url`. Every request issued
    /// through the client is bounded by `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` does not
    /// parse as an absolute URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("atlas/0.1 (establishment-search)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends the API path instead of replacing the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised)
            .map_err(|_| ApiError::InvalidBaseUrl(base_url.to_owned()))?;
        let search_url = base
            .join("api/search")
            .map_err(|_| ApiError::InvalidBaseUrl(base_url.to_owned()))?;
        let history_url = base
            .join("api/history")
            .map_err(|_| ApiError::InvalidBaseUrl(base_url.to_owned()))?;

        Ok(Self {
            client,
            search_url,
            history_url,
        })
    }

    /// Searches establishments around the position in `request`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure or timeout.
    /// - [`ApiError::Service`] if the service answers with a non-2xx status;
    ///   the body's `detail` field is attached when present.
    /// - [`ApiError::Deserialize`] if the response body does not match the
    ///   expected shape.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        let response = self
            .client
            .post(self.search_url.clone())
            .json(request)
            .send()
            .await?;
        let body = Self::read_success(response).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: format!("search(query={})", request.query),
            source: e,
        })
    }

    /// Fetches the most recent `limit` history entries, newest first.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`AtlasClient::search`].
    pub async fn history(&self, limit: usize) -> Result<Vec<HistoryEntry>, ApiError> {
        let mut url = self.history_url.clone();
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());

        let response = self.client.get(url.clone()).send().await?;
        let body = Self::read_success(response).await?;
        let envelope: HistoryResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;
        Ok(envelope.history)
    }

    /// Asserts a 2xx status and returns the raw body. Non-success bodies are
    /// mined for a `detail` message before being discarded.
    async fn read_success(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }
        Err(ApiError::Service {
            status: status.as_u16(),
            detail: extract_detail(&body),
        })
    }
}

/// Pulls the `detail` string out of an error body, when the body is JSON
/// and carries one.
fn extract_detail(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("detail")?
        .as_str()
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> AtlasClient {
        AtlasClient::new(base_url, 30).expect("client construction should not fail")
    }

    #[test]
    fn new_builds_endpoint_urls_from_base() {
        let client = test_client("http://127.0.0.1:8000");
        assert_eq!(client.search_url.as_str(), "http://127.0.0.1:8000/api/search");
        assert_eq!(
            client.history_url.as_str(),
            "http://127.0.0.1:8000/api/history"
        );
    }

    #[test]
    fn new_strips_extra_trailing_slashes() {
        let client = test_client("http://atlas.example.com///");
        assert_eq!(
            client.search_url.as_str(),
            "http://atlas.example.com/api/search"
        );
    }

    #[test]
    fn new_rejects_relative_base_url() {
        let result = AtlasClient::new("not-a-url", 30);
        assert!(
            matches!(result, Err(ApiError::InvalidBaseUrl(ref raw)) if raw == "not-a-url"),
            "expected InvalidBaseUrl"
        );
    }

    #[test]
    fn extract_detail_reads_json_detail_field() {
        assert_eq!(
            extract_detail(r#"{"detail": "Raio deve estar entre 100 e 50000 metros"}"#),
            Some("Raio deve estar entre 100 e 50000 metros".to_owned())
        );
    }

    #[test]
    fn extract_detail_ignores_json_without_detail() {
        assert_eq!(extract_detail(r#"{"error": "boom"}"#), None);
        assert_eq!(extract_detail(r#"{"detail": 42}"#), None);
    }

    #[test]
    fn extract_detail_ignores_non_json_bodies() {
        assert_eq!(extract_detail("Internal Server Error"), None);
    }
}
