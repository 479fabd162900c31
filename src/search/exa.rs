//! Exa search client
//!
//! Talks to `POST /search` with content bodies enabled and shapes the hits
//! into [`SearchResult`]s: empty bodies are dropped and long bodies are
//! truncated to a prompt-sized snippet.

use crate::search::{truncate_snippet, WebSearch};
use crate::types::{AppError, Result, SearchResult};
use crate::utils::config::ExaConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.exa.ai";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaSearchRequest<'a> {
    query: &'a str,
    #[serde(rename = "type")]
    search_type: &'static str,
    num_results: usize,
    contents: ExaContents,
}

#[derive(Debug, Serialize)]
struct ExaContents {
    text: bool,
}

/// Response body of `POST /search`
#[derive(Debug, Deserialize)]
pub struct ExaSearchResponse {
    pub results: Vec<ExaResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub published_date: Option<String>,
}

pub struct ExaClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ExaClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ExaConfig) -> Self {
        Self::with_base_url(config.api_key.clone(), config.base_url.clone())
    }

    /// Search and report failures instead of hiding them.
    pub async fn try_search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let limit = limit.max(1);
        let url = format!("{}/search", self.base_url);
        let request = ExaSearchRequest {
            query,
            search_type: "auto",
            num_results: limit,
            contents: ExaContents { text: true },
        };

        let http_response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Search(format!("Request to {} failed: {}", url, e)))?;

        if !http_response.status().is_success() {
            let status = http_response.status();
            let error_text = http_response.text().await.unwrap_or_default();
            return Err(AppError::Search(format!(
                "Exa API error: HTTP {} - {}",
                status, error_text
            )));
        }

        let response_text = http_response
            .text()
            .await
            .map_err(|e| AppError::Search(format!("Failed to read Exa response: {}", e)))?;
        debug!(bytes = response_text.len(), "Raw Exa response received");

        let response: ExaSearchResponse = serde_json::from_str(&response_text).map_err(|e| {
            AppError::Search(format!(
                "Failed to parse Exa response: {} (first 200 chars: {})",
                e,
                response_text.chars().take(200).collect::<String>()
            ))
        })?;

        Ok(shape_results(response.results, limit))
    }
}

/// Drop hits without text, truncate long bodies and cap the list at `limit`.
pub fn shape_results(results: Vec<ExaResult>, limit: usize) -> Vec<SearchResult> {
    results
        .into_iter()
        .filter_map(|result| {
            let text = result.text.filter(|t| !t.is_empty())?;
            Some(SearchResult {
                title: result.title.unwrap_or_else(|| "No title".to_string()),
                text: truncate_snippet(&text),
                url: result.url,
                score: result.score.unwrap_or(0.0),
                published_date: result.published_date.filter(|d| !d.is_empty()),
            })
        })
        .take(limit)
        .collect()
}

#[async_trait]
impl WebSearch for ExaClient {
    async fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        info!(query, "Searching Exa");

        match self.try_search(query, limit).await {
            Ok(results) => {
                info!(count = results.len(), "Exa search finished");
                if results.is_empty() {
                    warn!(query, "No results found in the Exa response");
                }
                results
            }
            Err(e) => {
                error!(query, error = %e, "Error searching Exa");
                Vec::new()
            }
        }
    }

    fn provider_name(&self) -> &str {
        "exa"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(title: Option<&str>, text: Option<&str>, date: Option<&str>) -> ExaResult {
        ExaResult {
            title: title.map(String::from),
            url: "https://example.com".to_string(),
            text: text.map(String::from),
            score: Some(0.42),
            published_date: date.map(String::from),
        }
    }

    #[test]
    fn test_request_wire_shape() {
        let request = ExaSearchRequest {
            query: "rust async",
            search_type: "auto",
            num_results: 3,
            contents: ExaContents { text: true },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "query": "rust async",
                "type": "auto",
                "numResults": 3,
                "contents": {"text": true}
            })
        );
    }

    #[test]
    fn test_shape_filters_empty_text() {
        let results = shape_results(
            vec![
                raw(Some("empty"), Some(""), None),
                raw(Some("missing"), None, None),
                raw(Some("kept"), Some("body"), None),
            ],
            5,
        );
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "kept");
        assert_eq!(results[0].score, 0.42);
    }

    #[test]
    fn test_shape_defaults_title_and_date() {
        let results = shape_results(vec![raw(None, Some("body"), Some(""))], 5);
        assert_eq!(results[0].title, "No title");
        assert_eq!(results[0].published_date, None);

        let results = shape_results(vec![raw(Some(""), Some("body"), None)], 5);
        assert_eq!(results[0].title, "");

        let results = shape_results(vec![raw(Some("t"), Some("body"), Some("2024-05-01"))], 5);
        assert_eq!(results[0].published_date.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn test_shape_respects_limit() {
        let hits = (0..5).map(|_| raw(Some("t"), Some("body"), None)).collect();
        assert_eq!(shape_results(hits, 2).len(), 2);
    }

    #[test]
    fn test_response_requires_results_field() {
        let parsed: std::result::Result<ExaSearchResponse, _> =
            serde_json::from_value(json!({"data": {"results": []}}));
        assert!(parsed.is_err());
    }
}
