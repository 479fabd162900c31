//! `web_search` tool
//!
//! Lets the model request a web search; hits are rendered as plain-text
//! source blocks the model can cite.

use crate::search::WebSearch;
use crate::tools::registry::Tool;
use crate::types::{AppError, Result, SearchResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

pub const WEB_SEARCH_TOOL: &str = "web_search";

/// Results requested per tool invocation.
pub const DEFAULT_TOOL_RESULTS: usize = 3;

pub struct WebSearchTool {
    search: Arc<dyn WebSearch>,
    limit: usize,
}

impl WebSearchTool {
    pub fn new(search: Arc<dyn WebSearch>) -> Self {
        Self {
            search,
            limit: DEFAULT_TOOL_RESULTS,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// Render hits as `Source/URL/Content` blocks separated by blank lines.
pub fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|result| {
            format!(
                "Source: {}\nURL: {}\nContent: {}\n",
                result.title, result.url, result.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        WEB_SEARCH_TOOL
    }

    fn description(&self) -> &str {
        "Search the web for current information. Always cite sources."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String> {
        let query = args
            .get("query")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::InvalidInput("Missing 'query' parameter".to_string()))?;

        let results = self.search.search(query, self.limit).await;
        if results.is_empty() {
            return Ok("No search results found.".to_string());
        }

        Ok(format_results(&results))
    }
}
