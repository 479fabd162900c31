//! Mock implementations for testing.
//!
//! Scripted LLM clients and static search providers shared across the
//! integration tests.

#![allow(dead_code)]

use askweb::llm::{LLMClient, LLMResponse};
use askweb::search::WebSearch;
use askweb::types::{AppError, Message, Result, SearchResult, ToolCall, ToolDefinition};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Mock LLM client that replays scripted responses and records every request.
///
/// `generate` always returns the configured text (or fails); `chat` pops the
/// next scripted response and fails once the script runs out.
#[derive(Default)]
pub struct MockLLMClient {
    generate_response: Option<String>,
    chat_script: Mutex<VecDeque<Result<LLMResponse>>>,
    prompts: Mutex<Vec<String>>,
    transcripts: Mutex<Vec<Vec<Message>>>,
    offered_tools: Mutex<Vec<Vec<ToolDefinition>>>,
}

impl MockLLMClient {
    /// Create a mock whose `generate` returns the given text.
    pub fn new(response: &str) -> Self {
        Self {
            generate_response: Some(response.to_string()),
            ..Default::default()
        }
    }

    /// Create a mock whose every call fails.
    pub fn failing() -> Self {
        Self::default()
    }

    /// Create a mock that answers chat calls from a script, in order.
    pub fn scripted(responses: Vec<Result<LLMResponse>>) -> Self {
        Self {
            chat_script: Mutex::new(responses.into()),
            ..Default::default()
        }
    }

    /// Script a tool-calling round: first the calls, then the final text.
    pub fn with_tool_round(tool_calls: Vec<ToolCall>, final_text: &str) -> Self {
        Self::scripted(vec![
            Ok(LLMResponse::with_tool_calls(tool_calls)),
            Ok(LLMResponse::text(final_text)),
        ])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn transcripts(&self) -> Vec<Vec<Message>> {
        self.transcripts.lock().clone()
    }

    pub fn offered_tools(&self) -> Vec<Vec<ToolDefinition>> {
        self.offered_tools.lock().clone()
    }

    pub fn chat_calls(&self) -> usize {
        self.transcripts.lock().len()
    }
}

#[async_trait]
impl LLMClient for MockLLMClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().push(prompt.to_string());
        self.generate_response
            .clone()
            .ok_or_else(|| AppError::LLM("Mock LLM failure".to_string()))
    }

    async fn chat(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<LLMResponse> {
        self.transcripts.lock().push(messages.to_vec());
        self.offered_tools.lock().push(tools.to_vec());
        self.chat_script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::LLM("Mock LLM failure".to_string())))
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// Search provider returning a fixed result list and recording queries.
#[derive(Default)]
pub struct MockSearch {
    results: Vec<SearchResult>,
    queries: Mutex<Vec<(String, usize)>>,
}

impl MockSearch {
    pub fn new(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn queries(&self) -> Vec<(String, usize)> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl WebSearch for MockSearch {
    async fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        self.queries.lock().push((query.to_string(), limit));
        self.results.iter().take(limit).cloned().collect()
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

/// Build a search hit with a fixed score.
pub fn hit(title: &str, url: &str, text: &str) -> SearchResult {
    SearchResult {
        title: title.to_string(),
        text: text.to_string(),
        url: url.to_string(),
        score: 0.9,
        published_date: None,
    }
}
