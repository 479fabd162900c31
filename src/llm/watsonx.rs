//! IBM watsonx.ai client for free-text generation and chat with tools

use crate::llm::auth::IamAuthenticator;
use crate::llm::client::{LLMClient, LLMResponse, TokenUsage};
use crate::types::{AppError, Message, Result, ToolCall, ToolDefinition};
use crate::utils::config::{GenerationParams, Settings, WatsonxConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// `version` query parameter sent with every REST call.
pub const DEFAULT_API_VERSION: &str = "2024-05-31";

/// Model identifiers known to work with this client.
pub mod models {
    pub const MIXTRAL: &str = "mistralai/mixtral-8x7b-instruct-v01";
    pub const LLAMA_70B: &str = "meta-llama/llama-3-3-70b-instruct";
    pub const GRANITE: &str = "ibm/granite-13b-instruct-v2";

    /// All known models as `(id, description)` pairs.
    pub const ALL: &[(&str, &str)] = &[
        (MIXTRAL, "Mixtral 8x7B instruct (default)"),
        (LLAMA_70B, "Llama 3.3 70B instruct, supports tool calling"),
        (GRANITE, "IBM Granite 13B instruct v2"),
    ];
}

// ============= Wire Types =============

#[derive(Debug, Serialize)]
struct TextGenerationRequest<'a> {
    input: &'a str,
    model_id: &'a str,
    project_id: &'a str,
    parameters: &'a GenerationParams,
}

#[derive(Debug, Deserialize)]
struct TextGenerationResponse {
    #[serde(default)]
    results: Vec<TextGenerationResult>,
}

#[derive(Debug, Deserialize)]
struct TextGenerationResult {
    generated_text: String,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model_id: &'a str,
    project_id: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice_option: Option<&'static str>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction<'a>,
}

#[derive(Debug, Serialize)]
struct WireFunction<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

impl<'a> From<&'a ToolDefinition> for WireTool<'a> {
    fn from(tool: &'a ToolDefinition) -> Self {
        Self {
            kind: "function",
            function: WireFunction {
                name: &tool.name,
                description: &tool.description,
                parameters: &tool.parameters,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}

// ============= Client =============

/// watsonx.ai foundation-model client for text generation and chat
pub struct WatsonxClient {
    client: Client,
    auth: IamAuthenticator,
    base_url: String,
    project_id: String,
    model_id: String,
    api_version: String,
    params: GenerationParams,
}

impl WatsonxClient {
    pub fn new(config: &WatsonxConfig, settings: &Settings) -> Self {
        let client = Client::new();
        info!(model = %settings.model_id, "Initializing watsonx.ai client");

        Self {
            auth: IamAuthenticator::new(client.clone(), config.api_key.clone(), &config.iam_url),
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            model_id: settings.model_id.clone(),
            api_version: settings.api_version.clone(),
            params: settings.generation.clone(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Exchange the API key for a token, proving the credentials work.
    pub async fn check_connection(&self) -> Result<()> {
        self.auth.token().await.map(|_| ())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/ml/v1/{}?version={}", self.base_url, path, self.api_version)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let token = self.auth.token().await?;
        let url = self.endpoint(path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::LLM(format!("watsonx.ai request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::LLM(format!(
                "watsonx.ai API error for model '{}': HTTP {} - {}",
                self.model_id, status, error_text
            )));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| AppError::LLM(format!("Failed to read watsonx.ai response: {}", e)))?;
        debug!(path, bytes = response_text.len(), "watsonx.ai response received");

        serde_json::from_str(&response_text).map_err(|e| {
            AppError::LLM(format!(
                "Failed to parse response from model '{}': {}",
                self.model_id, e
            ))
        })
    }
}

#[async_trait]
impl LLMClient for WatsonxClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = TextGenerationRequest {
            input: prompt,
            model_id: &self.model_id,
            project_id: &self.project_id,
            parameters: &self.params,
        };

        let response: TextGenerationResponse = self.post("text/generation", &request).await?;
        let result = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| AppError::LLM("No results from watsonx.ai".to_string()))?;

        debug!(stop_reason = ?result.stop_reason, "Text generation finished");
        Ok(result.generated_text)
    }

    async fn chat(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<LLMResponse> {
        let request = ChatRequest {
            model_id: &self.model_id,
            project_id: &self.project_id,
            messages,
            tools: tools.iter().map(WireTool::from).collect(),
            tool_choice_option: (!tools.is_empty()).then_some("auto"),
            max_tokens: self.params.max_new_tokens,
            temperature: self.params.temperature,
            top_p: self.params.top_p,
        };

        let response: ChatResponse = self.post("text/chat", &request).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::LLM("No choices from watsonx.ai".to_string()))?;

        Ok(LLMResponse {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls.unwrap_or_default(),
            finish_reason: choice.finish_reason,
            usage: response.usage,
        })
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }
}
