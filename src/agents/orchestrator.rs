use crate::agents::prompt::build_search_prompt;
use crate::llm::LLMClient;
use crate::llm::WatsonxClient;
use crate::search::{ExaClient, WebSearch};
use crate::tools::{ToolRegistry, WebSearchTool};
use crate::types::{Answer, AppError, AskMode, Message, Result, ToolCallRecord};
use crate::utils::config::Config;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Text returned when tool calling is requested without any registered tool.
pub const TOOLS_NOT_CONFIGURED: &str =
    "Tool calling is not available: no web search provider is configured";

/// Answers questions by direct generation, search-augmented generation or a
/// single tool-calling round trip.
///
/// Holds no per-request state; every call builds its own transcript.
pub struct Orchestrator {
    llm: Arc<dyn LLMClient>,
    search: Option<Arc<dyn WebSearch>>,
    tools: ToolRegistry,
}

impl Orchestrator {
    pub fn new(llm: Arc<dyn LLMClient>) -> Self {
        Self {
            llm,
            search: None,
            tools: ToolRegistry::new(),
        }
    }

    /// Wire the watsonx client, and Exa search when a key is configured.
    pub fn from_config(config: &Config) -> Self {
        let llm = Arc::new(WatsonxClient::new(&config.watsonx, &config.settings));
        let orchestrator = Self::new(llm);

        match &config.exa {
            Some(exa) => orchestrator.with_search(Arc::new(ExaClient::from_config(exa))),
            None => {
                warn!("EXA_API_KEY not set, web search is disabled");
                orchestrator
            }
        }
    }

    /// Enable search-augmented answers and register the `web_search` tool.
    pub fn with_search(mut self, search: Arc<dyn WebSearch>) -> Self {
        self.tools
            .register(Arc::new(WebSearchTool::new(Arc::clone(&search))));
        self.search = Some(search);
        self
    }

    /// Replace the tools offered by `ask_with_tools`.
    pub fn with_tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = tools;
        self
    }

    pub fn has_search(&self) -> bool {
        self.search.is_some()
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Send the raw question as a free-text prompt.
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        info!(model = self.llm.model_name(), "Asking question");
        let response = self.llm.generate(question).await?;
        info!("Response received successfully");
        Ok(Answer::direct(response.trim()))
    }

    /// Ground the answer in up to `limit` search results.
    ///
    /// Falls back to [`ask`](Self::ask) when no search provider is configured
    /// or the search comes back empty.
    pub async fn ask_with_search(&self, question: &str, limit: usize) -> Result<Answer> {
        info!("Processing question with web search");

        let Some(search) = &self.search else {
            return self.ask_as_fallback(question).await;
        };

        let results = search.search(question, limit).await;
        if results.is_empty() {
            warn!(
                provider = search.provider_name(),
                "No search results, answering without search context"
            );
            return self.ask_as_fallback(question).await;
        }

        let prompt = build_search_prompt(question, &results);
        let response = self.llm.generate(&prompt).await?;
        info!(sources = results.len(), "Response received successfully");

        Ok(Answer {
            text: response.trim().to_string(),
            mode: AskMode::Search,
            sources: results,
            tool_calls: Vec::new(),
        })
    }

    async fn ask_as_fallback(&self, question: &str) -> Result<Answer> {
        self.ask(question)
            .await
            .map_err(|e| AppError::Fallback(Box::new(e)))
    }

    /// Offer the registered tools to the model, run the calls it requests and
    /// ask again with the results appended to the transcript.
    pub async fn ask_with_tools(&self, question: &str) -> Result<Answer> {
        if self.tools.is_empty() {
            return Err(AppError::NotConfigured(TOOLS_NOT_CONFIGURED.to_string()));
        }

        let mut transcript = vec![Message::user(question)];
        let definitions = self.tools.get_tool_definitions();

        info!(tools = definitions.len(), "Requesting tool calls");
        let response = self.llm.chat(&transcript, &definitions).await?;
        if !response.has_tool_calls() {
            return Err(AppError::EmptyResponse);
        }

        let mut records = Vec::with_capacity(response.tool_calls.len());
        for call in &response.tool_calls {
            let start = Instant::now();
            let outcome = self.tools.execute_call(call).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            let (output, success) = match outcome {
                Ok(output) => (output, true),
                Err(e) => {
                    warn!(tool = call.name(), error = %e, "Tool call failed");
                    (e.to_string(), false)
                }
            };

            info!(tool = call.name(), success, duration_ms, "Tool call executed");
            records.push(ToolCallRecord {
                id: call.id.clone(),
                name: call.name().to_string(),
                arguments: call.function.arguments.clone(),
                output,
                success,
                duration_ms,
            });
        }

        transcript.push(Message::assistant_tool_calls(response.tool_calls.clone()));
        transcript.extend(
            records
                .iter()
                .map(|record| Message::tool(record.id.clone(), record.output.clone())),
        );

        let final_response = self.llm.chat(&transcript, &[]).await?;
        debug!(
            first = ?response.usage,
            second = ?final_response.usage,
            "Tool round token usage"
        );
        let text = final_response
            .content
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(AppError::EmptyResponse)?;

        Ok(Answer {
            text: text.to_string(),
            mode: AskMode::Tools,
            sources: Vec::new(),
            tool_calls: records,
        })
    }

    /// Continue an arbitrary transcript without offering tools.
    pub async fn chat(&self, messages: &[Message]) -> Result<Answer> {
        info!(messages = messages.len(), "Starting chat conversation");
        let response = self.llm.chat(messages, &[]).await?;
        debug!(usage = ?response.usage, finish_reason = ?response.finish_reason, "Chat finished");
        let text = response
            .content
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or(AppError::EmptyResponse)?;

        info!("Chat response received successfully");
        Ok(Answer {
            text: text.to_string(),
            mode: AskMode::Chat,
            sources: Vec::new(),
            tool_calls: Vec::new(),
        })
    }
}

/// The path an outcome actually took.
///
/// `requested` is the entry point that was called; a search request that fell
/// back to a direct answer reports `Direct` on both the success and error side.
pub fn outcome_mode(result: &Result<Answer>, requested: AskMode) -> AskMode {
    match result {
        Ok(answer) => answer.mode,
        Err(AppError::Fallback(_)) => AskMode::Direct,
        Err(_) => requested,
    }
}

/// Render an orchestration outcome as the text shown to a user.
///
/// `mode` is the entry point that was called; the error prefix follows the
/// path actually taken.
pub fn render_outcome(result: &Result<Answer>, mode: AskMode) -> String {
    match result {
        Ok(answer) => answer.text.clone(),
        Err(e) => render_error(e, outcome_mode(result, mode)),
    }
}

fn render_error(error: &AppError, mode: AskMode) -> String {
    match error {
        AppError::Fallback(inner) => render_error(inner, AskMode::Direct),
        AppError::EmptyResponse => AppError::EmptyResponse.to_string(),
        AppError::NotConfigured(message) => message.clone(),
        e => match mode {
            AskMode::Direct => format!("Error generating response: {}", e),
            AskMode::Search => format!("Error generating response with search: {}", e),
            AskMode::Tools => format!("Error in tool calling: {}", e),
            AskMode::Chat => format!("Error in chat: {}", e),
        },
    }
}
