use crate::types::{AppError, Result, ToolCall, ToolDefinition, FUNCTION_TOOL_KIND};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Value;
    /// Run the tool; the output is fed back to the model as text.
    async fn execute(&self, args: Value) -> Result<String>;

    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Definitions of every registered tool, ordered by name
    pub fn get_tool_definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> =
            self.tools.values().map(|tool| tool.to_definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    pub async fn execute(&self, name: &str, args: Value) -> Result<String> {
        match self.tools.get(name) {
            Some(tool) => tool.execute(args).await,
            None => Err(AppError::UnknownTool(name.to_string())),
        }
    }

    /// Execute a model-issued tool call, decoding its JSON arguments first.
    pub async fn execute_call(&self, call: &ToolCall) -> Result<String> {
        if call.kind != FUNCTION_TOOL_KIND {
            return Err(AppError::UnsupportedToolType(call.kind.clone()));
        }
        if !self.has_tool(call.name()) {
            return Err(AppError::UnknownTool(call.name().to_string()));
        }

        let args: Value = serde_json::from_str(&call.function.arguments).map_err(|e| {
            AppError::InvalidInput(format!(
                "Arguments for '{}' are not valid JSON: {}",
                call.name(),
                e
            ))
        })?;

        self.execute(call.name(), args).await
    }

    /// Get a list of all registered tool names
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if a tool is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the text argument"
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {"text": {"type": "string"}},
                "required": ["text"]
            })
        }

        async fn execute(&self, args: Value) -> Result<String> {
            args.get("text")
                .and_then(|v| v.as_str())
                .map(String::from)
                .ok_or_else(|| AppError::InvalidInput("Missing 'text' parameter".to_string()))
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Echo));
        registry
    }

    #[test]
    fn test_registry_creation() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.tool_names().len(), 0);
    }

    #[test]
    fn test_get_tool_definitions() {
        let definitions = registry().get_tool_definitions();
        assert_eq!(definitions.len(), 1);
        assert_eq!(definitions[0].name, "echo");
        assert!(definitions[0].parameters.is_object());
    }

    #[tokio::test]
    async fn test_execute_call() {
        let call = ToolCall::function("1", "echo", r#"{"text":"hi"}"#);
        assert_eq!(registry().execute_call(&call).await.unwrap(), "hi");
    }

    #[tokio::test]
    async fn test_unsupported_kind() {
        let mut call = ToolCall::function("1", "echo", r#"{"text":"hi"}"#);
        call.kind = "retrieval".to_string();

        let result = registry().execute_call(&call).await;
        assert!(matches!(result, Err(AppError::UnsupportedToolType(kind)) if kind == "retrieval"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let call = ToolCall::function("1", "calculator", "{}");
        let result = registry().execute_call(&call).await;
        assert!(matches!(result, Err(AppError::UnknownTool(name)) if name == "calculator"));
    }

    #[tokio::test]
    async fn test_malformed_arguments() {
        let call = ToolCall::function("1", "echo", "{not json");
        let result = registry().execute_call(&call).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
