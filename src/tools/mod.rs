//! Tools the model can call
//!
//! # Module Structure
//!
//! - [`registry`](crate::tools::registry) - Tool trait, registration and dispatch
//! - [`search`](crate::tools::search) - The `web_search` tool
//!
//! # Tool Registry
//!
//! ```ignore
//! let mut registry = ToolRegistry::new();
//! registry.register(Arc::new(WebSearchTool::new(search)));
//! let definitions = registry.get_tool_definitions();
//! let output = registry.execute_call(&tool_call).await?;
//! ```

/// Tool registry for managing available tools.
pub mod registry;
/// Web search tool backed by a [`WebSearch`](crate::search::WebSearch) provider.
pub mod search;

pub use registry::{Tool, ToolRegistry};
pub use search::WebSearchTool;
