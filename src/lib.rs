//! # askweb
//!
//! Question answering on IBM watsonx.ai foundation models, optionally
//! grounded in live web search results from Exa.
//!
//! ## Overview
//!
//! askweb can be used in two ways:
//!
//! 1. **As a CLI** - Run the `askweb` binary
//! 2. **As a library** - Import the orchestrator and clients into your own project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use askweb::{Config, Orchestrator, Settings};
//! use askweb::agents::render_outcome;
//! use askweb::types::AskMode;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env(Settings::load_or_default(None)?)?;
//!     let orchestrator = Orchestrator::from_config(&config);
//!
//!     let result = orchestrator.ask_with_search("What's new in Rust?", 3).await;
//!     println!("{}", render_outcome(&result, AskMode::Search));
//!     Ok(())
//! }
//! ```
//!
//! ### Custom Tools
//!
//! ```rust,ignore
//! use askweb::{ToolRegistry, tools::WebSearchTool};
//! use std::sync::Arc;
//!
//! let mut registry = ToolRegistry::new();
//! registry.register(Arc::new(WebSearchTool::new(search)));
//! let orchestrator = Orchestrator::new(llm).with_tools(registry);
//! ```
//!
//! ## Modules
//!
//! - [`agents`] - Orchestration of direct, search-augmented and tool-calling answers
//! - [`llm`] - watsonx.ai client and IAM authentication
//! - [`search`] - Web search providers
//! - [`tools`] - Tool definitions and registry
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration loading

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

/// Question answering orchestration.
pub mod agents;
/// Command-line interface definitions.
pub mod cli;
/// LLM client abstraction and the watsonx.ai implementation.
pub mod llm;
/// Web search providers (Exa).
pub mod search;
/// Tools the model can call.
pub mod tools;
/// Core types (messages, answers, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use agents::{render_outcome, Orchestrator};
pub use llm::{LLMClient, LLMResponse, WatsonxClient};
pub use search::{ExaClient, WebSearch};
pub use tools::registry::ToolRegistry;
pub use types::{Answer, AppError, AskMode, Result};
pub use utils::config::{Config, ConfigError, Settings};
