//! LLM Provider Clients and Abstractions
//!
//! - [`LLMClient`] - The core trait the orchestrator depends on
//! - [`WatsonxClient`] - IBM watsonx.ai implementation (free-text generation
//!   and chat with tool calling)
//!
//! # Example
//!
//! ```ignore
//! use askweb::llm::{LLMClient, WatsonxClient};
//!
//! let client = WatsonxClient::new(&config.watsonx, &config.settings);
//! let response = client.generate("What is 2+2?").await?;
//! println!("{}", response);
//! ```

/// IBM Cloud IAM token exchange.
pub mod auth;
/// Core LLM client trait and response types.
pub mod client;
/// watsonx.ai REST client.
pub mod watsonx;

pub use client::{LLMClient, LLMResponse, TokenUsage};
pub use watsonx::WatsonxClient;
