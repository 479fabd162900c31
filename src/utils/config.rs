//! Configuration for askweb
//!
//! Credentials come from the environment (optionally seeded from a `.env`
//! file). Model and generation settings come from an optional TOML file
//! (`askweb.toml`) and fall back to built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const WATSONX_API_KEY_ENV: &str = "IBM_WATSONX_API_KEY";
pub const WATSONX_URL_ENV: &str = "IBM_WATSONX_URL";
pub const WATSONX_PROJECT_ID_ENV: &str = "IBM_WATSONX_PROJECT_ID";
pub const WATSONX_IAM_URL_ENV: &str = "IBM_WATSONX_IAM_URL";
pub const EXA_API_KEY_ENV: &str = "EXA_API_KEY";
pub const EXA_BASE_URL_ENV: &str = "EXA_BASE_URL";

/// Settings file looked up when no explicit path is given.
pub const DEFAULT_SETTINGS_FILE: &str = "askweb.toml";

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(
        "Missing required environment variables: {}. Set them in the environment or a .env file",
        .0.join(", ")
    )]
    MissingCredentials(Vec<&'static str>),

    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Credentials and endpoints for watsonx.ai
#[derive(Debug, Clone)]
pub struct WatsonxConfig {
    pub api_key: String,
    pub url: String,
    pub project_id: String,
    pub iam_url: String,
}

/// Credentials and endpoint for the Exa search API
#[derive(Debug, Clone)]
pub struct ExaConfig {
    pub api_key: String,
    pub base_url: String,
}

/// Sampling parameters sent unchanged with every free-text generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub min_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: 250,
            min_new_tokens: 1,
            temperature: 0.7,
            top_p: 0.9,
            top_k: 50,
        }
    }
}

impl GenerationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature.is_nan() || self.temperature < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "temperature must be >= 0.0, got {}",
                self.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(ConfigError::ValidationError(format!(
                "top_p must be between 0.0 and 1.0, got {}",
                self.top_p
            )));
        }
        if self.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "top_k must be at least 1".to_string(),
            ));
        }
        if self.min_new_tokens > self.max_new_tokens {
            return Err(ConfigError::ValidationError(format!(
                "min_new_tokens ({}) exceeds max_new_tokens ({})",
                self.min_new_tokens, self.max_new_tokens
            )));
        }
        Ok(())
    }
}

/// Behavioral settings loaded from `askweb.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// watsonx.ai model identifier
    pub model_id: String,
    /// `version` query parameter of the watsonx.ai REST API
    pub api_version: String,
    /// Number of search results used for search-augmented answers
    pub search_results: usize,
    pub generation: GenerationParams,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_id: crate::llm::watsonx::models::MIXTRAL.to_string(),
            api_version: crate::llm::watsonx::DEFAULT_API_VERSION.to_string(),
            search_results: 3,
            generation: GenerationParams::default(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;

        Ok(settings)
    }

    /// Load from an explicit path, or from `askweb.toml` when it exists.
    ///
    /// Only an explicitly requested file is required to exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_SETTINGS_FILE).exists() => Self::load(DEFAULT_SETTINGS_FILE),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "model_id must not be empty".to_string(),
            ));
        }
        if self.search_results == 0 {
            return Err(ConfigError::ValidationError(
                "search_results must be at least 1".to_string(),
            ));
        }
        self.generation.validate()
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub watsonx: WatsonxConfig,
    /// `None` when no Exa key is configured; search and tools are then unavailable.
    pub exa: Option<ExaConfig>,
    pub settings: Settings,
}

impl Config {
    /// Build configuration from the process environment, reading `.env` first.
    pub fn from_env(settings: Settings) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok(), settings)
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// All missing watsonx.ai credentials are reported at once.
    pub fn from_lookup<F>(lookup: F, settings: Settings) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = read(WATSONX_API_KEY_ENV);
        let url = read(WATSONX_URL_ENV);
        let project_id = read(WATSONX_PROJECT_ID_ENV);

        let (api_key, url, project_id) = match (api_key, url, project_id) {
            (Some(api_key), Some(url), Some(project_id)) => (api_key, url, project_id),
            (api_key, url, project_id) => {
                let missing = [
                    (WATSONX_API_KEY_ENV, api_key.is_none()),
                    (WATSONX_URL_ENV, url.is_none()),
                    (WATSONX_PROJECT_ID_ENV, project_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();
                return Err(ConfigError::MissingCredentials(missing));
            }
        };

        settings.validate()?;

        let exa = read(EXA_API_KEY_ENV).map(|api_key| ExaConfig {
            api_key,
            base_url: read(EXA_BASE_URL_ENV)
                .unwrap_or_else(|| crate::search::exa::DEFAULT_BASE_URL.to_string()),
        });

        Ok(Config {
            watsonx: WatsonxConfig {
                api_key,
                url: url.trim_end_matches('/').to_string(),
                project_id,
                iam_url: read(WATSONX_IAM_URL_ENV)
                    .unwrap_or_else(|| crate::llm::auth::DEFAULT_IAM_URL.to_string()),
            },
            exa,
            settings,
        })
    }
}
