/// Environment and TOML configuration.
pub mod config;

pub use config::{Config, ConfigError, GenerationParams, Settings};
