//! Application configuration module
//!
//! This module provides type-safe configuration loading using the `config`
//! and `dotenvy` crates. Values come from an optional `sales-agent.yaml` file
//! in the working directory and from environment variables with the
//! `SALES_AGENT` prefix; nested values use double underscores as separators.
//! Environment variables win over the file.
//!
//! # Example
//!
//! ```no_run
//! use sales_agent::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.listen_addr().unwrap());
//! ```

mod agent;
mod ai;
mod error;
mod server;
mod storage;
mod tools;

pub use agent::AgentConfig;
pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use storage::{StorageBackend, StorageConfig};
pub use tools::ToolConfig;

use serde::Deserialize;

/// Config file looked up in the working directory (any supported extension).
const CONFIG_FILE_NAME: &str = "sales-agent";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// (if unconfigured) agent. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// LLM provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Conversation state storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Agent persona
    #[serde(default)]
    pub agent: AgentConfig,

    /// External tools offered to the LLM
    #[serde(default)]
    pub tools: Vec<ToolConfig>,
}

impl AppConfig {
    /// Load configuration from `sales-agent.yaml` and environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads `sales-agent.{yaml,json,toml}` if present
    /// 3. Reads environment variables with `SALES_AGENT` prefix
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SALES_AGENT__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SALES_AGENT__AI__API_KEY=sk-...` -> `ai.api_key = sk-...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is malformed or values cannot be
    /// parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        Self::load_with(config::File::with_name(CONFIG_FILE_NAME).required(false))
    }

    /// Load from a YAML document plus the environment.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::load_with(config::File::from_str(yaml, config::FileFormat::Yaml))
    }

    fn load_with<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::default()
                    .prefix("SALES_AGENT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.storage.validate()?;
        for tool in &self.tools {
            tool.validate()?;
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
