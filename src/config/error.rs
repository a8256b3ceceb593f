//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("max_retries must be at most {max}, got {got}")]
    TooManyRetries { max: u32, got: u32 },

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("Invalid AI base URL format")]
    InvalidBaseUrl,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Invalid tool configuration for '{name}': {reason}")]
    InvalidTool { name: String, reason: String },
}
