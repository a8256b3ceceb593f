//! AI provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Retries beyond this would sleep over half a minute in backoff alone.
pub const MAX_RETRIES: u32 = 5;

/// AI provider configuration
///
/// The API key is optional: without it the agent still serves requests and
/// answers with an instructive "not configured" message.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key
    pub api_key: Option<Secret<String>>,

    /// Chat model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL (OpenAI or a compatible gateway)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on transient failure, at most [`MAX_RETRIES`]
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per completion
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Worst-case time for one completion including retries and backoff.
    ///
    /// Backoff doubles from 1s, so `n` retries sleep `2^n - 1` seconds.
    pub fn completion_budget(&self) -> Duration {
        let attempts = self.max_retries.saturating_add(1);
        let backoff_secs = (1u64 << self.max_retries.min(MAX_RETRIES)) - 1;
        self.timeout() * attempts + Duration::from_secs(backoff_secs)
    }

    /// Check if a usable API key is present
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_retries > MAX_RETRIES {
            return Err(ValidationError::TooManyRetries {
                max: MAX_RETRIES,
                got: self.max_retries,
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    1
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.max_retries, 1);
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 30,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_completion_budget_covers_retries() {
        let config = AiConfig::default();
        assert_eq!(config.completion_budget(), Duration::from_secs(60 * 2 + 1));

        let config = AiConfig {
            max_retries: 0,
            ..Default::default()
        };
        assert_eq!(config.completion_budget(), Duration::from_secs(60));
    }

    #[test]
    fn test_blank_key_is_not_configured() {
        let config = AiConfig {
            api_key: Some(Secret::new("   ".to_string())),
            ..Default::default()
        };
        assert!(!config.has_api_key());

        let config = AiConfig {
            api_key: Some(Secret::new("sk-xxx".to_string())),
            ..Default::default()
        };
        assert!(config.has_api_key());
    }

    #[test]
    fn test_missing_key_is_still_valid() {
        assert!(AiConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = AiConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));

        let config = AiConfig {
            base_url: "api.openai.com".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidBaseUrl));

        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_retries_are_capped() {
        let config = AiConfig {
            max_retries: MAX_RETRIES,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.completion_budget(), Duration::from_secs(60 * 6 + 31));

        let config = AiConfig {
            max_retries: 40,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::TooManyRetries { max: 5, got: 40 })
        );
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let config = AiConfig {
            api_key: Some(Secret::new("sk-very-secret".to_string())),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }
}
