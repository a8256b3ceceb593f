//! Tool configuration
//!
//! Tools are external capabilities (calendar scheduling, spreadsheet
//! operations, theme changes) reached over HTTP. They are usually declared in
//! `sales-agent.yaml`, since lists are awkward to express as env vars:
//!
//! ```yaml
//! tools:
//!   - name: schedule_meeting
//!     description: Agenda uma reunião com o lead
//!     url: http://calendar.internal/schedule
//!     paths: [sales]
//!     parameters:
//!       type: object
//!       required: [date]
//!       properties:
//!         date: { type: string }
//! ```

use serde::Deserialize;
use std::time::Duration;

use crate::domain::conversation::ConversationPath;

use super::error::ValidationError;

/// One externally hosted tool.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolConfig {
    pub name: String,

    pub description: String,

    /// JSON Schema for the arguments; omitted means "no arguments"
    pub parameters: Option<serde_json::Value>,

    /// Endpoint receiving the arguments as a JSON POST body
    pub url: String,

    /// Conversation paths the tool is offered on
    #[serde(default = "default_paths")]
    pub paths: Vec<ConversationPath>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ToolConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks what the registry cannot: the endpoint and the timeout.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidTool {
                name: self.name.clone(),
                reason: format!("url '{}' must be http(s)", self.url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTool {
                name: self.name.clone(),
                reason: "timeout_secs must be positive".to_string(),
            });
        }
        Ok(())
    }
}

fn default_paths() -> Vec<ConversationPath> {
    vec![ConversationPath::Sales, ConversationPath::Assistant]
}

fn default_timeout() -> u64 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(url: &str) -> ToolConfig {
        ToolConfig {
            name: "schedule_meeting".to_string(),
            description: "Agenda uma reunião".to_string(),
            parameters: None,
            url: url.to_string(),
            paths: default_paths(),
            timeout_secs: default_timeout(),
        }
    }

    #[test]
    fn test_http_urls_are_valid() {
        assert!(tool("http://calendar.internal/schedule").validate().is_ok());
        assert!(tool("https://calendar.example.com").validate().is_ok());
    }

    #[test]
    fn test_non_http_url_is_rejected() {
        assert!(matches!(
            tool("calendar.internal").validate(),
            Err(ValidationError::InvalidTool { .. })
        ));
    }

    #[test]
    fn test_deserializes_with_defaults() {
        let config: ToolConfig = serde_json::from_value(serde_json::json!({
            "name": "change_theme",
            "description": "Troca o tema do dashboard",
            "url": "http://dashboard.internal/theme"
        }))
        .unwrap();

        assert_eq!(config.paths.len(), 2);
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert!(config.parameters.is_none());
    }
}
