//! Data transfer objects for turn endpoints.

use serde::{Deserialize, Serialize};

use crate::application::ProcessTurnCommand;
use crate::domain::conversation::{ChannelKind, ConversationTurn};

// ═══════════════════════════════════════════════════════════════════════════
// Request DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Request to process one inbound message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTurnRequest {
    /// The new message
    pub text: String,
    /// Prior turns, oldest first
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
    /// Inbound channel (whatsapp, web, voice, dashboard)
    pub channel: ChannelKind,
    /// Lead identifier; required for whatsapp and web
    pub contact_id: Option<String>,
}

impl From<ProcessTurnRequest> for ProcessTurnCommand {
    fn from(request: ProcessTurnRequest) -> Self {
        ProcessTurnCommand {
            text: request.text,
            history: request.history,
            channel: request.channel,
            contact_id: request.contact_id,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Response DTOs
// ═══════════════════════════════════════════════════════════════════════════

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Whether an LLM credential is configured
    pub llm_configured: bool,
}

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Role;
    use serde_json::json;

    #[test]
    fn request_deserializes_from_camel_case() {
        let request: ProcessTurnRequest = serde_json::from_value(json!({
            "text": "sim, faz sentido",
            "channel": "whatsapp",
            "contactId": "5511999990000",
            "history": [
                { "role": "assistant", "content": "Isso acontece aí também?" }
            ]
        }))
        .unwrap();

        assert_eq!(request.channel, ChannelKind::Whatsapp);
        assert_eq!(request.contact_id.as_deref(), Some("5511999990000"));
        assert_eq!(request.history[0].role, Role::Assistant);
    }

    #[test]
    fn history_and_contact_are_optional() {
        let request: ProcessTurnRequest =
            serde_json::from_value(json!({ "text": "muda o tema", "channel": "dashboard" }))
                .unwrap();

        let command = ProcessTurnCommand::from(request);
        assert!(command.history.is_empty());
        assert!(command.contact_id.is_none());
    }

    #[test]
    fn unknown_channel_is_rejected() {
        let result: Result<ProcessTurnRequest, _> =
            serde_json::from_value(json!({ "text": "oi", "channel": "telegram" }));
        assert!(result.is_err());
    }
}
