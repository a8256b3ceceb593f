//! LLM Provider Port - Interface for chat completion backends.
//!
//! This port abstracts all interactions with LLM providers, so the
//! orchestrator can request completions and tool calls without coupling to a
//! specific vendor API.
//!
//! # Design
//!
//! - Provider-agnostic message format, including tool call round trips
//! - A completion carries text, tool calls, or both
//! - Error types for common failure modes, with retry classification
//!
//! # Example
//!
//! ```ignore
//! use async_trait::async_trait;
//!
//! struct FixedProvider;
//!
//! #[async_trait]
//! impl LlmProvider for FixedProvider {
//!     async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
//!         Ok(CompletionResponse::text("Olá!", "fixed"))
//!     }
//!
//!     fn provider_info(&self) -> ProviderInfo {
//!         ProviderInfo::new("fixed", "fixed")
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::{ConversationTurn, Role};
use crate::domain::foundation::{ContactId, RequestId};
use crate::domain::tools::{ToolCall, ToolDefinition, ToolResponse};

/// Port for LLM provider interactions.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a single completion.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for a completion.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Conversation messages (history, current lead message, tool results).
    pub messages: Vec<Message>,
    /// System prompt to guide model behavior.
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Temperature for response randomness.
    pub temperature: Option<f32>,
    /// Tools the model may call.
    pub tools: Vec<ToolDefinition>,
    /// Request metadata for tracing.
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            messages: Vec::new(),
            system_prompt: None,
            max_tokens: None,
            temperature: None,
            tools: Vec::new(),
            metadata,
        }
    }

    /// Adds a message to the conversation.
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Appends history turns as messages.
    pub fn with_history(mut self, history: &[ConversationTurn]) -> Self {
        self.messages.extend(history.iter().map(Message::from));
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }
}

/// A message in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message.
    pub role: MessageRole,
    /// Message content.
    pub content: String,
    /// Tool calls requested by an assistant message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// The call a tool message answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// An assistant message that requested tool calls.
    pub fn assistant_tool_calls(content: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls,
            ..Self::new(MessageRole::Assistant, content)
        }
    }

    /// The result of a tool call, addressed to the call id.
    pub fn tool_result(response: &ToolResponse) -> Self {
        Self {
            tool_call_id: Some(response.tool_call_id.clone()),
            ..Self::new(MessageRole::Tool, response.to_content())
        }
    }
}

impl From<&ConversationTurn> for Message {
    fn from(turn: &ConversationTurn) -> Self {
        let role = match turn.role {
            Role::User => MessageRole::User,
            Role::Assistant => MessageRole::Assistant,
            Role::System => MessageRole::System,
        };
        Self::new(role, turn.content.clone())
    }
}

/// Role of the message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    /// Result of a tool call.
    Tool,
}

/// Request metadata for tracing.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    pub request_id: RequestId,
    /// Contact the turn belongs to, if any.
    pub contact_id: Option<ContactId>,
}

impl RequestMetadata {
    pub fn new(request_id: RequestId, contact_id: Option<ContactId>) -> Self {
        Self {
            request_id,
            contact_id,
        }
    }
}

/// Response from a completion.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text. May be empty when the model only requested tools.
    pub content: String,
    /// Tools the model asked to run.
    pub tool_calls: Vec<ToolCall>,
    /// Token usage.
    pub usage: TokenUsage,
    /// Model that generated the response.
    pub model: String,
    /// Why the model stopped generating.
    pub finish_reason: FinishReason,
}

impl CompletionResponse {
    /// A plain text response.
    pub fn text(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
            usage: TokenUsage::zero(),
            model: model.into(),
            finish_reason: FinishReason::Stop,
        }
    }

    /// A response requesting tool calls.
    pub fn with_tool_calls(tool_calls: Vec<ToolCall>, model: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            tool_calls,
            usage: TokenUsage::zero(),
            model: model.into(),
            finish_reason: FinishReason::ToolCalls,
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural stop (end of response).
    Stop,
    /// Hit max_tokens limit.
    Length,
    /// The model wants tool results before answering.
    ToolCalls,
}

/// Provider information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "openai", "mock").
    pub name: String,
    /// Model identifier.
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// LLM provider errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AIError {
    /// Rate limited by provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> RequestMetadata {
        RequestMetadata::new(RequestId::new(), ContactId::new("5511999990000").ok())
    }

    #[test]
    fn completion_request_builder_works() {
        let request = CompletionRequest::new(metadata())
            .with_message(Message::user("Olá"))
            .with_system_prompt("Seja cordial")
            .with_max_tokens(100)
            .with_temperature(0.7)
            .with_tools(vec![ToolDefinition::without_parameters("change_theme", "x")]);

        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, MessageRole::User);
        assert_eq!(request.system_prompt.as_deref(), Some("Seja cordial"));
        assert_eq!(request.max_tokens, Some(100));
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.tools.len(), 1);
    }

    #[test]
    fn history_turns_map_to_message_roles() {
        let history = vec![
            ConversationTurn::system("s"),
            ConversationTurn::user("u"),
            ConversationTurn::assistant("a"),
        ];
        let request = CompletionRequest::new(metadata()).with_history(&history);
        let roles: Vec<MessageRole> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::System, MessageRole::User, MessageRole::Assistant]
        );
    }

    #[test]
    fn tool_result_message_addresses_call() {
        let call = ToolCall::new("call_9", "schedule_meeting", "{}");
        let message = Message::tool_result(&ToolResponse::failure(&call, "offline"));

        assert_eq!(message.role, MessageRole::Tool);
        assert_eq!(message.tool_call_id.as_deref(), Some("call_9"));
        assert!(message.content.contains("offline"));
    }

    #[test]
    fn tool_call_response_reports_tool_calls() {
        let response = CompletionResponse::with_tool_calls(
            vec![ToolCall::new("c", "change_theme", "{}")],
            "mock",
        );
        assert!(response.has_tool_calls());
        assert_eq!(response.finish_reason, FinishReason::ToolCalls);
        assert!(!CompletionResponse::text("oi", "mock").has_tool_calls());
    }

    #[test]
    fn token_usage_calculates_total() {
        let usage = TokenUsage::new(100, 50);
        assert_eq!(usage.total_tokens, 150);
    }

    #[test]
    fn ai_error_retryable_classification() {
        assert!(AIError::rate_limited(30).is_retryable());
        assert!(AIError::unavailable("down").is_retryable());
        assert!(AIError::network("reset").is_retryable());
        assert!(AIError::Timeout { timeout_secs: 30 }.is_retryable());

        assert!(!AIError::AuthenticationFailed.is_retryable());
        assert!(!AIError::InvalidRequest("context_length_exceeded".into()).is_retryable());
        assert!(!AIError::parse("bad json").is_retryable());
    }

    #[test]
    fn message_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MessageRole::Tool).unwrap(), "\"tool\"");
        assert_eq!(serde_json::to_string(&MessageRole::Assistant).unwrap(), "\"assistant\"");
    }

    #[test]
    fn ai_error_displays_correctly() {
        assert_eq!(AIError::rate_limited(30).to_string(), "rate limited: retry after 30s");
        assert_eq!(
            AIError::Timeout { timeout_secs: 60 }.to_string(),
            "request timed out after 60s"
        );
    }
}
