//! OpenAI Provider - Implementation of LlmProvider for OpenAI's chat API.
//!
//! Supports function calling: tool definitions are sent with the request and
//! `tool_calls` in the response are surfaced as [`ToolCall`]s.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o-mini")
//!     .with_base_url("https://api.openai.com/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```
//!
//! # Retries
//!
//! Retryable failures (rate limits, 5xx, network, timeouts) are retried up
//! to `max_retries` times with exponential backoff starting at 1s.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::tools::ToolCall;
use crate::ports::{
    AIError, CompletionRequest, CompletionResponse, FinishReason, LlmProvider, MessageRole,
    ProviderInfo, TokenUsage,
};

/// Backoff stops doubling after 32s.
const MAX_BACKOFF_EXPONENT: u32 = 5;

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 1,
        }
    }

    /// Creates a configuration from an already-wrapped secret.
    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            ..Self::new(String::new())
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new OpenAI provider with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if the HTTP client cannot be built.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts our request to OpenAI's format.
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        if let Some(ref prompt) = request.system_prompt {
            messages.push(OpenAIMessage::plain("system", prompt.clone()));
        }

        for msg in &request.messages {
            let role = match msg.role {
                MessageRole::System => "system",
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
                MessageRole::Tool => "tool",
            };

            let tool_calls = if msg.tool_calls.is_empty() {
                None
            } else {
                Some(msg.tool_calls.iter().map(OpenAIToolCall::from).collect())
            };

            messages.push(OpenAIMessage {
                role: role.to_string(),
                content: Some(msg.content.clone()),
                tool_calls,
                tool_call_id: msg.tool_call_id.clone(),
            });
        }

        let tools = if request.tools.is_empty() {
            None
        } else {
            Some(request.tools.iter().map(|t| t.to_openai_format()).collect())
        };

        OpenAIRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            tools,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let openai_request = self.to_openai_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(Self::parse_retry_after(&error_body))),
            400 => Err(AIError::InvalidRequest(error_body)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses retry-after from an error body, defaulting to 30 seconds.
    fn parse_retry_after(error_body: &str) -> u32 {
        let message = serde_json::from_str::<serde_json::Value>(error_body)
            .ok()
            .and_then(|v| v.get("error")?.get("message")?.as_str().map(str::to_string));

        message
            .as_deref()
            .and_then(|s| s.find("try again in ").map(|idx| &s[idx + 13..]))
            .and_then(|rest| {
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse::<u32>().ok()
            })
            .unwrap_or(30)
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        Self::into_completion(openai_response)
    }

    fn into_completion(openai_response: OpenAIResponse) -> Result<CompletionResponse, AIError> {
        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AIError::parse("No choices in response"))?;

        let tool_calls: Vec<ToolCall> = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|c| ToolCall::new(c.id, c.function.name, c.function.arguments))
            .collect();

        let finish_reason = match choice.finish_reason.as_deref() {
            Some("length") => FinishReason::Length,
            Some("tool_calls") | Some("function_call") => FinishReason::ToolCalls,
            _ if !tool_calls.is_empty() => FinishReason::ToolCalls,
            _ => FinishReason::Stop,
        };

        let usage = openai_response
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(CompletionResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            usage,
            model: openai_response.model,
            finish_reason,
        })
    }

    async fn attempt(&self, request: &CompletionRequest) -> Result<CompletionResponse, AIError> {
        let response = self.send_request(request).await?;
        self.parse_response(response).await
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let mut retry_count = 0;

        loop {
            match self.attempt(&request).await {
                Ok(completion) => {
                    debug!(
                        model = %completion.model,
                        total_tokens = completion.usage.total_tokens,
                        tool_calls = completion.tool_calls.len(),
                        "OpenAI completion received"
                    );
                    return Ok(completion);
                }
                Err(err) if err.is_retryable() && retry_count < self.config.max_retries => {
                    // Exponential backoff: 1s, 2s, 4s, ...
                    let delay = Duration::from_secs(1 << retry_count.min(MAX_BACKOFF_EXPONENT));
                    warn!(
                        error = %err,
                        attempt = retry_count + 1,
                        delay_secs = delay.as_secs(),
                        "Retrying OpenAI completion"
                    );
                    sleep(delay).await;
                    retry_count += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", &self.config.model)
    }
}

// ----- OpenAI API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAIToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl OpenAIMessage {
    fn plain(role: &str, content: String) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIToolCall {
    id: String,
    #[serde(rename = "type", default = "function_type")]
    kind: String,
    function: OpenAIFunctionCall,
}

fn function_type() -> String {
    "function".to_string()
}

impl From<&ToolCall> for OpenAIToolCall {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            kind: function_type(),
            function: OpenAIFunctionCall {
                name: call.name.clone(),
                arguments: call.arguments.clone(),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: String,
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
