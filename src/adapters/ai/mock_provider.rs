//! Mock AI Provider for testing.
//!
//! Provides a configurable mock implementation of the LlmProvider port,
//! allowing tests to run without calling real LLM APIs.
//!
//! # Features
//!
//! - Pre-configured text or tool-call responses
//! - Simulated delays for timeout testing
//! - Error injection for resilience testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_tool_call("schedule_meeting", r#"{"date":"amanhã"}"#)
//!     .with_response("Reunião marcada!");
//!
//! let response = provider.complete(request).await?;
//! assert!(response.has_tool_calls());
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::tools::ToolCall;
use crate::ports::{
    AIError, CompletionRequest, CompletionResponse, FinishReason, LlmProvider, ProviderInfo,
    TokenUsage,
};

/// Mock LLM provider for testing.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a text completion.
    Text(String),
    /// Return a completion requesting tools.
    ToolCalls(Vec<ToolCall>),
    /// Return an error.
    Error(AIError),
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn push(self, response: MockResponse) -> Self {
        lock(&self.responses).push_back(response);
        self
    }

    /// Adds a text response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Text(content.into()))
    }

    /// Adds a response requesting a single tool call.
    ///
    /// Call ids are generated from the queue position so they are unique
    /// within one mock.
    pub fn with_tool_call(self, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        let id = format!("call_{}", lock(&self.responses).len());
        self.push(MockResponse::ToolCalls(vec![ToolCall::new(id, name, arguments)]))
    }

    /// Adds a response requesting several tool calls.
    pub fn with_tool_calls(self, calls: Vec<ToolCall>) -> Self {
        self.push(MockResponse::ToolCalls(calls))
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: AIError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        lock(&self.calls).clone()
    }

    /// Returns the most recent call, if any.
    pub fn last_call(&self) -> Option<CompletionRequest> {
        lock(&self.calls).last().cloned()
    }

    fn next_response(&self) -> MockResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Text("Mock response".to_string()))
    }
}

#[async_trait]
impl LlmProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Text(content) => Ok(CompletionResponse {
                content,
                tool_calls: Vec::new(),
                usage: TokenUsage::new(10, 20),
                model: self.info.model.clone(),
                finish_reason: FinishReason::Stop,
            }),
            MockResponse::ToolCalls(calls) => {
                Ok(CompletionResponse::with_tool_calls(calls, self.info.model.clone()))
            }
            MockResponse::Error(err) => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::RequestId;
    use crate::ports::{Message, RequestMetadata};

    fn test_request() -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(RequestId::new(), None))
            .with_message(Message::user("Olá"))
    }

    #[tokio::test]
    async fn returns_responses_in_order() {
        let provider = MockAIProvider::new().with_response("Primeira").with_response("Segunda");

        let r1 = provider.complete(test_request()).await.unwrap();
        let r2 = provider.complete(test_request()).await.unwrap();

        assert_eq!(r1.content, "Primeira");
        assert_eq!(r2.content, "Segunda");
        assert_eq!(r1.model, "mock-model-1");
    }

    #[tokio::test]
    async fn returns_default_after_exhausted() {
        let provider = MockAIProvider::new();
        let response = provider.complete(test_request()).await.unwrap();
        assert_eq!(response.content, "Mock response");
    }

    #[tokio::test]
    async fn returns_tool_calls_with_unique_ids() {
        let provider = MockAIProvider::new()
            .with_tool_call("schedule_meeting", "{}")
            .with_tool_call("change_theme", "{}");

        let first = provider.complete(test_request()).await.unwrap();
        let second = provider.complete(test_request()).await.unwrap();

        assert!(first.has_tool_calls());
        assert_eq!(first.tool_calls[0].name, "schedule_meeting");
        assert_ne!(first.tool_calls[0].id, second.tool_calls[0].id);
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let provider = MockAIProvider::new().with_error(AIError::rate_limited(30));

        let err = provider.complete(test_request()).await.unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(err, AIError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn tracks_calls() {
        let provider = MockAIProvider::new();
        assert_eq!(provider.call_count(), 0);

        provider.complete(test_request()).await.unwrap();
        provider.complete(test_request()).await.unwrap();

        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.last_call().unwrap().messages[0].content, "Olá");
    }

    #[tokio::test]
    async fn respects_delay() {
        let provider = MockAIProvider::new().with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        provider.complete(test_request()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
