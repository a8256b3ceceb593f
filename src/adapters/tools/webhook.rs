//! Webhook Tool Handler - forwards tool calls to an HTTP endpoint.
//!
//! The arguments object is POSTed as the JSON body. A JSON response body is
//! returned to the LLM as-is; a plain-text body is wrapped as
//! `{"result": "..."}`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::ports::{ToolError, ToolHandler};

/// Executes a tool by calling a remote endpoint.
#[derive(Debug, Clone)]
pub struct WebhookToolHandler {
    client: Client,
    url: String,
}

impl WebhookToolHandler {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ToolError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ToolError::Unavailable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ToolHandler for WebhookToolHandler {
    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        debug!(url = %self.url, "Calling tool endpoint");

        let response = self
            .client
            .post(&self.url)
            .json(&arguments)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ToolError::ExecutionFailed(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(map_status(status, body));
        }

        Ok(parse_body(&body))
    }
}

fn map_transport_error(e: reqwest::Error) -> ToolError {
    if e.is_timeout() {
        ToolError::Timeout
    } else {
        ToolError::Unavailable(e.to_string())
    }
}

fn map_status(status: StatusCode, body: String) -> ToolError {
    let detail = if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, body.trim())
    };

    if status.is_client_error() {
        ToolError::InvalidArguments(detail)
    } else if status == StatusCode::SERVICE_UNAVAILABLE {
        ToolError::Unavailable(detail)
    } else {
        ToolError::ExecutionFailed(detail)
    }
}

fn parse_body(body: &str) -> Value {
    let body = body.trim();
    if body.is_empty() {
        return json!({ "ok": true });
    }
    serde_json::from_str(body).unwrap_or_else(|_| json!({ "result": body }))
}
