//! Tool call and response types.
//!
//! These are the request/response value objects exchanged with the LLM when
//! it asks for a side effect (scheduling, spreadsheets, theme changes).

use serde::{Deserialize, Serialize};

/// A request from the LLM to invoke a tool.
///
/// `arguments` is kept as the raw JSON string the model produced. It is only
/// parsed at dispatch time, so malformed arguments become a failure payload
/// instead of breaking response parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned id, echoed back with the result.
    pub id: String,
    pub name: String,
    pub arguments: String,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// Parses the arguments as a JSON object.
    ///
    /// An empty string is treated as `{}`, which some models send for
    /// parameterless tools.
    pub fn parse_arguments(&self) -> Result<serde_json::Value, String> {
        if self.arguments.trim().is_empty() {
            return Ok(serde_json::json!({}));
        }

        let value: serde_json::Value = serde_json::from_str(&self.arguments)
            .map_err(|e| format!("malformed arguments: {}", e))?;

        if value.is_object() {
            Ok(value)
        } else {
            Err("arguments must be a JSON object".to_string())
        }
    }
}

/// The result of one tool call, fed back to the LLM.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub tool_call_id: String,
    pub name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResponse {
    /// Creates a successful response.
    pub fn success(call: &ToolCall, data: serde_json::Value) -> Self {
        Self {
            tool_call_id: call.id.clone(),
            name: call.name.clone(),
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Creates a failure response.
    pub fn failure(call: &ToolCall, error: impl Into<String>) -> Self {
        Self {
            tool_call_id: call.id.clone(),
            name: call.name.clone(),
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// JSON payload placed in the tool message content.
    pub fn to_content(&self) -> String {
        let payload = if self.success {
            serde_json::json!({ "success": true, "data": self.data })
        } else {
            serde_json::json!({ "success": false, "error": self.error })
        };
        payload.to_string()
    }
}
