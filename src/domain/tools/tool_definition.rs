//! Tool definition - schema and metadata for a tool.

use serde::{Deserialize, Serialize};

/// Definition of a tool the LLM may invoke.
///
/// # Examples
///
/// ```
/// use sales_agent::domain::tools::ToolDefinition;
///
/// let definition = ToolDefinition::new(
///     "schedule_meeting",
///     "Agenda uma reunião com o lead",
///     serde_json::json!({
///         "type": "object",
///         "required": ["date"],
///         "properties": { "date": { "type": "string" } }
///     }),
/// );
/// assert_eq!(definition.name(), "schedule_meeting");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    name: String,
    description: String,
    /// JSON Schema for the arguments.
    parameters: serde_json::Value,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Creates a definition that takes no arguments.
    pub fn without_parameters(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            name,
            description,
            serde_json::json!({ "type": "object", "properties": {} }),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &serde_json::Value {
        &self.parameters
    }

    /// Converts to OpenAI function-calling format.
    pub fn to_openai_format(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_format_wraps_function() {
        let definition = ToolDefinition::without_parameters("change_theme", "Troca o tema");
        let json = definition.to_openai_format();

        assert_eq!(json["type"], "function");
        assert_eq!(json["function"]["name"], "change_theme");
        assert_eq!(json["function"]["description"], "Troca o tema");
        assert_eq!(json["function"]["parameters"]["type"], "object");
    }
}
