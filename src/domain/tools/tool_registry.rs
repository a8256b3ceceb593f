//! Tool Registry - name to handler map validated at startup.
//!
//! Adding a tool means registering it here; dispatch never branches on tool
//! names.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use sales_agent::domain::conversation::ConversationPath;
//! use sales_agent::domain::tools::{ToolDefinition, ToolRegistry};
//! use sales_agent::ports::{ToolError, ToolHandler};
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl ToolHandler for Echo {
//!     async fn execute(&self, args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
//!         Ok(args)
//!     }
//! }
//!
//! let registry = ToolRegistry::builder()
//!     .register(
//!         ToolDefinition::without_parameters("echo", "Echoes arguments"),
//!         Arc::new(Echo),
//!         &[ConversationPath::Assistant],
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(registry.tools_for(ConversationPath::Assistant).len(), 1);
//! assert!(registry.tools_for(ConversationPath::Sales).is_empty());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::conversation::ConversationPath;
use crate::ports::ToolHandler;

use super::{ToolCall, ToolDefinition, ToolResponse};

/// Startup validation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolRegistryError {
    #[error("Tool name '{name}' must be non-empty snake_case")]
    InvalidName { name: String },

    #[error("Tool '{name}' is registered more than once")]
    Duplicate { name: String },

    #[error("Tool '{name}' has an invalid parameter schema: {reason}")]
    InvalidSchema { name: String, reason: String },

    #[error("Tool '{name}' is not available on any conversation path")]
    NoPaths { name: String },
}

struct RegisteredTool {
    definition: ToolDefinition,
    handler: Arc<dyn ToolHandler>,
    paths: Vec<ConversationPath>,
}

/// Validated set of tools available to the LLM.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
    /// Registration order, so tool listings are deterministic.
    order: Vec<String>,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry").field("tools", &self.order).finish()
    }
}

impl ToolRegistry {
    /// A registry with no tools.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Definitions offered to the LLM on a conversation path.
    pub fn tools_for(&self, path: ConversationPath) -> Vec<&ToolDefinition> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .filter(|tool| tool.paths.contains(&path))
            .map(|tool| &tool.definition)
            .collect()
    }

    /// Returns true if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Executes one tool call.
    ///
    /// Never fails: unknown tools, tools not offered on `path`, malformed
    /// arguments, and handler errors all become failure responses for the
    /// LLM to recover from.
    pub async fn dispatch(&self, call: &ToolCall, path: ConversationPath) -> ToolResponse {
        let tool = match self.tools.get(&call.name) {
            Some(tool) if tool.paths.contains(&path) => tool,
            _ => {
                warn!(tool = %call.name, %path, "LLM requested unknown tool");
                return ToolResponse::failure(call, format!("unknown tool: {}", call.name));
            }
        };

        let arguments = match call.parse_arguments() {
            Ok(arguments) => arguments,
            Err(reason) => {
                warn!(tool = %call.name, error = %reason, "Rejecting tool call arguments");
                return ToolResponse::failure(call, reason);
            }
        };

        debug!(tool = %call.name, "Executing tool");
        match tool.handler.execute(arguments).await {
            Ok(data) => ToolResponse::success(call, data),
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool execution failed");
                ToolResponse::failure(call, e.to_string())
            }
        }
    }
}

/// Collects registrations and validates them in [`build`](Self::build).
#[derive(Default)]
pub struct ToolRegistryBuilder {
    entries: Vec<RegisteredTool>,
}

impl ToolRegistryBuilder {
    pub fn register(
        mut self,
        definition: ToolDefinition,
        handler: Arc<dyn ToolHandler>,
        paths: &[ConversationPath],
    ) -> Self {
        self.entries.push(RegisteredTool {
            definition,
            handler,
            paths: paths.to_vec(),
        });
        self
    }

    /// Validates every registration and builds the registry.
    pub fn build(self) -> Result<ToolRegistry, ToolRegistryError> {
        let mut registry = ToolRegistry::empty();

        for entry in self.entries {
            let name = entry.definition.name().to_string();

            if !is_snake_case(&name) {
                return Err(ToolRegistryError::InvalidName { name });
            }
            if registry.tools.contains_key(&name) {
                return Err(ToolRegistryError::Duplicate { name });
            }
            if entry.definition.parameters().get("type").and_then(|t| t.as_str()) != Some("object")
            {
                return Err(ToolRegistryError::InvalidSchema {
                    name,
                    reason: "parameters must be a JSON Schema with \"type\": \"object\"".to_string(),
                });
            }
            if entry.paths.is_empty() {
                return Err(ToolRegistryError::NoPaths { name });
            }

            registry.order.push(name.clone());
            registry.tools.insert(name, entry);
        }

        Ok(registry)
    }
}

fn is_snake_case(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}
