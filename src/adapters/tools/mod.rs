//! Tool Adapters
//!
//! Turns configured tools into a validated [`ToolRegistry`]. Every configured
//! tool is backed by a [`WebhookToolHandler`].

mod webhook;

pub use webhook::WebhookToolHandler;

use std::sync::Arc;

use crate::config::ToolConfig;
use crate::domain::tools::{ToolDefinition, ToolRegistry, ToolRegistryError};

/// Builds the tool registry from configuration.
///
/// # Errors
///
/// Returns `ToolRegistryError` if a name is invalid or duplicated, a schema
/// is not an object schema, a tool has no paths, or its HTTP client cannot
/// be built.
pub fn from_config(tools: &[ToolConfig]) -> Result<ToolRegistry, ToolRegistryError> {
    let mut builder = ToolRegistry::builder();

    for tool in tools {
        let definition = match &tool.parameters {
            Some(parameters) => {
                ToolDefinition::new(&tool.name, &tool.description, parameters.clone())
            }
            None => ToolDefinition::without_parameters(&tool.name, &tool.description),
        };
        let handler = WebhookToolHandler::new(&tool.url, tool.timeout()).map_err(|e| {
            ToolRegistryError::InvalidSchema {
                name: tool.name.clone(),
                reason: e.to_string(),
            }
        })?;

        builder = builder.register(definition, Arc::new(handler), &tool.paths);
    }

    builder.build()
}
