//! Tools the LLM can invoke during a turn.

mod tool_call;
mod tool_definition;
mod tool_registry;

pub use tool_call::{ToolCall, ToolResponse};
pub use tool_definition::ToolDefinition;
pub use tool_registry::{ToolRegistry, ToolRegistryBuilder, ToolRegistryError};
