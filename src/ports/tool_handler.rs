//! Tool Handler Port - Interface for executing one named tool.
//!
//! Tools are opaque side-effecting capabilities (calendar scheduling,
//! spreadsheet operations, theme changes). Handlers are registered by name
//! in the [`ToolRegistry`](crate::domain::tools::ToolRegistry), which owns
//! argument parsing and error conversion.

use async_trait::async_trait;
use thiserror::Error;

/// Errors a tool handler can report.
///
/// None of these fail the turn: the registry converts them into a failure
/// payload that is fed back to the LLM.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Tool unavailable: {0}")]
    Unavailable(String),

    #[error("Tool timed out")]
    Timeout,
}

/// Port for executing a single tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Executes the tool with parsed JSON-object arguments.
    async fn execute(&self, arguments: serde_json::Value) -> Result<serde_json::Value, ToolError>;
}
