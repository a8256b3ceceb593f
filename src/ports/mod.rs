//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `LlmProvider` - Chat completion with tool calling
//! - `StateStore` - Per-contact persisted conversation state
//! - `ToolHandler` - One named side-effecting capability
//! - `ResponseCache` - Answer cache for the assistant path

mod ai_provider;
mod response_cache;
mod state_store;
mod tool_handler;

pub use ai_provider::{
    AIError, CompletionRequest, CompletionResponse, FinishReason, LlmProvider, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use response_cache::ResponseCache;
pub use state_store::{StateStore, StateStoreError};
pub use tool_handler::{ToolError, ToolHandler};
