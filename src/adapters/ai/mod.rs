//! AI Provider Adapters.
//!
//! Implementations of the LlmProvider port.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenAIProvider` - OpenAI chat completions with function calling

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
