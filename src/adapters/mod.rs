//! Adapters - Implementations of port interfaces.
//!
//! Following hexagonal architecture, adapters implement the port traits
//! defined in the ports module. They handle external concerns like
//! HTTP, LLM APIs, and state persistence.
//!
//! - `ai` - LLM providers (OpenAI, mock)
//! - `cache` - Assistant-path response cache
//! - `http` - axum REST API
//! - `storage` - Per-contact state stores (memory, file, Redis)
//! - `tools` - Webhook-backed tool handlers and registry wiring

pub mod ai;
pub mod cache;
pub mod http;
pub mod storage;
pub mod tools;
