//! Sales Agent - Conversational SDR driving BANT qualification
//!
//! This crate wraps an LLM in a deterministic sales state machine: every
//! turn re-derives Budget, Authority, Need and Timing from the chat history,
//! picks the conversation stage, steers the model with stage instructions,
//! and persists a per-contact qualification state.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod startup;
