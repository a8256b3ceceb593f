//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `bant` - BANT signal extraction, stage detection, scoring and prompts
//! - `conversation` - History turns, channels and persisted per-contact state
//! - `tools` - Tool calls and the validated tool registry

pub mod bant;
pub mod conversation;
pub mod foundation;
pub mod tools;
