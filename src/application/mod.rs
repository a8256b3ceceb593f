//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! A single command, [`ProcessTurnCommand`], drives the whole agent.

mod contact_locks;
pub mod handlers;
mod prompt;

pub use contact_locks::ContactLocks;
pub use handlers::{ProcessTurnCommand, ProcessTurnHandler, TurnError, TurnOutcome};
pub use prompt::{LLM_NOT_CONFIGURED_MESSAGE, TOOLS_ONLY_FALLBACK_ANSWER};
