//! BANT qualification domain module.
//!
//! Infers the hidden state of a sales conversation from raw chat history.
//! Everything here is synchronous and deterministic: the same history always
//! yields the same signals, stage, score and next action.
//!
//! # Components
//!
//! - [`EntityExtractor`] - negation-guarded pattern matching for the four signals
//! - [`StageDetector`] - maps signals + history to the current [`Stage`]
//! - [`StagePromptBuilder`] - renders the per-stage LLM instructions
//! - [`QualificationScorer`] - weighted 0-100 lead score
//! - [`NextActionResolver`] - the single next conversational move
//! - [`BantFramework`] - composes the above into one analysis per turn

mod extractor;
mod framework;
mod next_action;
pub mod patterns;
mod scoring;
mod signal;
mod stage;
mod templates;

pub use extractor::EntityExtractor;
pub use framework::{BantAnalysis, BantFramework};
pub use next_action::{ActionTag, NextActionResolver};
pub use scoring::{QualificationScorer, QualificationTier};
pub use signal::{BantInfo, BantSignal, Completeness};
pub use stage::{Stage, StageDetector};
pub use templates::{stage_template, StagePromptBuilder, StageTemplate, NOT_INFORMED, STAGE_TEMPLATES};
