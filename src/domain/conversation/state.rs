//! Per-contact persisted conversation state.
//!
//! `EnhancedState` is a snapshot written at the end of every sales turn. The
//! stage and next action inside it are derived data: they are recomputed from
//! history each turn and stored only so other systems can read them. The
//! only fields carried forward from one turn to the next are the ones that
//! cannot be recomputed (stage turn counter, previous score for momentum).

use serde::{Deserialize, Serialize};

use crate::domain::bant::{ActionTag, BantAnalysis, BantInfo, Completeness, Stage};
use crate::domain::foundation::Timestamp;

use super::signals::{EngagementLevel, Momentum, Sentiment};

/// Turns (including the entering turn) after which a stage counts as stalled.
pub const STALLED_AFTER_STAGE_TURNS: u32 = 4;

/// Position within the current stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubState {
    /// First turn in this stage.
    #[default]
    Entering,
    /// Still working on the stage's signal.
    Probing,
    /// Too many turns without advancing.
    Stalled,
}

impl SubState {
    /// Sub-state for the given number of turns spent in the current stage.
    pub fn for_stage_turns(stage_turns: u32) -> Self {
        match stage_turns {
            0 | 1 => SubState::Entering,
            n if n < STALLED_AFTER_STAGE_TURNS => SubState::Probing,
            _ => SubState::Stalled,
        }
    }
}

/// How the last answer was produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseMode {
    #[default]
    Text,
    ToolAssisted,
}

/// Bookkeeping stored with the state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateMetadata {
    pub last_interaction_at: Timestamp,
    pub message_count: u32,
    pub bant_info: BantInfo,
    pub last_response_mode: ResponseMode,
    /// Turns spent in the current stage, including the entering turn.
    #[serde(default)]
    pub stage_turns: u32,
}

/// Persisted state for one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedState {
    pub stage: Stage,
    pub sub_state: SubState,
    pub qualification_score: u8,
    pub completeness: Completeness,
    pub sentiment: Sentiment,
    pub engagement_level: EngagementLevel,
    pub momentum: Momentum,
    pub next_best_action: Option<ActionTag>,
    pub metadata: StateMetadata,
}

/// Facts about the turn being recorded that the analysis does not carry.
#[derive(Debug, Clone, Copy)]
pub struct TurnFacts<'a> {
    pub lead_message: &'a str,
    pub message_count: u32,
    pub response_mode: ResponseMode,
    pub at: Timestamp,
}

impl EnhancedState {
    /// Builds the state to persist after a turn.
    ///
    /// `previous` is the state loaded at the start of the turn, or `None`
    /// for a fresh conversation.
    pub fn record_turn(
        previous: Option<&EnhancedState>,
        analysis: &BantAnalysis,
        facts: TurnFacts<'_>,
    ) -> Self {
        let stage_turns = match previous {
            Some(prev) if prev.stage == analysis.stage => prev.metadata.stage_turns.saturating_add(1),
            _ => 1,
        };
        let sub_state = SubState::for_stage_turns(stage_turns);
        let momentum = Momentum::detect(
            previous.map(|p| p.qualification_score),
            analysis.score,
            sub_state == SubState::Stalled,
        );

        Self {
            stage: analysis.stage,
            sub_state,
            qualification_score: analysis.score,
            completeness: analysis.completeness,
            sentiment: Sentiment::detect(facts.lead_message),
            engagement_level: EngagementLevel::detect(facts.lead_message),
            momentum,
            next_best_action: analysis.next_action,
            metadata: StateMetadata {
                last_interaction_at: facts.at,
                message_count: facts.message_count,
                bant_info: analysis.info.clone(),
                last_response_mode: facts.response_mode,
                stage_turns,
            },
        }
    }
}
