//! Next best action selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::signal::{BantInfo, BantSignal};
use super::stage::Stage;

/// The single recommended conversational move for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionTag {
    ScheduleMeeting,
    AskBudget,
    AskAuthority,
    AskNeed,
    AskTiming,
    DiscoverPain,
    ContinueDiscovery,
}

impl ActionTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionTag::ScheduleMeeting => "SCHEDULE_MEETING",
            ActionTag::AskBudget => "ASK_BUDGET",
            ActionTag::AskAuthority => "ASK_AUTHORITY",
            ActionTag::AskNeed => "ASK_NEED",
            ActionTag::AskTiming => "ASK_TIMING",
            ActionTag::DiscoverPain => "DISCOVER_PAIN",
            ActionTag::ContinueDiscovery => "CONTINUE_DISCOVERY",
        }
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority when exactly one signal is missing: easy facts first.
const ALMOST_DONE_ORDER: [BantSignal; 4] = [
    BantSignal::Budget,
    BantSignal::Authority,
    BantSignal::Need,
    BantSignal::Timing,
];

/// Priority when two or more signals are missing: pain first.
const DISCOVERY_ORDER: [BantSignal; 4] = [
    BantSignal::Need,
    BantSignal::Timing,
    BantSignal::Authority,
    BantSignal::Budget,
];

/// Picks the next action from signal completeness.
///
/// The two priority orders differ on purpose and must not be unified.
#[derive(Debug, Clone, Copy, Default)]
pub struct NextActionResolver;

impl NextActionResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, info: &BantInfo, stage: Stage) -> ActionTag {
        if stage == Stage::Opening {
            return ActionTag::ContinueDiscovery;
        }

        let completeness = info.completeness();
        match completeness.count() {
            4 => ActionTag::ScheduleMeeting,
            3 => completeness
                .first_missing(&ALMOST_DONE_ORDER)
                .map(ask_for)
                .unwrap_or(ActionTag::ContinueDiscovery),
            _ => completeness
                .first_missing(&DISCOVERY_ORDER)
                .map(discover)
                .unwrap_or(ActionTag::ContinueDiscovery),
        }
    }
}

fn ask_for(signal: BantSignal) -> ActionTag {
    match signal {
        BantSignal::Budget => ActionTag::AskBudget,
        BantSignal::Authority => ActionTag::AskAuthority,
        BantSignal::Need => ActionTag::AskNeed,
        BantSignal::Timing => ActionTag::AskTiming,
    }
}

fn discover(signal: BantSignal) -> ActionTag {
    match signal {
        BantSignal::Need => ActionTag::DiscoverPain,
        other => ask_for(other),
    }
}
