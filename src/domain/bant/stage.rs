//! Sales pipeline stages and deterministic stage detection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::conversation::{history_text, ConversationTurn, HistoryScope};

use super::patterns::{AFFIRMATIVE_PHRASES, MIN_TURNS_FOR_OPENING};
use super::signal::{BantInfo, BantSignal};

/// The current phase of a structured sales conversation.
///
/// Stages are strictly ordered: `Opening` < `Budget` < `Authority` <
/// `Need` < `Timing` < `Closing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Build rapport and earn interest. No pitch.
    Opening,
    /// Discover current spend.
    Budget,
    /// Discover who takes part in the decision.
    Authority,
    /// Discover and restate the pain.
    Need,
    /// Discover the desired timeframe.
    Timing,
    /// Recap and propose a meeting.
    Closing,
}

impl Stage {
    /// All stages in pipeline order.
    pub const ALL: [Stage; 6] = [
        Stage::Opening,
        Stage::Budget,
        Stage::Authority,
        Stage::Need,
        Stage::Timing,
        Stage::Closing,
    ];

    /// The stage that collects a given signal.
    pub fn for_signal(signal: BantSignal) -> Self {
        match signal {
            BantSignal::Budget => Stage::Budget,
            BantSignal::Authority => Stage::Authority,
            BantSignal::Need => Stage::Need,
            BantSignal::Timing => Stage::Timing,
        }
    }

    /// Stable lowercase name, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Opening => "opening",
            Stage::Budget => "budget",
            Stage::Authority => "authority",
            Stage::Need => "need",
            Stage::Timing => "timing",
            Stage::Closing => "closing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Computes the current stage from history and extracted signals.
///
/// There is no stored "current stage": the stage is recomputed every turn,
/// so it can never drift from the signals. Because extraction is
/// first-match-wins, a stage never regresses when the lead later
/// contradicts an earlier answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageDetector {
    scope: HistoryScope,
}

impl StageDetector {
    /// Creates a detector that reads every turn.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detector that looks for affirmatives only in `scope`.
    pub fn with_scope(scope: HistoryScope) -> Self {
        Self { scope }
    }

    /// Determines the stage for this turn.
    pub fn detect(&self, history: &[ConversationTurn], info: &BantInfo) -> Stage {
        if history.is_empty() || !self.opening_completed(history) {
            return Stage::Opening;
        }

        info.completeness()
            .first_missing(&BantSignal::ORDER)
            .map(Stage::for_signal)
            .unwrap_or(Stage::Closing)
    }

    /// True once the history has at least two turns and its text contains
    /// an affirmative phrase anywhere.
    pub fn opening_completed(&self, history: &[ConversationTurn]) -> bool {
        if history.len() < MIN_TURNS_FOR_OPENING {
            return false;
        }
        let text = history_text(history, self.scope);
        AFFIRMATIVE_PHRASES.iter().any(|phrase| text.contains(phrase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(messages: &[(&str, bool)]) -> Vec<ConversationTurn> {
        messages
            .iter()
            .map(|(content, from_lead)| {
                if *from_lead {
                    ConversationTurn::user(*content)
                } else {
                    ConversationTurn::assistant(*content)
                }
            })
            .collect()
    }

    fn interested() -> Vec<ConversationTurn> {
        turns(&[
            ("Olá! Muitas empresas perdem leads fora do horário comercial. Faz sentido pra você?", false),
            ("Sim, faz sentido", true),
        ])
    }

    fn info(budget: bool, authority: bool, need: bool, timing: bool) -> BantInfo {
        BantInfo {
            budget: budget.then(|| "r$5000".to_string()),
            authority: authority.then(|| "diretor".to_string()),
            need: need.then(|| "perdendo leads".to_string()),
            timing: timing.then(|| "urgente".to_string()),
        }
    }

    mod opening {
        use super::*;

        #[test]
        fn empty_history_is_opening() {
            let stage = StageDetector::new().detect(&[], &info(true, true, true, true));
            assert_eq!(stage, Stage::Opening);
        }

        #[test]
        fn single_turn_is_opening_even_with_interest() {
            let history = turns(&[("sim, quero saber mais", true)]);
            let stage = StageDetector::new().detect(&history, &BantInfo::default());
            assert_eq!(stage, Stage::Opening);
        }

        #[test]
        fn no_affirmative_interest_stays_opening() {
            let history = turns(&[("Oi, tudo bem?", false), ("quem é você?", true)]);
            let stage = StageDetector::new().detect(&history, &info(true, false, false, false));
            assert_eq!(stage, Stage::Opening);
        }

        #[test]
        fn assistant_affirmatives_complete_opening() {
            let history = turns(&[("Faz sentido pra você? Vocês investem r$ 3000 hoje?", false), ("oi", true)]);
            assert!(StageDetector::new().opening_completed(&history));
        }

        #[test]
        fn affirmative_matches_inside_words() {
            let history = turns(&[("Oi!", false), ("assim não dá", true)]);
            assert!(StageDetector::new().opening_completed(&history));
        }

        #[test]
        fn lead_only_scope_ignores_assistant_affirmatives() {
            let history = turns(&[("Faz sentido? Interessante, não?", false), ("hmm", true)]);
            let detector = StageDetector::with_scope(HistoryScope::LeadOnly);
            assert!(!detector.opening_completed(&history));
            assert_eq!(detector.detect(&history, &BantInfo::default()), Stage::Opening);
        }

        #[test]
        fn each_affirmative_phrase_completes_opening() {
            for phrase in AFFIRMATIVE_PHRASES {
                let history = turns(&[("Oi!", false), (phrase, true)]);
                assert!(
                    StageDetector::new().opening_completed(&history),
                    "phrase {:?} should complete opening",
                    phrase
                );
            }
        }
    }

    mod bant_order {
        use super::*;

        #[test]
        fn missing_budget_is_budget() {
            let stage = StageDetector::new().detect(&interested(), &BantInfo::default());
            assert_eq!(stage, Stage::Budget);
        }

        #[test]
        fn budget_known_is_authority() {
            let stage = StageDetector::new().detect(&interested(), &info(true, false, false, false));
            assert_eq!(stage, Stage::Authority);
        }

        #[test]
        fn budget_and_authority_known_is_need() {
            let stage = StageDetector::new().detect(&interested(), &info(true, true, false, false));
            assert_eq!(stage, Stage::Need);
        }

        #[test]
        fn only_timing_missing_is_timing() {
            let stage = StageDetector::new().detect(&interested(), &info(true, true, true, false));
            assert_eq!(stage, Stage::Timing);
        }

        #[test]
        fn first_gap_wins_over_later_signals() {
            let stage = StageDetector::new().detect(&interested(), &info(false, true, true, true));
            assert_eq!(stage, Stage::Budget);
        }

        #[test]
        fn all_known_is_closing() {
            let stage = StageDetector::new().detect(&interested(), &info(true, true, true, true));
            assert_eq!(stage, Stage::Closing);
        }
    }

    #[test]
    fn stages_are_strictly_ordered() {
        for pair in Stage::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn stage_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Stage::Closing).unwrap(), "\"closing\"");
        let stage: Stage = serde_json::from_str("\"authority\"").unwrap();
        assert_eq!(stage, Stage::Authority);
    }
}
