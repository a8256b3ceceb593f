//! Lightweight conversational signals derived each turn.
//!
//! These do not influence the stage or the next action. They are persisted
//! alongside the BANT state so operators can see how a lead is reacting.

use serde::{Deserialize, Serialize};

const POSITIVE_CUES: &[&str] = &[
    "ótimo",
    "otimo",
    "perfeito",
    "excelente",
    "gostei",
    "adorei",
    "legal",
    "show",
    "top",
    "obrigado",
    "obrigada",
    "massa",
];

const NEGATIVE_CUES: &[&str] = &[
    "não gostei",
    "não quero",
    "sem interesse",
    "não tenho interesse",
    "ruim",
    "péssimo",
    "pessimo",
    "chato",
    "spam",
    "pare de",
    "para de",
    "irritado",
    "irritada",
];

const LOW_ENGAGEMENT_MAX_CHARS: usize = 15;
const HIGH_ENGAGEMENT_MIN_CHARS: usize = 120;

/// Tone of the latest lead message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Classifies by counting positive and negative cue phrases.
    pub fn detect(message: &str) -> Self {
        let text = message.to_lowercase();
        let positive = POSITIVE_CUES.iter().filter(|c| text.contains(*c)).count();
        let negative = NEGATIVE_CUES.iter().filter(|c| text.contains(*c)).count();

        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }
}

/// How much effort the lead is putting into replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl EngagementLevel {
    /// Long messages or several questions read as high engagement; terse
    /// replies without a question read as low.
    pub fn detect(message: &str) -> Self {
        let chars = message.trim().chars().count();
        let questions = message.matches('?').count();

        if chars >= HIGH_ENGAGEMENT_MIN_CHARS || questions >= 2 {
            EngagementLevel::High
        } else if chars <= LOW_ENGAGEMENT_MAX_CHARS && questions == 0 {
            EngagementLevel::Low
        } else {
            EngagementLevel::Medium
        }
    }
}

/// Direction of qualification progress since the previous turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Momentum {
    Accelerating,
    #[default]
    Steady,
    Stalling,
}

impl Momentum {
    /// Compares the current score with the previous turn's.
    ///
    /// A first turn with any score counts as accelerating. An unchanged score
    /// is steady until the lead has been stuck in the same stage long enough
    /// to be stalled.
    pub fn detect(previous_score: Option<u8>, score: u8, stalled: bool) -> Self {
        let previous = previous_score.unwrap_or(0);
        if score > previous {
            Momentum::Accelerating
        } else if score < previous || stalled {
            Momentum::Stalling
        } else {
            Momentum::Steady
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sentiment {
        use super::*;

        #[test]
        fn positive_cues_win() {
            assert_eq!(Sentiment::detect("Perfeito, gostei muito!"), Sentiment::Positive);
        }

        #[test]
        fn negative_cues_win() {
            assert_eq!(Sentiment::detect("Não quero, isso é spam"), Sentiment::Negative);
        }

        #[test]
        fn no_cues_is_neutral() {
            assert_eq!(Sentiment::detect("Trabalhamos com varejo"), Sentiment::Neutral);
        }

        #[test]
        fn tied_cues_are_neutral() {
            assert_eq!(Sentiment::detect("legal, mas é chato"), Sentiment::Neutral);
        }
    }

    mod engagement {
        use super::*;

        #[test]
        fn terse_reply_is_low() {
            assert_eq!(EngagementLevel::detect("ok"), EngagementLevel::Low);
        }

        #[test]
        fn short_question_is_medium() {
            assert_eq!(EngagementLevel::detect("quanto custa?"), EngagementLevel::Medium);
        }

        #[test]
        fn several_questions_are_high() {
            assert_eq!(
                EngagementLevel::detect("como funciona? integra com o crm?"),
                EngagementLevel::High
            );
        }

        #[test]
        fn long_message_is_high() {
            let message = "a".repeat(HIGH_ENGAGEMENT_MIN_CHARS);
            assert_eq!(EngagementLevel::detect(&message), EngagementLevel::High);
        }
    }

    mod momentum {
        use super::*;

        #[test]
        fn rising_score_accelerates() {
            assert_eq!(Momentum::detect(Some(30), 55, false), Momentum::Accelerating);
        }

        #[test]
        fn first_scored_turn_accelerates() {
            assert_eq!(Momentum::detect(None, 35, false), Momentum::Accelerating);
        }

        #[test]
        fn flat_score_is_steady() {
            assert_eq!(Momentum::detect(Some(30), 30, false), Momentum::Steady);
            assert_eq!(Momentum::detect(None, 0, false), Momentum::Steady);
        }

        #[test]
        fn flat_score_while_stalled_is_stalling() {
            assert_eq!(Momentum::detect(Some(30), 30, true), Momentum::Stalling);
        }
    }
}
