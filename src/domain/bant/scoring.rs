//! Qualification score from BANT signals.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::patterns::{
    AUTHORITY_WEIGHT, BUDGET_NUMERIC_PATTERN, BUDGET_WEIGHT, CONFIDENCE_BONUS,
    DECISION_MAKER_KEYWORDS, MAX_SCORE, NEED_DETAIL_MIN_CHARS, NEED_WEIGHT, TIMING_WEIGHT,
    URGENCY_KEYWORDS,
};
use super::signal::BantInfo;

static BUDGET_NUMERIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(BUDGET_NUMERIC_PATTERN)
        .unwrap_or_else(|e| panic!("Invalid budget numeric pattern: {}", e))
});

/// Converts BANT signals into a 0-100 score.
///
/// Each present signal adds its weight, plus a confidence bonus when the
/// value looks strong (a number for budget, a decision-maker keyword for
/// authority, a detailed need, an urgency keyword for timing).
#[derive(Debug, Clone, Copy, Default)]
pub struct QualificationScorer;

impl QualificationScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, info: &BantInfo) -> u8 {
        let mut total = 0u32;

        if let Some(budget) = info.budget.as_deref() {
            total += BUDGET_WEIGHT;
            if BUDGET_NUMERIC.is_match(&budget.to_lowercase()) {
                total += CONFIDENCE_BONUS;
            }
        }

        if let Some(authority) = info.authority.as_deref() {
            total += AUTHORITY_WEIGHT;
            if contains_any(authority, DECISION_MAKER_KEYWORDS) {
                total += CONFIDENCE_BONUS;
            }
        }

        if let Some(need) = info.need.as_deref() {
            total += NEED_WEIGHT;
            if need.chars().count() > NEED_DETAIL_MIN_CHARS {
                total += CONFIDENCE_BONUS;
            }
        }

        if let Some(timing) = info.timing.as_deref() {
            total += TIMING_WEIGHT;
            if contains_any(timing, URGENCY_KEYWORDS) {
                total += CONFIDENCE_BONUS;
            }
        }

        // MAX_SCORE fits in u8
        total.min(MAX_SCORE) as u8
    }
}

fn contains_any(value: &str, keywords: &[&str]) -> bool {
    let value = value.to_lowercase();
    keywords.iter().any(|k| value.contains(k))
}

/// Coarse bucket of the qualification score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualificationTier {
    Cold,
    Warm,
    Hot,
    Qualified,
}

impl QualificationTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => QualificationTier::Qualified,
            70..=89 => QualificationTier::Hot,
            40..=69 => QualificationTier::Warm,
            _ => QualificationTier::Cold,
        }
    }
}
