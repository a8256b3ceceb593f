//! Negation-guarded entity extraction for BANT signals.
//!
//! A lightweight rule-based classifier: ordered regex patterns per signal,
//! each candidate checked against a context window for negating phrases.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::patterns::{
    AUTHORITY_NEGATIONS, AUTHORITY_PATTERNS, BUDGET_NEGATIONS, BUDGET_PATTERNS,
    NEED_NEGATIONS, NEED_PATTERNS, NEGATION_WINDOW_AFTER, NEGATION_WINDOW_BEFORE,
    TIMING_NEGATIONS, TIMING_PATTERNS,
};
use super::signal::{BantInfo, BantSignal};

/// Compiled patterns and negation phrases for one signal.
#[derive(Debug)]
struct SignalRule {
    signal: BantSignal,
    patterns: Vec<Regex>,
    negations: &'static [&'static str],
}

impl SignalRule {
    fn compile(
        signal: BantSignal,
        patterns: &[&str],
        negations: &'static [&'static str],
    ) -> Self {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p)
                    .unwrap_or_else(|e| panic!("Invalid {} pattern {:?}: {}", signal, p, e))
            })
            .collect();

        Self {
            signal,
            patterns,
            negations,
        }
    }
}

/// Pattern tables are constants, so they are compiled once per process.
static SIGNAL_RULES: Lazy<Vec<SignalRule>> = Lazy::new(|| {
    vec![
        SignalRule::compile(BantSignal::Budget, BUDGET_PATTERNS, BUDGET_NEGATIONS),
        SignalRule::compile(BantSignal::Authority, AUTHORITY_PATTERNS, AUTHORITY_NEGATIONS),
        SignalRule::compile(BantSignal::Need, NEED_PATTERNS, NEED_NEGATIONS),
        SignalRule::compile(BantSignal::Timing, TIMING_PATTERNS, TIMING_NEGATIONS),
    ]
});

/// Extracts BANT signals from conversation text.
///
/// Extraction is pure: the same text always yields the same [`BantInfo`].
/// The first non-negated match per signal wins and is never retracted by
/// later text, so a signal contradicted after it was accepted stays set.
#[derive(Debug, Clone, Copy)]
pub struct EntityExtractor {
    rules: &'static [SignalRule],
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor {
    /// Creates an extractor over the built-in pattern tables.
    pub fn new() -> Self {
        Self {
            rules: SIGNAL_RULES.as_slice(),
        }
    }

    /// Scans the full history text for all four signals.
    pub fn extract(&self, history_text: &str) -> BantInfo {
        let text = history_text.to_lowercase();
        let mut info = BantInfo::default();

        for rule in self.rules {
            info.set(rule.signal, Self::first_accepted(rule, &text));
        }

        info
    }

    fn first_accepted(rule: &SignalRule, text: &str) -> Option<String> {
        for pattern in &rule.patterns {
            for candidate in pattern.find_iter(text) {
                let window = context_window(text, candidate.start(), candidate.end());

                if let Some(negation) = rule.negations.iter().find(|n| window.contains(*n)) {
                    trace!(
                        signal = %rule.signal,
                        candidate = candidate.as_str(),
                        negation = *negation,
                        "Discarding negated candidate"
                    );
                    continue;
                }

                let value = candidate.as_str().trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
        None
    }
}

/// Returns the text from `NEGATION_WINDOW_BEFORE` characters before `start`
/// to `NEGATION_WINDOW_AFTER` characters after `end`, clamped to the text.
fn context_window(text: &str, start: usize, end: usize) -> &str {
    let window_start = text[..start]
        .char_indices()
        .rev()
        .nth(NEGATION_WINDOW_BEFORE - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);

    let window_end = text[end..]
        .char_indices()
        .nth(NEGATION_WINDOW_AFTER)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    &text[window_start..window_end]
}
