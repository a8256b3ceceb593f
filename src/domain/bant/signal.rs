//! BANT signals and the extracted information record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four qualification facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BantSignal {
    Budget,
    Authority,
    Need,
    Timing,
}

impl BantSignal {
    /// Canonical order used by the stage detector.
    pub const ORDER: [BantSignal; 4] = [
        BantSignal::Budget,
        BantSignal::Authority,
        BantSignal::Need,
        BantSignal::Timing,
    ];

    /// Human-readable label used in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Budget => "Orçamento",
            Self::Authority => "Autoridade",
            Self::Need => "Necessidade",
            Self::Timing => "Prazo",
        }
    }
}

impl fmt::Display for BantSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Budget => "budget",
            Self::Authority => "authority",
            Self::Need => "need",
            Self::Timing => "timing",
        };
        write!(f, "{}", name)
    }
}

/// Signals extracted from conversation history.
///
/// Each field holds the literal matched text span the first time that
/// signal was accepted, or `None` if no non-negated match exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BantInfo {
    pub budget: Option<String>,
    pub authority: Option<String>,
    pub need: Option<String>,
    pub timing: Option<String>,
}

impl BantInfo {
    /// Returns the value for a signal.
    pub fn get(&self, signal: BantSignal) -> Option<&str> {
        match signal {
            BantSignal::Budget => self.budget.as_deref(),
            BantSignal::Authority => self.authority.as_deref(),
            BantSignal::Need => self.need.as_deref(),
            BantSignal::Timing => self.timing.as_deref(),
        }
    }

    /// Sets the value for a signal.
    pub fn set(&mut self, signal: BantSignal, value: Option<String>) {
        match signal {
            BantSignal::Budget => self.budget = value,
            BantSignal::Authority => self.authority = value,
            BantSignal::Need => self.need = value,
            BantSignal::Timing => self.timing = value,
        }
    }

    /// Boolean view of which signals are present.
    pub fn completeness(&self) -> Completeness {
        Completeness {
            budget: self.budget.is_some(),
            authority: self.authority.is_some(),
            need: self.need.is_some(),
            timing: self.timing.is_some(),
        }
    }

    /// Number of signals present.
    pub fn complete_count(&self) -> usize {
        self.completeness().count()
    }

    /// Collected signals in canonical order.
    pub fn collected(&self) -> Vec<(BantSignal, &str)> {
        BantSignal::ORDER
            .iter()
            .filter_map(|signal| self.get(*signal).map(|value| (*signal, value)))
            .collect()
    }
}

/// Which BANT signals have been collected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completeness {
    pub budget: bool,
    pub authority: bool,
    pub need: bool,
    pub timing: bool,
}

impl Completeness {
    /// Returns whether a signal is present.
    pub fn has(&self, signal: BantSignal) -> bool {
        match signal {
            BantSignal::Budget => self.budget,
            BantSignal::Authority => self.authority,
            BantSignal::Need => self.need,
            BantSignal::Timing => self.timing,
        }
    }

    /// Number of signals present.
    pub fn count(&self) -> usize {
        BantSignal::ORDER.iter().filter(|s| self.has(**s)).count()
    }

    /// First missing signal when walking `order`.
    pub fn first_missing(&self, order: &[BantSignal]) -> Option<BantSignal> {
        order.iter().copied().find(|s| !self.has(*s))
    }

    /// True when all four signals are present.
    pub fn is_complete(&self) -> bool {
        self.count() == 4
    }
}
