//! Composition of the BANT components into one per-turn analysis.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::{history_text, ConversationTurn, HistoryScope};

use super::extractor::EntityExtractor;
use super::next_action::{ActionTag, NextActionResolver};
use super::scoring::{QualificationScorer, QualificationTier};
use super::signal::{BantInfo, Completeness};
use super::stage::{Stage, StageDetector};
use super::templates::StagePromptBuilder;

/// Everything the BANT engine derives from one history snapshot.
///
/// Stage, score and next action are all computed from the same
/// [`Completeness`], so they can never disagree with each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BantAnalysis {
    pub info: BantInfo,
    pub completeness: Completeness,
    pub stage: Stage,
    pub score: u8,
    /// `None` during opening, where BANT logic is short-circuited.
    pub next_action: Option<ActionTag>,
}

impl BantAnalysis {
    pub fn tier(&self) -> QualificationTier {
        QualificationTier::from_score(self.score)
    }
}

/// The BANT state machine.
///
/// Construct one and pass it where it is needed; instances are cheap and
/// share only the immutable compiled pattern tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BantFramework {
    scope: HistoryScope,
    extractor: EntityExtractor,
    detector: StageDetector,
    prompts: StagePromptBuilder,
    scorer: QualificationScorer,
    resolver: NextActionResolver,
}

impl BantFramework {
    pub fn new() -> Self {
        Self::with_scope(HistoryScope::default())
    }

    /// A framework that scans only the turns in `scope`.
    pub fn with_scope(scope: HistoryScope) -> Self {
        Self {
            scope,
            extractor: EntityExtractor::new(),
            detector: StageDetector::with_scope(scope),
            prompts: StagePromptBuilder::new(),
            scorer: QualificationScorer::new(),
            resolver: NextActionResolver::new(),
        }
    }

    /// Re-scans the whole history and derives the current analysis.
    pub fn analyze(&self, history: &[ConversationTurn]) -> BantAnalysis {
        let info = self.extractor.extract(&history_text(history, self.scope));
        let completeness = info.completeness();
        let stage = self.detector.detect(history, &info);
        let score = self.scorer.score(&info);
        let next_action = match stage {
            Stage::Opening => None,
            _ => Some(self.resolver.resolve(&info, stage)),
        };

        BantAnalysis {
            info,
            completeness,
            stage,
            score,
            next_action,
        }
    }

    /// Stage instructions for an analysis.
    pub fn build_prompt(&self, analysis: &BantAnalysis) -> String {
        self.prompts.build(analysis.stage, &analysis.info)
    }
}
