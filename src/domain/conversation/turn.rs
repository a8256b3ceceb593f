//! Conversation turns and history helpers.

use serde::{Deserialize, Serialize};

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The lead.
    User,
    /// The sales agent.
    Assistant,
    /// Instructions injected by the platform.
    System,
}

/// One immutable entry in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a lead turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an agent turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Returns true if the lead wrote this turn.
    pub fn is_from_lead(&self) -> bool {
        self.role == Role::User
    }
}

/// Which turns the BANT engine reads when it re-scans a history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryScope {
    /// Every turn, whoever wrote it.
    #[default]
    Full,
    /// Lead-authored turns only, so the agent's own questions ("vocês
    /// investem uns r$ 3000?") are never read back as lead answers.
    LeadOnly,
}

impl HistoryScope {
    pub fn includes(&self, turn: &ConversationTurn) -> bool {
        match self {
            HistoryScope::Full => true,
            HistoryScope::LeadOnly => turn.is_from_lead(),
        }
    }
}

/// Lowercased, newline-separated text of the turns in `scope`.
pub fn history_text(history: &[ConversationTurn], scope: HistoryScope) -> String {
    history
        .iter()
        .filter(|turn| scope.includes(turn))
        .map(|turn| turn.content.to_lowercase())
        .collect::<Vec<_>>()
        .join("\n")
}
