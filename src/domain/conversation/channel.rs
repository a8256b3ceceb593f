//! Inbound channel classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where an inbound message came from.
///
/// Resolved once at the entry point; everything downstream matches on the
/// derived [`ConversationPath`] instead of inspecting loose context flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    Whatsapp,
    Web,
    Voice,
    Dashboard,
}

/// The two mutually exclusive ways a turn is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationPath {
    /// Lead-facing conversation driven by BANT qualification.
    Sales,
    /// Operator commands (voice, dashboard) with a minimal prompt.
    Assistant,
}

impl ChannelKind {
    pub fn path(&self) -> ConversationPath {
        match self {
            ChannelKind::Whatsapp | ChannelKind::Web => ConversationPath::Sales,
            ChannelKind::Voice | ChannelKind::Dashboard => ConversationPath::Assistant,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Whatsapp => "whatsapp",
            ChannelKind::Web => "web",
            ChannelKind::Voice => "voice",
            ChannelKind::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ConversationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversationPath::Sales => write!(f, "sales"),
            ConversationPath::Assistant => write!(f, "assistant"),
        }
    }
}
