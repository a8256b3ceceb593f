//! Conversation domain module.
//!
//! History turns, channel classification, and the per-contact state
//! persisted between turns.

mod channel;
mod signals;
mod state;
mod turn;

pub use channel::{ChannelKind, ConversationPath};
pub use signals::{EngagementLevel, Momentum, Sentiment};
pub use state::{
    EnhancedState, ResponseMode, StateMetadata, SubState, TurnFacts, STALLED_AFTER_STAGE_TURNS,
};
pub use turn::{history_text, ConversationTurn, HistoryScope, Role};
