//! State Store Port - Interface for persisting per-contact conversation state.
//!
//! A plain key-value capability keyed by contact id. The orchestrator is the
//! only writer; callers serialize turns per contact before read-modify-write.

use async_trait::async_trait;

use crate::domain::conversation::EnhancedState;
use crate::domain::foundation::ContactId;

/// Errors that can occur during state store operations
#[derive(Debug, thiserror::Error)]
pub enum StateStoreError {
    #[error("Failed to serialize state: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize state: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Port for loading and saving [`EnhancedState`].
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Loads the state for a contact.
    ///
    /// # Returns
    /// `Ok(None)` when the contact has no stored state yet
    async fn get(&self, contact: &ContactId) -> Result<Option<EnhancedState>, StateStoreError>;

    /// Stores the state for a contact, replacing any previous value.
    async fn set(&self, contact: &ContactId, state: &EnhancedState) -> Result<(), StateStoreError>;
}
