//! In-memory State Store Adapter
//!
//! Stores per-contact state in a HashMap. Useful for tests and local runs;
//! state is lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::EnhancedState;
use crate::domain::foundation::ContactId;
use crate::ports::{StateStore, StateStoreError};

/// In-memory storage for conversation state
#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStore {
    states: Arc<RwLock<HashMap<ContactId, EnhancedState>>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contacts with stored state.
    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }

    /// Remove all stored state
    pub async fn clear(&self) {
        self.states.write().await.clear();
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get(&self, contact: &ContactId) -> Result<Option<EnhancedState>, StateStoreError> {
        Ok(self.states.read().await.get(contact).cloned())
    }

    async fn set(&self, contact: &ContactId, state: &EnhancedState) -> Result<(), StateStoreError> {
        self.states
            .write()
            .await
            .insert(contact.clone(), state.clone());
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::sample_state;
    use super::*;

    fn contact(id: &str) -> ContactId {
        ContactId::new(id).unwrap()
    }

    #[tokio::test]
    async fn missing_contact_is_none() {
        let store = InMemoryStateStore::new();
        assert!(store.get(&contact("5511")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_then_get_returns_state() {
        let store = InMemoryStateStore::new();
        let state = sample_state();

        store.set(&contact("5511"), &state).await.unwrap();

        assert_eq!(store.get(&contact("5511")).await.unwrap(), Some(state));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn set_replaces_previous_state() {
        let store = InMemoryStateStore::new();
        let mut state = sample_state();
        store.set(&contact("5511"), &state).await.unwrap();

        state.qualification_score = 99;
        store.set(&contact("5511"), &state).await.unwrap();

        let loaded = store.get(&contact("5511")).await.unwrap().unwrap();
        assert_eq!(loaded.qualification_score, 99);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn contacts_are_isolated() {
        let store = InMemoryStateStore::new();
        store.set(&contact("a"), &sample_state()).await.unwrap();

        assert!(store.get(&contact("b")).await.unwrap().is_none());

        store.clear().await;
        assert!(store.is_empty().await);
    }
}
