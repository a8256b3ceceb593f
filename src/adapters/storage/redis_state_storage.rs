//! Redis-backed State Store Adapter
//!
//! Stores each contact's state as a JSON string under
//! `sales-agent:state:{contact}`. Suitable for multi-instance deployments
//! sharing one Redis.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::conversation::EnhancedState;
use crate::domain::foundation::ContactId;
use crate::ports::{StateStore, StateStoreError};

const KEY_PREFIX: &str = "sales-agent:state";

/// Redis storage for conversation state.
#[derive(Clone)]
pub struct RedisStateStore {
    conn: MultiplexedConnection,
    /// Expiry applied on every write; `None` keeps state forever.
    ttl_secs: Option<u64>,
}

impl RedisStateStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            ttl_secs: None,
        }
    }

    /// Connects to `url` and creates a store.
    pub async fn connect(url: &str) -> Result<Self, StateStoreError> {
        let client =
            redis::Client::open(url).map_err(|e| StateStoreError::BackendError(e.to_string()))?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(|e| StateStoreError::BackendError(e.to_string()))?;
        Ok(Self::new(conn))
    }

    /// Expire idle conversations after `ttl_secs`.
    pub fn with_ttl(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = Some(ttl_secs);
        self
    }

    pub(crate) fn key_for(contact: &ContactId) -> String {
        format!("{}:{}", KEY_PREFIX, contact)
    }
}

#[async_trait]
impl StateStore for RedisStateStore {
    async fn get(&self, contact: &ContactId) -> Result<Option<EnhancedState>, StateStoreError> {
        let mut conn = self.conn.clone();

        let json: Option<String> = conn
            .get(Self::key_for(contact))
            .await
            .map_err(|e: redis::RedisError| StateStoreError::BackendError(e.to_string()))?;

        json.map(|json| {
            serde_json::from_str(&json)
                .map_err(|e| StateStoreError::DeserializationFailed(e.to_string()))
        })
        .transpose()
    }

    async fn set(&self, contact: &ContactId, state: &EnhancedState) -> Result<(), StateStoreError> {
        let json = serde_json::to_string(state)
            .map_err(|e| StateStoreError::SerializationFailed(e.to_string()))?;
        let key = Self::key_for(contact);
        let mut conn = self.conn.clone();

        let mut cmd = redis::cmd("SET");
        cmd.arg(&key).arg(json);
        if let Some(ttl) = self.ttl_secs {
            cmd.arg("EX").arg(ttl);
        }

        cmd.query_async::<_, ()>(&mut conn)
            .await
            .map_err(|e: redis::RedisError| StateStoreError::BackendError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_namespaced_by_contact() {
        let contact = ContactId::new("5511999990000").unwrap();
        assert_eq!(
            RedisStateStore::key_for(&contact),
            "sales-agent:state:5511999990000"
        );
    }
}
