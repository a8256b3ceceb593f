//! Per-contact turn serialization.
//!
//! A sales turn reads state, computes, and writes it back. Two concurrent
//! turns for one contact would race on that read-modify-write, so each turn
//! holds the contact's lock for its whole duration. Different contacts never
//! contend.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as TurnMutex, OwnedMutexGuard};

use crate::domain::foundation::ContactId;

/// Registry of one async mutex per active contact.
#[derive(Debug, Default)]
pub struct ContactLocks {
    locks: Mutex<HashMap<ContactId, Arc<TurnMutex<()>>>>,
}

impl ContactLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other turn for `contact` is in flight.
    ///
    /// The returned guard releases the contact when dropped.
    pub async fn acquire(&self, contact: &ContactId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            // Drop entries nobody holds or waits on.
            locks.retain(|id, lock| id == contact || Arc::strong_count(lock) > 1);
            locks
                .entry(contact.clone())
                .or_insert_with(|| Arc::new(TurnMutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Number of contacts currently tracked.
    pub fn tracked(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn contact(id: &str) -> ContactId {
        ContactId::new(id).unwrap()
    }

    #[tokio::test]
    async fn same_contact_is_serialized() {
        let locks = Arc::new(ContactLocks::new());
        let guard = locks.acquire(&contact("5511")).await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&contact("5511")).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn different_contacts_do_not_block() {
        let locks = ContactLocks::new();
        let _a = locks.acquire(&contact("a")).await;

        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire(&contact("b"))).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn released_contacts_are_pruned() {
        let locks = ContactLocks::new();
        drop(locks.acquire(&contact("a")).await);
        drop(locks.acquire(&contact("b")).await);

        assert_eq!(locks.tracked(), 1);
    }
}
