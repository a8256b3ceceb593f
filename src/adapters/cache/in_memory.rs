//! In-memory response cache for the assistant path.
//!
//! Keys are normalized before lookup (case, whitespace, trailing
//! punctuation), so "Mudar o tema!" and "  mudar o   tema" hit the same
//! entry. When full, the oldest entry is evicted.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::ResponseCache;

/// Default number of cached answers.
pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Default)]
struct Entries {
    answers: HashMap<String, String>,
    /// Insertion order, oldest first.
    order: VecDeque<String>,
}

/// Bounded, normalized-text answer cache.
#[derive(Debug, Clone)]
pub struct InMemoryResponseCache {
    entries: Arc<RwLock<Entries>>,
    capacity: usize,
}

impl InMemoryResponseCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Entries::default())),
            capacity: capacity.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.answers.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.answers.is_empty()
    }
}

impl Default for InMemoryResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Lowercases, collapses whitespace, and drops trailing punctuation.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .to_string()
}

#[async_trait]
impl ResponseCache for InMemoryResponseCache {
    async fn lookup(&self, key: &str) -> Option<String> {
        let key = normalize(key);
        if key.is_empty() {
            return None;
        }
        self.entries.read().await.answers.get(&key).cloned()
    }

    async fn store(&self, key: &str, answer: &str) {
        let key = normalize(key);
        if key.is_empty() {
            return;
        }

        let mut entries = self.entries.write().await;
        if entries.answers.insert(key.clone(), answer.to_string()).is_some() {
            return;
        }
        entries.order.push_back(key);

        while entries.answers.len() > self.capacity {
            match entries.order.pop_front() {
                Some(oldest) => {
                    entries.answers.remove(&oldest);
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_ignores_case_spacing_and_punctuation() {
        assert_eq!(normalize("  Mudar   o TEMA!? "), "mudar o tema");
        assert_eq!(normalize("Ação"), "ação");
    }

    #[tokio::test]
    async fn miss_then_hit() {
        let cache = InMemoryResponseCache::default();
        assert!(cache.lookup("qual o faturamento?").await.is_none());

        cache.store("Qual o faturamento?", "R$ 10 mil").await;

        assert_eq!(
            cache.lookup("qual o   faturamento").await.as_deref(),
            Some("R$ 10 mil")
        );
    }

    #[tokio::test]
    async fn oldest_entry_is_evicted_at_capacity() {
        let cache = InMemoryResponseCache::new(2);
        cache.store("a", "1").await;
        cache.store("b", "2").await;
        cache.store("c", "3").await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.lookup("a").await.is_none());
        assert_eq!(cache.lookup("c").await.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn overwrite_does_not_grow_cache() {
        let cache = InMemoryResponseCache::new(2);
        cache.store("a", "1").await;
        cache.store("A!", "2").await;

        assert_eq!(cache.len().await, 1);
        assert_eq!(cache.lookup("a").await.as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn blank_keys_are_ignored() {
        let cache = InMemoryResponseCache::default();
        cache.store("  ?! ", "nada").await;

        assert!(cache.is_empty().await);
        assert!(cache.lookup("").await.is_none());
    }
}
