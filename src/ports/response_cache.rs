//! Response Cache Port - Opaque cache of previous assistant answers.
//!
//! Only the assistant path (voice, dashboard) consults the cache. Sales
//! answers depend on per-contact state and are never cached.

use async_trait::async_trait;

/// Port for looking up and storing answers by prompt text.
///
/// How keys are compared (exact, normalized, similarity) is up to the
/// implementation. Cache failures are never surfaced; a miss is `None`.
#[async_trait]
pub trait ResponseCache: Send + Sync {
    async fn lookup(&self, key: &str) -> Option<String>;

    async fn store(&self, key: &str, answer: &str);
}
