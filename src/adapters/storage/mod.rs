//! Storage Adapters
//!
//! Implementations of the StateStore port for persisting per-contact state.
//!
//! ## Available Adapters
//!
//! - **InMemoryStateStore** - Stores state in memory (testing/development)
//! - **FileStateStore** - Stores one YAML file per contact on disk
//! - **RedisStateStore** - Stores JSON values in Redis (multi-instance)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileStateStore, InMemoryStateStore, RedisStateStore};
//!
//! let store = FileStateStore::new("./data/state");
//! let store = RedisStateStore::connect("redis://localhost:6379").await?;
//! let store = InMemoryStateStore::new();
//! ```

mod file_state_storage;
mod in_memory_state_storage;
mod redis_state_storage;

pub use file_state_storage::FileStateStore;
pub use in_memory_state_storage::InMemoryStateStore;
pub use redis_state_storage::RedisStateStore;
