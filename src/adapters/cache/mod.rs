//! Response Cache Adapters
//!
//! Implementations of the ResponseCache port used on the assistant path.

mod in_memory;

pub use in_memory::{InMemoryResponseCache, DEFAULT_CAPACITY};
