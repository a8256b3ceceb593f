//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the sales agent domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{ContactId, RequestId};
pub use timestamp::Timestamp;
