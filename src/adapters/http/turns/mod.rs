//! HTTP adapter for conversation turns.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, HealthResponse, ProcessTurnRequest};
pub use handlers::{TurnApiError, TurnsAppState};
pub use routes::turns_router;
