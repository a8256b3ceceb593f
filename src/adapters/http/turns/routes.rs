//! Axum router configuration for turn endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, process_turn, TurnsAppState};

/// Create the turns router.
///
/// # Routes
///
/// - `POST /api/turns` - Process one inbound message
/// - `GET /health` - Liveness check
pub fn turns_router() -> Router<TurnsAppState> {
    Router::new()
        .route("/api/turns", post(process_turn))
        .route("/health", get(health))
}
