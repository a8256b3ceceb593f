//! HTTP adapters - REST API implementations.
//!
//! [`app_router`] assembles the routes with the cross-cutting tower layers
//! (request tracing, CORS, whole-request timeout).

pub mod turns;

pub use turns::{turns_router, TurnsAppState};

use axum::http::{HeaderValue, Method};
use axum::Router;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;

/// Builds the full application router.
pub fn app_router(state: TurnsAppState, server: &ServerConfig) -> Router {
    turns_router()
        .with_state(state)
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs)))
        .layer(cors_layer(&server.allowed_origins()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[&str]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|&origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}
