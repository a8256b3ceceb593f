//! HTTP handlers for turn endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::application::{ProcessTurnHandler, TurnError, TurnOutcome};

use super::dto::{ErrorResponse, HealthResponse, ProcessTurnRequest};

/// Application state for turn endpoints.
#[derive(Clone)]
pub struct TurnsAppState {
    pub handler: Arc<ProcessTurnHandler>,
}

/// Process one inbound message.
///
/// POST /api/turns
pub async fn process_turn(
    State(state): State<TurnsAppState>,
    Json(request): Json<ProcessTurnRequest>,
) -> Result<Json<TurnOutcome>, TurnApiError> {
    let outcome = state.handler.handle(request.into()).await?;
    Ok(Json(outcome))
}

/// Liveness check.
///
/// GET /health
pub async fn health(State(state): State<TurnsAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        llm_configured: state.handler.is_configured(),
    })
}

/// API error type that converts turn errors to HTTP responses.
#[derive(Debug)]
pub struct TurnApiError(TurnError);

impl From<TurnError> for TurnApiError {
    fn from(err: TurnError) -> Self {
        Self(err)
    }
}

impl IntoResponse for TurnApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            TurnError::EmptyMessage
            | TurnError::MissingContact
            | TurnError::InvalidContact(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            TurnError::Completion(_) => (StatusCode::BAD_GATEWAY, "LLM_UNAVAILABLE"),
            TurnError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "LLM_TIMEOUT"),
        };

        let body = ErrorResponse::new(error_code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ValidationError;
    use crate::ports::AIError;
    use std::time::Duration;

    #[test]
    fn validation_errors_map_to_400() {
        for err in [
            TurnError::EmptyMessage,
            TurnError::MissingContact,
            TurnError::InvalidContact(ValidationError::empty_field("contact_id")),
        ] {
            let response = TurnApiError(err).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn completion_failure_maps_to_502() {
        let err = TurnApiError(TurnError::Completion(AIError::unavailable("down")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn timeout_maps_to_504() {
        let err = TurnApiError(TurnError::Timeout(Duration::from_secs(60)));
        assert_eq!(err.into_response().status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
