use crate::models::{AppState, ErrorBody, HealthResponse};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        api_key_configured: state.audit_service.is_configured(),
    })
}

/// Bare `OPTIONS` requests that are not CORS preflights still get an empty 200.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody {
            error: "Method not allowed".to_string(),
            details: None,
        }),
    )
}

pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_string(),
            details: None,
        }),
    )
}
