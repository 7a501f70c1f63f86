use crate::api::handler::{health_handler, method_not_allowed, not_found, preflight};
use crate::api::{lighthouse_status_handler, run_lighthouse_handler};
use crate::models::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/lighthouse",
            get(run_lighthouse_handler)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/lighthouse-status",
            get(lighthouse_status_handler)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/health", get(health_handler))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
