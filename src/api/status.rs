use crate::models::{AppState, ProgressResponse};
use crate::utils::{first_query_value, normalize_url};
use axum::{
    extract::{RawQuery, State},
    Json,
};
use std::sync::Arc;

/// Always answers 200; anything unknown or unparsable simply reads as 0. The
/// query is parsed leniently so a malformed one cannot turn into a 400.
pub async fn lighthouse_status_handler(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Json<ProgressResponse> {
    let progress = first_query_value(query.as_deref(), "url")
        .and_then(|raw| normalize_url(&raw).ok())
        .map(|url| state.progress.reported(&url))
        .unwrap_or(0.0);

    Json(ProgressResponse { progress })
}
