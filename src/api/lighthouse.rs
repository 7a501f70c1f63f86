use crate::api::error::ApiError;
use crate::error::{AuditError, ErrorKind};
use crate::models::{AppState, AuditResult, ParamsRunLighthouse};
use crate::services::ProgressSession;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Runs both strategies for `?url=` and answers with the scores once they
/// are in. Progress for the same URL is advanced in the background meanwhile.
pub async fn run_lighthouse_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ParamsRunLighthouse>, QueryRejection>,
) -> Result<Json<AuditResult>, ApiError> {
    let expose = state.config.server.environment.is_development();
    let raw = match query {
        Ok(Query(params)) => params.url.unwrap_or_default(),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected malformed query string");
            let err = AuditError::Validation("malformed query string".to_string());
            return Err(ApiError::new(err, expose));
        }
    };

    let request = state.audit_service.prepare(&raw).map_err(|err| {
        match err.kind() {
            ErrorKind::Validation => warn!(url = %raw, error = %err, "rejected audit request"),
            _ => error!(url = %raw, error = %err, "audit request could not be prepared"),
        }
        ApiError::new(err, expose)
    })?;

    let url = request.url.as_str();
    info!(%url, "started run lighthouse handler");
    let session = ProgressSession::begin(&state.progress, url);

    match state.audit_service.run(&request, &session).await {
        Ok(result) => {
            session.complete();
            Ok(Json(result))
        }
        Err(err) => {
            session.abandon();
            error!(%url, kind = ?err.kind(), error = %err, "lighthouse analysis failed");
            Err(ApiError::new(err, expose))
        }
    }
}
