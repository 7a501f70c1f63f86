use crate::error::{AuditError, UpstreamFailure};
use crate::models::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

pub const ANALYSIS_FAILED: &str = "Failed to analyze website. Please try again.";
pub const NOT_CONFIGURED: &str = "Analysis service is not configured. Please try again later.";

/// An audit failure on its way out as `{error, details?}`. Details carry the
/// underlying cause and are only filled in development mode.
#[derive(Debug)]
pub struct ApiError {
    pub error: AuditError,
    pub expose_details: bool,
}

impl ApiError {
    pub fn new(error: AuditError, expose_details: bool) -> Self {
        Self {
            error,
            expose_details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match &self.error {
            AuditError::Validation(_) => StatusCode::BAD_REQUEST,
            AuditError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuditError::Upstream(
                UpstreamFailure::RateLimited | UpstreamFailure::Timeout | UpstreamFailure::Status(503),
            ) => StatusCode::SERVICE_UNAVAILABLE,
            AuditError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AuditError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match &self.error {
            AuditError::Validation(reason) => reason.clone(),
            AuditError::Config(_) => NOT_CONFIGURED.to_string(),
            AuditError::Upstream(_) | AuditError::Internal(_) => ANALYSIS_FAILED.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message(),
            details: self.expose_details.then(|| self.error.to_string()),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_error_kind() {
        let cases = [
            (AuditError::Validation("URL is required".into()), StatusCode::BAD_REQUEST),
            (AuditError::Config("no key".into()), StatusCode::SERVICE_UNAVAILABLE),
            (UpstreamFailure::RateLimited.into(), StatusCode::SERVICE_UNAVAILABLE),
            (UpstreamFailure::Timeout.into(), StatusCode::SERVICE_UNAVAILABLE),
            (UpstreamFailure::Status(500).into(), StatusCode::BAD_GATEWAY),
            (UpstreamFailure::InvalidResponse.into(), StatusCode::BAD_GATEWAY),
            (AuditError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            assert_eq!(ApiError::new(error, false).status(), expected);
        }
    }

    #[test]
    fn upstream_messages_stay_generic() {
        let err = ApiError::new(UpstreamFailure::Status(500).into(), false);
        assert_eq!(err.message(), ANALYSIS_FAILED);
    }
}
