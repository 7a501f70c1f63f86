use thiserror::Error;

/// Every failure an audit can end with. Callers route on the variant, never on
/// the rendered message.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("invalid url: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamFailure),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamFailure {
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("rate limited after exhausting retries")]
    RateLimited,

    #[error("invalid response shape")]
    InvalidResponse,

    #[error("timeout")]
    Timeout,

    #[error("transport failure: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Config,
    Upstream,
    Internal,
}

impl AuditError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuditError::Validation(_) => ErrorKind::Validation,
            AuditError::Config(_) => ErrorKind::Config,
            AuditError::Upstream(_) => ErrorKind::Upstream,
            AuditError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl UpstreamFailure {
    /// Whether another attempt at the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            UpstreamFailure::Status(code) => *code == 429 || *code >= 500,
            UpstreamFailure::RateLimited
            | UpstreamFailure::Timeout
            | UpstreamFailure::Transport(_) => true,
            UpstreamFailure::InvalidResponse => false,
        }
    }
}

impl From<reqwest::Error> for UpstreamFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamFailure::Timeout
        } else if let Some(status) = err.status() {
            UpstreamFailure::Status(status.as_u16())
        } else {
            // The request URL carries the API key in its query string.
            UpstreamFailure::Transport(err.without_url().to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_errors_report_their_kind() {
        let err = AuditError::from(UpstreamFailure::Timeout);
        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(err.to_string(), "upstream error: timeout");
    }

    #[test]
    fn only_rate_limits_and_server_errors_are_transient_statuses() {
        assert!(UpstreamFailure::Status(429).is_transient());
        assert!(UpstreamFailure::Status(503).is_transient());
        assert!(!UpstreamFailure::Status(400).is_transient());
        assert!(!UpstreamFailure::Status(403).is_transient());
        assert!(!UpstreamFailure::InvalidResponse.is_transient());
    }
}
