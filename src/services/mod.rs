pub mod progress_service;
pub mod site_audit_service;

pub use progress_service::{
    next_progress, spawn_sweeper, spawn_ticker, ProgressPhase, ProgressRecord, ProgressSession,
    ProgressStage, ProgressTracker,
};
pub use site_audit_service::{
    backoff_delay, score_set, AuditObserver, AuditRequest, AuditService, PageSpeedClient,
};
