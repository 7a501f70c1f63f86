// src/services/site_audit_service/mod.rs

pub mod audit;
pub mod compute;
pub mod pagespeed;

pub use audit::{AuditObserver, AuditRequest, AuditService};
pub use compute::score_set;
pub use pagespeed::{backoff_delay, PageSpeedClient};
