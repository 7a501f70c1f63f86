use crate::config::AppConfig;
use crate::services::{AuditService, ProgressTracker};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub audit_service: AuditService,
    pub progress: Arc<ProgressTracker>,
}

impl AppState {
    pub fn new(config: AppConfig, http: reqwest::Client) -> Self {
        let audit_service = AuditService::new(http, config.pagespeed.clone());
        let progress = Arc::new(ProgressTracker::new(config.progress.clone()));
        Self {
            config: Arc::new(config),
            audit_service,
            progress,
        }
    }
}
