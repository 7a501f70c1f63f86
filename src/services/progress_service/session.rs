use crate::models::Strategy;
use crate::services::progress_service::estimator::ProgressStage;
use crate::services::progress_service::ticker::spawn_ticker;
use crate::services::progress_service::tracker::ProgressTracker;
use crate::services::site_audit_service::AuditObserver;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// One audit's claim on a progress record. Dropping it unsettled (for
/// example when the client disconnects and the handler future is dropped)
/// stops the ticker and discards the record.
pub struct ProgressSession {
    tracker: Arc<ProgressTracker>,
    url: String,
    generation: u64,
    ticker: Option<JoinHandle<()>>,
}

impl ProgressSession {
    pub fn begin(tracker: &Arc<ProgressTracker>, url: &str) -> Self {
        let generation = tracker.start(url);
        let ticker = spawn_ticker(tracker.clone(), url.to_string(), generation);
        Self {
            tracker: tracker.clone(),
            url: url.to_string(),
            generation,
            ticker: Some(ticker),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn complete(mut self) {
        self.stop_ticker();
        self.tracker.complete(&self.url, self.generation);
    }

    pub fn abandon(mut self) {
        self.stop_ticker();
        self.tracker.abandon(&self.url, self.generation);
    }

    fn stop_ticker(&mut self) -> bool {
        match self.ticker.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl AuditObserver for ProgressSession {
    fn requests_started(&self) {
        self.tracker
            .enter_stage(&self.url, self.generation, ProgressStage::Requesting);
    }

    fn strategy_scored(&self, _strategy: Strategy) {
        self.tracker.strategy_scored(&self.url, self.generation);
    }
}

impl Drop for ProgressSession {
    fn drop(&mut self) {
        if self.stop_ticker() {
            self.tracker.abandon(&self.url, self.generation);
        }
    }
}
