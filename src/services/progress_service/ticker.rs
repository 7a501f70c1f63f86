use crate::services::progress_service::tracker::ProgressTracker;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Advances one record on a fixed interval until the tracker says stop.
pub fn spawn_ticker(tracker: Arc<ProgressTracker>, url: String, generation: u64) -> JoinHandle<()> {
    let period = tracker.tick_interval().max(MIN_PERIOD);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately; the record starts at 0.
        interval.tick().await;
        loop {
            interval.tick().await;
            if !tracker.advance(&url, generation) {
                debug!(%url, generation, "progress ticker stopped");
                break;
            }
        }
    })
}

/// Periodically evicts expired records, covering clients that went away
/// mid-audit.
pub fn spawn_sweeper(tracker: Arc<ProgressTracker>, every: Duration) -> JoinHandle<()> {
    let period = every.max(MIN_PERIOD);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let removed = tracker.sweep_expired();
            if removed > 0 {
                debug!(removed, "swept expired progress records");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProgressConfig;

    #[tokio::test]
    async fn ticker_advances_until_completion() {
        let tracker = Arc::new(ProgressTracker::new(ProgressConfig {
            tick_interval: Duration::from_millis(5),
            ..ProgressConfig::default()
        }));
        let url = "https://example.com";
        let generation = tracker.start(url);
        let handle = spawn_ticker(tracker.clone(), url.to_string(), generation);

        tokio::time::sleep(Duration::from_millis(60)).await;
        let midway = tracker.read(url);
        assert!(midway > 0.0 && midway < 100.0);

        tracker.complete(url, generation);
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("ticker should stop after completion")
            .unwrap();
        assert_eq!(tracker.read(url), 100.0);
    }
}
