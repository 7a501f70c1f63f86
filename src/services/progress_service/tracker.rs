use crate::config::ProgressConfig;
use crate::services::progress_service::estimator::{next_progress, ProgressStage};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::Instant;

pub const COMPLETE: f64 = 100.0;
/// Highest value a running record may be reported as once rounded.
pub const REPORTED_RUNNING_MAX: f64 = 99.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct ProgressRecord {
    pub value: f64,
    pub phase: ProgressPhase,
    pub stage: ProgressStage,
    /// Bumped by every `start`, so a superseded run cannot touch its successor.
    pub generation: u64,
    pub expires_at: Instant,
}

/// Process-local map of advisory progress, keyed by normalized URL. Entries
/// expire on their own; readers never see an error.
pub struct ProgressTracker {
    records: Mutex<HashMap<String, ProgressRecord>>,
    next_generation: AtomicU64,
    config: ProgressConfig,
}

impl ProgressTracker {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(1),
            config,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.config.tick_interval
    }

    pub fn start(&self, url: &str) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let record = ProgressRecord {
            value: 0.0,
            phase: ProgressPhase::Running,
            stage: ProgressStage::Starting,
            generation,
            expires_at: Instant::now() + self.config.ttl,
        };
        self.records.lock().insert(url.to_string(), record);
        generation
    }

    /// Returns false once the record is gone, finished, or owned by a newer
    /// generation; the caller's ticker should stop then.
    pub fn advance(&self, url: &str, generation: u64) -> bool {
        let mut records = self.records.lock();
        match records.get_mut(url) {
            Some(record)
                if record.generation == generation && record.phase == ProgressPhase::Running =>
            {
                record.value = next_progress(record.value, record.stage, self.config.ceiling);
                record.expires_at = Instant::now() + self.config.ttl;
                true
            }
            _ => false,
        }
    }

    /// Moves a running record forward to `stage` and lifts its value to the
    /// stage floor. Earlier stages, finished records and other generations
    /// are ignored.
    pub fn enter_stage(&self, url: &str, generation: u64, stage: ProgressStage) {
        let mut records = self.records.lock();
        if let Some(record) = records.get_mut(url) {
            if record.generation == generation
                && record.phase == ProgressPhase::Running
                && stage > record.stage
            {
                self.lift(record, stage);
            }
        }
    }

    /// Records that one more strategy finished scoring.
    pub fn strategy_scored(&self, url: &str, generation: u64) {
        let mut records = self.records.lock();
        if let Some(record) = records.get_mut(url) {
            if record.generation == generation && record.phase == ProgressPhase::Running {
                let stage = record.stage.after_strategy_scored();
                self.lift(record, stage);
            }
        }
    }

    fn lift(&self, record: &mut ProgressRecord, stage: ProgressStage) {
        let (floor, _) = stage.band(self.config.ceiling);
        record.stage = stage;
        record.value = record.value.max(floor);
        record.expires_at = Instant::now() + self.config.ttl;
    }

    /// Snaps to 100 and keeps the record for the grace window so the last
    /// poll can observe completion.
    pub fn complete(&self, url: &str, generation: u64) {
        let mut records = self.records.lock();
        if let Some(record) = records.get_mut(url) {
            if record.generation == generation {
                record.value = COMPLETE;
                record.phase = ProgressPhase::Completed;
                record.expires_at = Instant::now() + self.config.grace_period;
            }
        }
    }

    pub fn abandon(&self, url: &str, generation: u64) {
        let mut records = self.records.lock();
        if records
            .get(url)
            .is_some_and(|record| record.generation == generation)
        {
            records.remove(url);
        }
    }

    pub fn read(&self, url: &str) -> f64 {
        self.live(url).map_or(0.0, |(value, _)| value)
    }

    /// The value served to pollers: one decimal place, and never 100 until
    /// the record has actually completed.
    pub fn reported(&self, url: &str) -> f64 {
        match self.live(url) {
            Some((value, phase)) => {
                let rounded = (value * 10.0).round() / 10.0;
                match phase {
                    ProgressPhase::Completed => rounded,
                    ProgressPhase::Running => rounded.min(REPORTED_RUNNING_MAX),
                }
            }
            None => 0.0,
        }
    }

    /// Unexpired value and phase; an expired record is evicted on the way.
    fn live(&self, url: &str) -> Option<(f64, ProgressPhase)> {
        let now = Instant::now();
        let mut records = self.records.lock();
        match records.get(url) {
            Some(record) if record.expires_at > now => Some((record.value, record.phase)),
            Some(_) => {
                records.remove(url);
                None
            }
            None => None,
        }
    }

    pub fn record(&self, url: &str) -> Option<ProgressRecord> {
        self.records.lock().get(url).cloned()
    }

    /// Drops every expired record and reports how many went.
    pub fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|_, record| record.expires_at > now);
        before - records.len()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
