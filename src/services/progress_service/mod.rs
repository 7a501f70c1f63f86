// src/services/progress_service/mod.rs
//
// Advisory progress for in-flight audits. PageSpeed exposes no progress
// channel, so every value here is synthetic and only drives a loading bar.

pub mod estimator;
pub mod session;
pub mod ticker;
pub mod tracker;

pub use estimator::{next_progress, ProgressStage};
pub use session::ProgressSession;
pub use ticker::{spawn_sweeper, spawn_ticker};
pub use tracker::{ProgressPhase, ProgressRecord, ProgressTracker};
