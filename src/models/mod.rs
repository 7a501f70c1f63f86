// src/models/mod.rs

pub mod api;
pub mod app;
pub mod lighthouse;

pub use api::{ErrorBody, HealthResponse, ParamsRunLighthouse, ProgressResponse};
pub use app::AppState;
pub use lighthouse::{
    AuditResult, Categories, Category, CategoryScore, CategoryScoreSet, LighthouseResult,
    PageSpeedResponse, Strategy,
};
