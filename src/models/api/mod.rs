pub mod params;

pub use params::{ErrorBody, HealthResponse, ParamsRunLighthouse, ProgressResponse};
