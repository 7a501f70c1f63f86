pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use api::build_router;
pub use config::{load_config, AppConfig};
pub use error::{AuditError, ErrorKind, UpstreamFailure};
pub use models::AppState;
