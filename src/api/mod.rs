// src/api/mod.rs

pub mod error;
pub mod handler;
pub mod lighthouse;
pub mod router;
pub mod status;

pub use error::ApiError;
pub use lighthouse::run_lighthouse_handler;
pub use router::build_router;
pub use status::lighthouse_status_handler;
