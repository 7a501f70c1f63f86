pub mod handler;

pub use handler::{health_handler, method_not_allowed, not_found, preflight};
