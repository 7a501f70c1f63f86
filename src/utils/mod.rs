pub mod log_utils;
pub mod url_utils;

pub use log_utils::init_tracing;
pub use url_utils::{first_query_value, normalize_url};
