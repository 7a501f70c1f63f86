pub mod env;
pub mod loader;

pub use env::{
    AppConfig, ConfigError, Environment, PageSpeedConfig, ProgressConfig, ServerConfig,
};
pub use loader::load_config;
