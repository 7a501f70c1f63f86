use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PAGESPEED_API_URL: &str =
    "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub pagespeed: PageSpeedConfig,
    pub progress: ProgressConfig,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone)]
pub struct PageSpeedConfig {
    /// Absent credentials are tolerated at load time; audits fail until one is set.
    pub api_key: Option<String>,
    pub api_url: String,
    pub include_pwa: bool,
    pub max_retries: u32,
    pub request_timeout: Duration,
    pub total_timeout: Duration,
    pub rate_limit_backoff: Duration,
    pub retry_backoff: Duration,
}

/// Highest accepted progress ceiling; anything above would round to 100 on
/// the wire before the audit completes.
pub const MAX_PROGRESS_CEILING: f64 = 99.9;

#[derive(Debug, Clone)]
pub struct ProgressConfig {
    pub tick_interval: Duration,
    pub ceiling: f64,
    pub grace_period: Duration,
    pub ttl: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl Environment {
    pub fn is_development(self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl Default for PageSpeedConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_PAGESPEED_API_URL.to_string(),
            include_pwa: false,
            max_retries: 2,
            request_timeout: Duration::from_secs(30),
            total_timeout: Duration::from_secs(100),
            rate_limit_backoff: Duration::from_millis(2_000),
            retry_backoff: Duration::from_millis(1_000),
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(250),
            ceiling: 95.0,
            grace_period: Duration::from_millis(2_000),
            ttl: Duration::from_secs(600),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3043".to_string(),
            environment: Environment::Production,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            pagespeed: PageSpeedConfig::default(),
            progress: ProgressConfig::default(),
            log_level: "info".to_string(),
        }
    }
}
