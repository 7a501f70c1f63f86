use std::env;
use std::str::FromStr;
use std::time::Duration;

use super::env::{AppConfig, ConfigError, Environment, MAX_PROGRESS_CEILING};

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    /// Builds the configuration from any key lookup, falling back to defaults
    /// for keys that are absent or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = AppConfig::default();

        if let Some(addr) = get("BIND_ADDR") {
            config.server.bind_addr = addr;
        }
        config.server.environment = match get("APP_ENV").as_deref() {
            Some("development") | Some("dev") => Environment::Development,
            _ => Environment::Production,
        };
        if let Some(level) = get("LOG_LEVEL") {
            config.log_level = level;
        }

        let pagespeed = &mut config.pagespeed;
        pagespeed.api_key = get("API_KEY");
        if let Some(url) = get("PAGESPEED_API_URL") {
            pagespeed.api_url = url;
        }
        if let Some(v) = parse::<bool>(&get, "PAGESPEED_INCLUDE_PWA")? {
            pagespeed.include_pwa = v;
        }
        if let Some(v) = parse::<u32>(&get, "PAGESPEED_MAX_RETRIES")? {
            pagespeed.max_retries = v;
        }
        if let Some(v) = parse_millis(&get, "PAGESPEED_REQUEST_TIMEOUT_MS")? {
            pagespeed.request_timeout = v;
        }
        if let Some(v) = parse_millis(&get, "PAGESPEED_TOTAL_TIMEOUT_MS")? {
            pagespeed.total_timeout = v;
        }
        if let Some(v) = parse_millis(&get, "PAGESPEED_RATE_LIMIT_BACKOFF_MS")? {
            pagespeed.rate_limit_backoff = v;
        }
        if let Some(v) = parse_millis(&get, "PAGESPEED_RETRY_BACKOFF_MS")? {
            pagespeed.retry_backoff = v;
        }

        let progress = &mut config.progress;
        if let Some(v) = parse_millis(&get, "PROGRESS_TICK_MS")? {
            progress.tick_interval = v;
        }
        if let Some(v) = parse::<f64>(&get, "PROGRESS_CEILING")? {
            if !(0.0..=MAX_PROGRESS_CEILING).contains(&v) {
                return Err(ConfigError::Invalid {
                    key: "PROGRESS_CEILING",
                    value: v.to_string(),
                });
            }
            progress.ceiling = v;
        }
        if let Some(v) = parse_millis(&get, "PROGRESS_GRACE_MS")? {
            progress.grace_period = v;
        }
        if let Some(v) = parse::<u64>(&get, "PROGRESS_TTL_SECS")? {
            progress.ttl = Duration::from_secs(v);
        }

        Ok(config)
    }
}

fn parse<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match get(key) {
        Some(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(None),
    }
}

fn parse_millis(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    Ok(parse::<u64>(get, key)?.map(Duration::from_millis))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.pagespeed.api_key.is_none());
        assert_eq!(config.pagespeed.max_retries, 2);
        assert_eq!(config.pagespeed.request_timeout, Duration::from_secs(30));
        assert_eq!(config.progress.tick_interval, Duration::from_millis(250));
        assert_eq!(config.progress.ceiling, 95.0);
        assert_eq!(config.server.environment, Environment::Production);
        assert_eq!(config.server.bind_addr, "0.0.0.0:3043");
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = AppConfig::from_lookup(lookup(&[("API_KEY", "   ")])).unwrap();
        assert!(config.pagespeed.api_key.is_none());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup(&[
            ("API_KEY", "secret"),
            ("APP_ENV", "development"),
            ("PAGESPEED_INCLUDE_PWA", "true"),
            ("PAGESPEED_MAX_RETRIES", "4"),
            ("PROGRESS_TICK_MS", "100"),
        ]))
        .unwrap();
        assert_eq!(config.pagespeed.api_key.as_deref(), Some("secret"));
        assert!(config.server.environment.is_development());
        assert!(config.pagespeed.include_pwa);
        assert_eq!(config.pagespeed.max_retries, 4);
        assert_eq!(config.progress.tick_interval, Duration::from_millis(100));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("PAGESPEED_MAX_RETRIES", "lots")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { key: "PAGESPEED_MAX_RETRIES", .. }
        ));
    }

    #[test]
    fn ceiling_must_stay_below_completion() {
        for value in ["100", "99.95", "-1", "NaN"] {
            assert!(
                AppConfig::from_lookup(lookup(&[("PROGRESS_CEILING", value)])).is_err(),
                "ceiling {value}"
            );
        }
        let config = AppConfig::from_lookup(lookup(&[("PROGRESS_CEILING", "99.9")])).unwrap();
        assert_eq!(config.progress.ceiling, 99.9);
    }
}
