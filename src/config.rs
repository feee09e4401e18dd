//! Process configuration read from the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::common::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the CMS backend, without a trailing slash.
    pub api_url: String,
    pub bind_addr: String,
    /// Directory holding the local settings cache.
    pub cache_dir: PathBuf,
    pub fetch: FetchPolicy,
    pub request_timeout: Duration,
    pub log_filter: String,
}

/// Shared data-fetching policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Values younger than this are served without a request.
    pub dedupe_interval: Duration,
    /// Extra attempts after a failed fetch. 404 and 401 are never retried.
    pub retry_count: u32,
    pub retry_delay: Duration,
    pub capacity: usize,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            dedupe_interval: Duration::from_secs(5),
            retry_count: 2,
            retry_delay: Duration::from_millis(250),
            capacity: 256,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            cache_dir: PathBuf::from("./.cache"),
            fetch: FetchPolicy::default(),
            request_timeout: Duration::from_secs(10),
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let fetch = FetchPolicy {
            dedupe_interval: Duration::from_secs(parse_or(
                "SOCIALIT_DEDUPE_SECS",
                var("SOCIALIT_DEDUPE_SECS"),
                defaults.fetch.dedupe_interval.as_secs(),
            )?),
            retry_count: parse_or(
                "SOCIALIT_RETRY_COUNT",
                var("SOCIALIT_RETRY_COUNT"),
                defaults.fetch.retry_count,
            )?,
            retry_delay: Duration::from_millis(parse_or(
                "SOCIALIT_RETRY_DELAY_MS",
                var("SOCIALIT_RETRY_DELAY_MS"),
                250,
            )?),
            capacity: parse_or(
                "SOCIALIT_CACHE_CAPACITY",
                var("SOCIALIT_CACHE_CAPACITY"),
                defaults.fetch.capacity,
            )?,
        };

        Ok(Self {
            api_url: normalize_api_url(var("SOCIALIT_API_URL").as_deref().unwrap_or("")),
            bind_addr: var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            cache_dir: var("SOCIALIT_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            fetch,
            request_timeout: Duration::from_secs(parse_or(
                "SOCIALIT_REQUEST_TIMEOUT_SECS",
                var("SOCIALIT_REQUEST_TIMEOUT_SECS"),
                10,
            )?),
            log_filter: var("SOCIALIT_LOG").unwrap_or(defaults.log_filter),
        })
    }
}

/// Strips trailing slashes; an empty URL means the local backend.
pub fn normalize_api_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_or<T: FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.fetch, FetchPolicy::default());
    }

    #[test]
    fn test_api_url_trailing_slash_is_stripped() {
        let config = AppConfig::from_lookup(lookup(&[(
            "SOCIALIT_API_URL",
            "https://cms.example.com/",
        )]))
        .unwrap();
        assert_eq!(config.api_url, "https://cms.example.com");
    }

    #[test]
    fn test_blank_api_url_falls_back_to_local_backend() {
        assert_eq!(normalize_api_url("  "), DEFAULT_API_URL);
        assert_eq!(normalize_api_url("/"), DEFAULT_API_URL);
    }

    #[test]
    fn test_malformed_number_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[("SOCIALIT_RETRY_COUNT", "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("SOCIALIT_RETRY_COUNT"));
    }

    #[test]
    fn test_fetch_policy_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("SOCIALIT_DEDUPE_SECS", "30"),
            ("SOCIALIT_RETRY_COUNT", "0"),
            ("SOCIALIT_RETRY_DELAY_MS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.fetch.dedupe_interval, Duration::from_secs(30));
        assert_eq!(config.fetch.retry_count, 0);
        assert_eq!(config.fetch.retry_delay, Duration::from_millis(5));
    }
}
