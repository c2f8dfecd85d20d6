use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use validator::Validate;

use crate::domain::data::service::PAGE_SIZE_OPTIONS;

const ENV_PREFIX: &str = "FFCONSOLE_";

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone, Validate)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Backend base URL, without the `/api/v1` suffix.
    #[validate(url)]
    pub backend_url: String,
    pub backend_username: Option<String>,
    pub backend_password: Option<String>,
    #[validate(range(min = 100, max = 120_000))]
    pub request_timeout_ms: u64,
    /// Histogram start offset used when no time window is selected.
    #[validate(range(min = 60))]
    pub histogram_lookback_secs: i64,
    pub default_page_size: u64,
    /// 0 disables the live event watcher.
    pub event_poll_interval_secs: u64,
    pub log_dir: PathBuf,
    #[validate(length(min = 1))]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            backend_url: "http://127.0.0.1:5000".into(),
            backend_username: None,
            backend_password: None,
            request_timeout_ms: 10_000,
            histogram_lookback_secs: 86_400,
            default_page_size: 10,
            event_poll_interval_secs: 5,
            log_dir: PathBuf::from("./logs"),
            log_level: "info".into(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment (after `.env` has been applied).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| {
            lookup(&format!("{}{}", ENV_PREFIX, name))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let cfg = Self {
            bind_addr: parse_or(get("BIND_ADDR"), "BIND_ADDR", defaults.bind_addr)?,
            backend_url: get("BACKEND_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.backend_url),
            backend_username: get("BACKEND_USERNAME"),
            backend_password: get("BACKEND_PASSWORD"),
            request_timeout_ms: parse_or(
                get("REQUEST_TIMEOUT_MS"),
                "REQUEST_TIMEOUT_MS",
                defaults.request_timeout_ms,
            )?,
            histogram_lookback_secs: parse_or(
                get("HISTOGRAM_LOOKBACK_SECS"),
                "HISTOGRAM_LOOKBACK_SECS",
                defaults.histogram_lookback_secs,
            )?,
            default_page_size: parse_or(
                get("DEFAULT_PAGE_SIZE"),
                "DEFAULT_PAGE_SIZE",
                defaults.default_page_size,
            )?,
            event_poll_interval_secs: parse_or(
                get("EVENT_POLL_INTERVAL_SECS"),
                "EVENT_POLL_INTERVAL_SECS",
                defaults.event_poll_interval_secs,
            )?,
            log_dir: get("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        cfg.validate()
            .map_err(|e| anyhow!("invalid configuration: {}", e))?;

        if !PAGE_SIZE_OPTIONS.contains(&cfg.default_page_size) {
            bail!(
                "invalid configuration: {}DEFAULT_PAGE_SIZE must be one of {:?}",
                ENV_PREFIX,
                PAGE_SIZE_OPTIONS
            );
        }

        if cfg.backend_password.is_some() && cfg.backend_username.is_none() {
            bail!("invalid configuration: {}BACKEND_PASSWORD set without a username", ENV_PREFIX);
        }

        Ok(cfg)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn event_poll_interval(&self) -> Option<Duration> {
        match self.event_poll_interval_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

fn parse_or<T>(raw: Option<String>, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => v
            .parse::<T>()
            .with_context(|| format!("failed to parse {}{}='{}'", ENV_PREFIX, name, v)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.backend_url, "http://127.0.0.1:5000");
        assert_eq!(cfg.default_page_size, 10);
        assert_eq!(cfg.event_poll_interval(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn overrides_are_parsed_and_trimmed() {
        let cfg = load(&[
            ("FFCONSOLE_BACKEND_URL", "https://ff.example.com/"),
            ("FFCONSOLE_DEFAULT_PAGE_SIZE", "25"),
            ("FFCONSOLE_EVENT_POLL_INTERVAL_SECS", "0"),
            ("FFCONSOLE_BIND_ADDR", "127.0.0.1:8080"),
        ])
        .unwrap();
        assert_eq!(cfg.backend_url, "https://ff.example.com");
        assert_eq!(cfg.default_page_size, 25);
        assert_eq!(cfg.event_poll_interval(), None);
        assert_eq!(cfg.bind_addr.port(), 8080);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(load(&[("FFCONSOLE_REQUEST_TIMEOUT_MS", "soon")]).is_err());
        assert!(load(&[("FFCONSOLE_REQUEST_TIMEOUT_MS", "5")]).is_err());
        assert!(load(&[("FFCONSOLE_DEFAULT_PAGE_SIZE", "7")]).is_err());
        assert!(load(&[("FFCONSOLE_BACKEND_URL", "not a url")]).is_err());
        assert!(load(&[("FFCONSOLE_BACKEND_PASSWORD", "secret")]).is_err());
    }
}
