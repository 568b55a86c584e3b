// crates/camerconnect-core/src/config.rs

//! Client configuration from the environment.
//!
//! | Variable                     | Default                 |
//! |------------------------------|-------------------------|
//! | `CAMERCONNECT_API_URL`       | `http://localhost:8000` |
//! | `CAMERCONNECT_TIMEOUT_SECS`  | `15`                    |
//! | `CAMERCONNECT_PAGE_SIZE`     | `6`                     |

use crate::error::{DirectoryError, Result};
use crate::query::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;

pub const ENV_API_URL: &str = "CAMERCONNECT_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "CAMERCONNECT_TIMEOUT_SECS";
pub const ENV_PAGE_SIZE: &str = "CAMERCONNECT_PAGE_SIZE";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin, without trailing slash.
    pub api_url: String,
    pub timeout: Duration,
    pub page_size: NonZeroUsize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys keep their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let mut cfg = Self::default();

        if let Some(url) = var(ENV_API_URL) {
            cfg = cfg.with_api_url(url)?;
        }
        if let Some(secs) = var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .parse()
                .map_err(|_| DirectoryError::Config(format!("{ENV_TIMEOUT_SECS}={secs} is not a number")))?;
            cfg.timeout = Duration::from_secs(secs);
        }
        if let Some(size) = var(ENV_PAGE_SIZE) {
            cfg.page_size = parse_page_size(&size)?;
        }
        Ok(cfg)
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(DirectoryError::Config(format!(
                "API URL must start with http:// or https://, got {url:?}"
            )));
        }
        self.api_url = url.to_owned();
        Ok(self)
    }

    /// Absolute URL for an API path such as `/api/secteurs/entreprises`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

pub fn parse_page_size(s: &str) -> Result<NonZeroUsize> {
    s.trim()
        .parse::<NonZeroUsize>()
        .map_err(|_| DirectoryError::Config(format!("page size must be a positive integer, got {s:?}")))
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
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.page_size.get(), 6);
    }

    #[test]
    fn reads_overrides() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://api.camerconnect.cm/"),
            (ENV_TIMEOUT_SECS, "30"),
            (ENV_PAGE_SIZE, "12"),
        ]))
        .unwrap();
        assert_eq!(cfg.api_url, "https://api.camerconnect.cm");
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.page_size.get(), 12);
        assert_eq!(
            cfg.endpoint("/api/entreprises/4"),
            "https://api.camerconnect.cm/api/entreprises/4"
        );
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(ClientConfig::from_lookup(lookup(&[(ENV_PAGE_SIZE, "0")])).is_err());
        assert!(ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).is_err());
        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "ftp://x")])).unwrap_err();
        assert!(matches!(err, DirectoryError::Config(_)));
    }
}
