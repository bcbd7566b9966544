//! Runtime configuration: where the risk service lives and how requests are paced.
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `DIFUSO_URL` | Service base URL |
//! | `DIFUSO_TIMEOUT_SECS` | Per-request timeout in seconds (0 = default) |
//! | `DIFUSO_DEBOUNCE_MS` | Wait for input to settle before requesting (0 = off) |
//! | `DIFUSO_POLICY` | `latest-issued` (default) or `last-applied` |

use std::time::Duration;

use clap::ValueEnum;

use crate::consts::{DEFAULT_SERVICE_URL, DEFAULT_TIMEOUT};
use crate::trigger::{StalenessPolicy, TriggerConfig};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the risk service, without the `/riesgo` path.
    pub service_url: String,
    pub timeout: Duration,
    /// `None` fires a request on every change.
    pub debounce: Option<Duration>,
    pub policy: StalenessPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            debounce: None,
            policy: StalenessPolicy::default(),
        }
    }
}

impl Config {
    /// Create config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create config from any variable lookup. Unparsable values fall back to defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            service_url: lookup("DIFUSO_URL")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.service_url),
            timeout: lookup("DIFUSO_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(timeout_from_secs)
                .unwrap_or(defaults.timeout),
            debounce: lookup("DIFUSO_DEBOUNCE_MS")
                .and_then(|v| v.parse::<u64>().ok())
                .and_then(debounce_from_millis),
            policy: lookup("DIFUSO_POLICY")
                .and_then(|v| StalenessPolicy::from_str(&v, true).ok())
                .unwrap_or(defaults.policy),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = url.into();
        self
    }

    /// A zero timeout would fail every call; it keeps the current value instead.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    pub fn with_debounce(mut self, debounce: Option<Duration>) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_policy(mut self, policy: StalenessPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn trigger(&self) -> TriggerConfig {
        TriggerConfig {
            timeout: self.timeout,
            policy: self.policy,
        }
    }
}

/// A zero timeout means the default.
pub fn timeout_from_secs(secs: u64) -> Duration {
    if secs == 0 {
        DEFAULT_TIMEOUT
    } else {
        Duration::from_secs(secs)
    }
}

/// A zero window means no debounce.
pub fn debounce_from_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = from_map(&[]);
        assert_eq!(config, Config::default());
        assert_eq!(config.service_url, "http://127.0.0.1:8000");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.debounce.is_none());
        assert_eq!(config.policy, StalenessPolicy::LatestIssued);
    }

    #[test]
    fn reads_every_variable() {
        let config = from_map(&[
            ("DIFUSO_URL", "http://riesgo.local:9000"),
            ("DIFUSO_TIMEOUT_SECS", "3"),
            ("DIFUSO_DEBOUNCE_MS", "250"),
            ("DIFUSO_POLICY", "Last-Applied"),
        ]);
        assert_eq!(config.service_url, "http://riesgo.local:9000");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.debounce, Some(Duration::from_millis(250)));
        assert_eq!(config.policy, StalenessPolicy::LastApplied);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let config = from_map(&[
            ("DIFUSO_URL", ""),
            ("DIFUSO_TIMEOUT_SECS", "soon"),
            ("DIFUSO_DEBOUNCE_MS", "-1"),
            ("DIFUSO_POLICY", "whatever"),
        ]);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn zero_debounce_is_off() {
        let config = from_map(&[("DIFUSO_DEBOUNCE_MS", "0")]);
        assert!(config.debounce.is_none());
        assert_eq!(debounce_from_millis(0), None);
        assert_eq!(debounce_from_millis(5), Some(Duration::from_millis(5)));
    }

    #[test]
    fn builders_override_fields() {
        let config = Config::default()
            .with_url("http://other")
            .with_timeout(Duration::from_secs(1))
            .with_debounce(Some(Duration::from_millis(100)))
            .with_policy(StalenessPolicy::LastApplied);
        assert_eq!(config.service_url, "http://other");
        let trigger = config.trigger();
        assert_eq!(trigger.timeout, Duration::from_secs(1));
        assert_eq!(trigger.policy, StalenessPolicy::LastApplied);
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let config = from_map(&[("DIFUSO_TIMEOUT_SECS", "0")]);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(timeout_from_secs(0), DEFAULT_TIMEOUT);
        assert_eq!(timeout_from_secs(4), Duration::from_secs(4));

        let config = Config::default()
            .with_timeout(Duration::from_secs(2))
            .with_timeout(Duration::ZERO);
        assert_eq!(config.timeout, Duration::from_secs(2));
    }
}
