//! Runtime configuration for the news poller and the sidebar mount.
//!
//! Every field has a default, so an empty JSON object (or no environment at
//! all) yields a working config. Layering:
//! - browser: defaults, then the object passed to `mount_news_page`
//! - native: defaults, then `NEWS_PULSE_*` environment variables, then CLI flags

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::models::{Endpoint, RenderPolicy};
use crate::domain::services::{OverlapPolicy, RefreshSchedule};
use crate::shared::constants::{
    DEFAULT_INTERVAL_MS, DEFAULT_MIN_INTERVAL_MS, NEWS_CONTAINER_ID, SIDEBAR_ID,
    SIDEBAR_TOGGLE_ID,
};
use crate::shared::errors::{ConfigError, Result};

pub const ENV_ENDPOINT: &str = "NEWS_PULSE_ENDPOINT";
pub const ENV_INTERVAL_MS: &str = "NEWS_PULSE_INTERVAL_MS";
pub const ENV_OVERLAP: &str = "NEWS_PULSE_OVERLAP";
pub const ENV_RENDER: &str = "NEWS_PULSE_RENDER";

/// Element ids the DOM mount looks up at page-ready
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementIds {
    pub news_container: String,
    pub sidebar: String,
    pub sidebar_toggle: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            news_container: NEWS_CONTAINER_ID.to_string(),
            sidebar: SIDEBAR_ID.to_string(),
            sidebar_toggle: SIDEBAR_TOGGLE_ID.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PollerConfig {
    pub endpoint: Endpoint,
    pub interval_ms: u64,
    pub min_interval_ms: u64,
    pub overlap: OverlapPolicy,
    pub render: RenderPolicy,
    /// Log at DEBUG instead of INFO (includes the "Received HTML" preview)
    pub debug: bool,
    pub ids: ElementIds,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            interval_ms: DEFAULT_INTERVAL_MS,
            min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
            overlap: OverlapPolicy::default(),
            render: RenderPolicy::default(),
            debug: false,
            ids: ElementIds::default(),
        }
    }
}

impl PollerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `NEWS_PULSE_*` variables from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `NEWS_PULSE_*` names
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            config.endpoint = endpoint.parse()?;
        }
        if let Some(interval) = lookup(ENV_INTERVAL_MS) {
            config.interval_ms =
                interval
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidEnv {
                        name: ENV_INTERVAL_MS,
                        value: interval.clone(),
                    })?;
        }
        if let Some(overlap) = lookup(ENV_OVERLAP) {
            config.overlap = overlap.parse()?;
        }
        if let Some(render) = lookup(ENV_RENDER) {
            config.render = render.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        let ids = [
            &self.ids.news_container,
            &self.ids.sidebar,
            &self.ids.sidebar_toggle,
        ];
        if ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ConfigError::Invalid("element ids must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn schedule(&self) -> RefreshSchedule {
        RefreshSchedule::new(self.interval())
            .with_min_interval(Duration::from_millis(self.min_interval_ms))
            .with_overlap(self.overlap)
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PollerConfig::default();
        assert_eq!(config.endpoint.as_str(), "/latest-news");
        assert_eq!(config.interval(), Duration::from_secs(100));
        assert_eq!(config.overlap, OverlapPolicy::Allow);
        assert_eq!(config.render, RenderPolicy::Verbatim);
        assert_eq!(config.ids.news_container, "news-container");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(PollerConfig::from_json("{}").unwrap(), PollerConfig::default());
    }

    #[test]
    fn test_json_overrides() {
        let config = PollerConfig::from_json(
            r#"{
                "endpoint": "/news/latest",
                "intervalMs": 1000,
                "overlap": "skip",
                "render": "sanitized",
                "debug": true,
                "ids": { "sidebar": "nav" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.endpoint.as_str(), "/news/latest");
        assert_eq!(config.interval(), Duration::from_secs(1));
        assert_eq!(config.overlap, OverlapPolicy::Skip);
        assert_eq!(config.render, RenderPolicy::Sanitized);
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
        assert_eq!(config.ids.sidebar, "nav");
        assert_eq!(config.ids.sidebar_toggle, "sidebar-toggle");
    }

    #[test]
    fn test_json_rejects_bad_values() {
        assert!(PollerConfig::from_json(r#"{"intervalMs": 0}"#).is_err());
        assert!(PollerConfig::from_json(r#"{"endpoint": ""}"#).is_err());
        assert!(PollerConfig::from_json(r#"{"overlap": "maybe"}"#).is_err());
        assert!(PollerConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_from_env() {
        let config = PollerConfig::from_env_with(env(&[
            (ENV_ENDPOINT, "http://localhost:8000/latest-news"),
            (ENV_INTERVAL_MS, "1000"),
            (ENV_RENDER, "plain"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint.as_str(), "http://localhost:8000/latest-news");
        assert_eq!(config.interval_ms, 1000);
        assert_eq!(config.render, RenderPolicy::Plain);
        assert_eq!(config.overlap, OverlapPolicy::Allow);
    }

    #[test]
    fn test_from_env_rejects_bad_interval() {
        let err = PollerConfig::from_env_with(env(&[(ENV_INTERVAL_MS, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name: ENV_INTERVAL_MS, .. }));
    }

    #[test]
    fn test_schedule_applies_floor() {
        let config = PollerConfig {
            interval_ms: 250,
            ..PollerConfig::default()
        };
        assert_eq!(config.schedule().interval(), Duration::from_secs(1));
    }
}
