use serde::{Deserialize, Serialize};

use crate::shared::constants::{CACHE_BUST_PARAM, DEFAULT_ENDPOINT};
use crate::shared::errors::{ConfigError, Result};

/// The URL polled for the news fragment. May be absolute (native watcher) or
/// page-relative (browser).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Endpoint(String);

impl Endpoint {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Request URL carrying `t=<epoch_millis>` so no cache layer can answer it.
    /// The parameter goes before any `#fragment`.
    pub fn cache_busted(&self, epoch_millis: i64) -> String {
        let (base, fragment) = match self.0.split_once('#') {
            Some((base, fragment)) => (base, Some(fragment)),
            None => (self.0.as_str(), None),
        };

        let separator = if !base.contains('?') {
            "?"
        } else if base.ends_with('?') || base.ends_with('&') {
            ""
        } else {
            "&"
        };

        let mut url = format!("{base}{separator}{CACHE_BUST_PARAM}={epoch_millis}");
        if let Some(fragment) = fragment {
            url.push('#');
            url.push_str(fragment);
        }
        url
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self(DEFAULT_ENDPOINT.to_string())
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Endpoint {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Endpoint {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.0
    }
}
