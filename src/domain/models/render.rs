use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::shared::errors::ConfigError;
use crate::shared::utils::{escape_html, sanitize_html};

/// How a successful response body becomes container markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPolicy {
    /// Assign the body byte-for-byte; the server is trusted
    #[default]
    Verbatim,
    /// Strip scripting and event handlers, keep everything else
    Sanitized,
    /// Show the body as literal text
    #[serde(alias = "text")]
    Plain,
}

impl RenderPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderPolicy::Verbatim => "verbatim",
            RenderPolicy::Sanitized => "sanitized",
            RenderPolicy::Plain => "plain",
        }
    }

    pub fn render(&self, body: &str) -> String {
        match self {
            RenderPolicy::Verbatim => body.to_string(),
            RenderPolicy::Sanitized => sanitize_html(body),
            RenderPolicy::Plain => escape_html(body),
        }
    }
}

impl std::fmt::Display for RenderPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "verbatim" | "raw" => Ok(RenderPolicy::Verbatim),
            "sanitized" | "sanitize" => Ok(RenderPolicy::Sanitized),
            "plain" | "text" => Ok(RenderPolicy::Plain),
            _ => Err(ConfigError::UnknownRender(s.to_string())),
        }
    }
}
