use thiserror::Error;

/// Why a refresh cycle failed. Both variants end in the same error notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// The request never completed, or its body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// The request completed with a non-success status
    #[error("HTTP error! status: {status}")]
    Fetch { status: u16 },
}

impl RefreshError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RefreshError::Fetch { status } => Some(*status),
            RefreshError::Network(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Endpoint must not be empty")]
    EmptyEndpoint,

    #[error("Refresh interval must be greater than zero")]
    ZeroInterval,

    #[error("Unknown overlap policy: {0} (expected allow or skip)")]
    UnknownOverlap(String),

    #[error("Unknown render policy: {0} (expected verbatim, sanitized or plain)")]
    UnknownRender(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_carries_status() {
        let err = RefreshError::Fetch { status: 503 };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "HTTP error! status: 503");
    }

    #[test]
    fn test_network_error_has_no_status() {
        let err = RefreshError::network("connection refused");
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}
