//! # Rate Error Types
//!
//! Error types for loading config, fetching the rate and caching it.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rate Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Payload             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Request        │  │  MissingRate            │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  InvalidPayload         │ │
//! │  │  ConfigLoad/Save│  │  HttpStatus     │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │     Cache       │  Never surfaced to the user: the service logs      │
//! │  │  Io             │  and keeps whatever rate it already has.           │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for rate operations.
pub type RateResult<T> = Result<T, RateError>;

/// Rate error type covering config, transport, payload and cache failures.
#[derive(Debug, Error)]
pub enum RateError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid rate configuration.
    #[error("Invalid rate configuration: {0}")]
    InvalidConfig(String),

    /// Invalid rate endpoint.
    #[error("Invalid rate endpoint: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Request could not be sent or the body could not be read.
    #[error("Rate request failed: {0}")]
    Request(String),

    /// The provider did not answer in time.
    #[error("Rate request timed out")]
    Timeout,

    /// The provider answered with a non-success status.
    #[error("Rate provider returned HTTP {0}")]
    HttpStatus(u16),

    // =========================================================================
    // Payload Errors
    // =========================================================================
    /// The payload parsed but carries no usable `usd.syp` value.
    #[error("Rate payload has no SYP value")]
    MissingRate,

    /// The payload is not valid JSON.
    #[error("Invalid rate payload: {0}")]
    InvalidPayload(String),

    // =========================================================================
    // Cache Errors
    // =========================================================================
    /// Reading or writing a local file failed.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for RateError {
    fn from(err: std::io::Error) -> Self {
        RateError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RateError {
    fn from(err: serde_json::Error) -> Self {
        RateError::InvalidPayload(err.to_string())
    }
}

impl From<toml::de::Error> for RateError {
    fn from(err: toml::de::Error) -> Self {
        RateError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for RateError {
    fn from(err: toml::ser::Error) -> Self {
        RateError::ConfigSaveFailed(err.to_string())
    }
}

impl From<url::ParseError> for RateError {
    fn from(err: url::ParseError) -> Self {
        RateError::InvalidUrl(err.to_string())
    }
}

impl From<reqwest::Error> for RateError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RateError::Timeout
        } else if let Some(status) = err.status() {
            RateError::HttpStatus(status.as_u16())
        } else if err.is_decode() {
            RateError::InvalidPayload(err.to_string())
        } else {
            RateError::Request(err.to_string())
        }
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl RateError {
    /// Returns true if a later attempt may succeed.
    ///
    /// ## Retryable Errors
    /// - Network failures and timeouts
    /// - Server-side (5xx) and rate-limit (429) statuses
    pub fn is_retryable(&self) -> bool {
        match self {
            RateError::Request(_) | RateError::Timeout => true,
            RateError::HttpStatus(status) => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            RateError::InvalidConfig(_)
                | RateError::InvalidUrl(_)
                | RateError::ConfigLoadFailed(_)
                | RateError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(RateError::Timeout.is_retryable());
        assert!(RateError::Request("connection reset".into()).is_retryable());
        assert!(RateError::HttpStatus(503).is_retryable());
        assert!(RateError::HttpStatus(429).is_retryable());

        assert!(!RateError::HttpStatus(404).is_retryable());
        assert!(!RateError::MissingRate.is_retryable());
        assert!(!RateError::InvalidConfig("bad".into()).is_retryable());
    }

    #[test]
    fn test_config_errors() {
        assert!(RateError::InvalidUrl("ftp://x".into()).is_config_error());
        assert!(RateError::ConfigLoadFailed("eof".into()).is_config_error());
        assert!(!RateError::Io("denied".into()).is_config_error());
    }

    #[test]
    fn test_conversions() {
        let err: RateError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, RateError::InvalidPayload(_)));

        let err: RateError = url::Url::parse("not a url").unwrap_err().into();
        assert!(err.is_config_error());

        let err: RateError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().contains("gone"));
    }
}
