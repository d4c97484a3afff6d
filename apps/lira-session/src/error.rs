//! # API Error Type
//!
//! Unified error type for session commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Lira Companion                         │
//! │                                                                         │
//! │  Front end                   Rust Session                               │
//! │  ─────────                   ────────────                               │
//! │                                                                         │
//! │  toggle_denomination(new, 20)                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ─── ValidationError ──────────┐               │  │
//! │  │         │                                        │               │  │
//! │  │         ▼                                        ▼               │  │
//! │  │  Rate config? ─────── RateError ──────────────── ApiError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  NOT errors: impossible plans, insufficient payment, cleared fields,   │
//! │  failed rate fetches. Those are states in the view.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lira_core::{CoreError, ValidationError};
use lira_rates::RateError;
use serde::{Deserialize, Serialize};

/// Result type alias for session commands.
pub type SessionResult<T> = Result<T, ApiError>;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "20 is not a new denomination"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// No change available to plan
    NoChange,

    /// Rate configuration is unusable
    ConfigError,

    /// Rate could not be obtained
    RateUnavailable,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<RateError> for ApiError {
    fn from(err: RateError) -> Self {
        if err.is_config_error() {
            ApiError::new(ErrorCode::ConfigError, err.to_string())
        } else if let RateError::Io(ref e) = err {
            tracing::error!("Rate cache I/O failed: {}", e);
            ApiError::internal("Rate cache unavailable")
        } else {
            ApiError::new(ErrorCode::RateUnavailable, err.to_string())
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use lira_core::Era;

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::from(ValidationError::UnknownDenomination {
            era: Era::New,
            face: 20,
        });
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], serde_json::json!("VALIDATION_ERROR"));
        assert_eq!(json["message"], serde_json::json!("20 is not a new denomination"));
    }

    #[test]
    fn test_core_error_codes() {
        let err = ApiError::from(CoreError::from(ValidationError::UnknownDenomination {
            era: Era::Old,
            face: 7,
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "7 is not a old denomination");
    }

    #[test]
    fn test_rate_error_codes() {
        assert_eq!(
            ApiError::from(RateError::InvalidUrl("ftp://x".into())).code,
            ErrorCode::ConfigError
        );
        assert_eq!(
            ApiError::from(RateError::Timeout).code,
            ErrorCode::RateUnavailable
        );
        assert_eq!(
            ApiError::from(RateError::Io("denied".into())).code,
            ErrorCode::Internal
        );
    }

    #[test]
    fn test_display() {
        let err = ApiError::new(ErrorCode::NoChange, "nothing to plan");
        assert_eq!(err.to_string(), "[NoChange] nothing to plan");
    }
}
