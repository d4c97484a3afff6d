//! # Error Types
//!
//! Domain-specific error types for lira-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  lira-core errors (this file)                                          │
//! │  ├── CoreError        - Domain errors                                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  lira-rates errors (separate crate)                                    │
//! │  └── RateError        - Fetch / cache / config failures                │
//! │                                                                         │
//! │  Session errors (in app)                                               │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What is NOT an error
//! - A plan that cannot be composed (`PaymentPlan::is_possible == false`)
//! - A converter field left empty or holding only `"."`
//! - Paying less than the price (`ChangeOutcome::Insufficient`)
//!
//! Those are result states the caller renders, not failures.

use thiserror::Error;

use crate::denomination::Era;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// NaN or infinite input.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Face value is not part of the era's catalog.
    #[error("{face} is not a {era} denomination")]
    UnknownDenomination { era: Era, face: u32 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
