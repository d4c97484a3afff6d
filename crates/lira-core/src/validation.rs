//! # Validation Module
//!
//! Input checks for values that cross the session boundary.
//!
//! ## Where validation happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Keystrokes   ──► sanitize_numeric_input (converter)  never fails       │
//! │                                                                         │
//! │  Rate feed    ──► validate_rate          rejects 0, negative, NaN      │
//! │                                                                         │
//! │  Direct entry ──► validate_amount        rejects negative, NaN         │
//! │                                                                         │
//! │  Note toggle  ──► validate_face          rejects faces not printed     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lira_core::validation::{validate_face, validate_rate};
//! use lira_core::Era;
//!
//! assert!(validate_rate(14_750.0).is_ok());
//! assert!(validate_rate(0.0).is_err());
//! assert!(validate_face(Era::Old, 5000).is_ok());
//! assert!(validate_face(Era::New, 5000).is_err());
//! ```

use crate::denomination::Era;
use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an exchange rate (old pounds per dollar).
///
/// ## Rules
/// - Must be finite
/// - Must be strictly positive
pub fn validate_rate(rate: f64) -> ValidationResult<f64> {
    if !rate.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "rate".to_string(),
        });
    }
    if rate <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "rate".to_string(),
        });
    }
    Ok(rate)
}

/// Validates an amount entered for planning, in old units.
///
/// Zero is allowed (it means "nothing to plan").
pub fn validate_amount(amount: f64) -> ValidationResult<f64> {
    if !amount.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "amount".to_string(),
        });
    }
    if amount < 0.0 {
        return Err(ValidationError::Negative {
            field: "amount".to_string(),
        });
    }
    Ok(amount)
}

/// Validates that `face` is printed in `era`.
pub fn validate_face(era: Era, face: u32) -> ValidationResult<()> {
    if !era.is_catalogued(face) {
        return Err(ValidationError::UnknownDenomination { era, face });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
