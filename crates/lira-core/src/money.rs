//! # Money Module
//!
//! Provides `OldLira`, the integer amount every plan is computed in.
//!
//! ## Why Old-Era Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TWO ERAS, ONE BASE UNIT                                                │
//! │                                                                         │
//! │  New note 25  = 2,500 old units                                         │
//! │  Old note 50  =    50 old units  ← smallest note in circulation         │
//! │                                                                         │
//! │  Every denomination of both eras is a whole number of OLD units, so     │
//! │  old units are the only base in which the planner never sees a          │
//! │  fraction. New-era amounts are multiplied by 100 on the way in.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lira_core::money::OldLira;
//!
//! let change = OldLira::from_new_units(25);
//! assert_eq!(change.old_units(), 2_500);
//! assert_eq!(change.to_string(), "2,500");
//!
//! // Display amounts are rounded before planning.
//! assert_eq!(OldLira::from_display(1_234.5).old_units(), 1_235);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::REDENOMINATION_FACTOR;

// =============================================================================
// OldLira Type
// =============================================================================

/// An amount in old-era Syrian pounds.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never wraps, remainders stay honest
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OldLira(i64);

impl OldLira {
    /// Creates an amount from old-era units.
    #[inline]
    pub const fn from_old(units: i64) -> Self {
        OldLira(units)
    }

    /// Creates an amount from whole new-era units (× 100).
    #[inline]
    pub const fn from_new_units(units: i64) -> Self {
        OldLira(units * REDENOMINATION_FACTOR)
    }

    /// Rounds a display amount (old units, possibly fractional) to the
    /// nearest whole old unit.
    ///
    /// ## Rounding
    /// Half away from zero. For the non-negative amounts the planner accepts
    /// this is plain round-half-up: `0.5 → 1`, `2.5 → 3`. Fractional old
    /// units cannot be paid with any note, so they are settled here once,
    /// before planning.
    ///
    /// Non-finite input maps to zero.
    ///
    /// ```rust
    /// use lira_core::money::OldLira;
    ///
    /// assert_eq!(OldLira::from_display(2.5).old_units(), 3);
    /// assert_eq!(OldLira::from_display(2.49).old_units(), 2);
    /// assert_eq!(OldLira::from_display(f64::NAN).old_units(), 0);
    /// ```
    pub fn from_display(amount: f64) -> Self {
        if !amount.is_finite() {
            return OldLira::zero();
        }
        OldLira(amount.round() as i64)
    }

    /// Returns the amount in old-era units.
    #[inline]
    pub const fn old_units(&self) -> i64 {
        self.0
    }

    /// Returns the amount in new-era units (may be fractional).
    #[inline]
    pub fn new_units(&self) -> f64 {
        self.0 as f64 / REDENOMINATION_FACTOR as f64
    }

    /// Returns zero.
    #[inline]
    pub const fn zero() -> Self {
        OldLira(0)
    }

    /// Checks if the amount is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the amount is greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with `,` thousands separators, e.g. `1,250,000`.
impl fmt::Display for OldLira {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&group_thousands(self.0))
    }
}

/// Formats an integer with `,` between groups of three digits.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

impl Default for OldLira {
    fn default() -> Self {
        OldLira::zero()
    }
}

impl Add for OldLira {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        OldLira(self.0 + other.0)
    }
}

impl AddAssign for OldLira {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for OldLira {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        OldLira(self.0 - other.0)
    }
}

impl SubAssign for OldLira {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a note count.
impl Mul<i64> for OldLira {
    type Output = Self;

    #[inline]
    fn mul(self, count: i64) -> Self {
        OldLira(self.0 * count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
