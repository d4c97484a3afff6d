//! # Change Calculator
//!
//! Works out the change owed when paying a new-era price with new-era notes,
//! and shows it in both eras (shops still hand back old notes).
//!
//! ## Outcomes
//! ```text
//! paid, price both numbers?
//!      │
//!      ├── no  ──► Empty         (nothing shown, no error)
//!      │
//!      ├── paid <  price ──► Insufficient  (flagged to the user)
//!      │
//!      └── paid >= price ──► Change { new: paid - price, old: new × 100 }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::converter::{new_to_old, parse_amount, sanitize_numeric_input};
use crate::money::OldLira;

/// Result of a change calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChangeOutcome {
    /// One or both inputs missing or unparseable.
    Empty,
    /// Paid less than the price.
    Insufficient,
    /// Change owed, in new and old units.
    Change {
        #[serde(rename = "changeNew")]
        change_new: f64,
        #[serde(rename = "changeOld")]
        change_old: f64,
    },
}

impl ChangeOutcome {
    /// Change in old units, rounded for the planner. `None` unless `Change`.
    pub fn change_old_amount(&self) -> Option<OldLira> {
        match self {
            ChangeOutcome::Change { change_old, .. } => Some(OldLira::from_display(*change_old)),
            _ => None,
        }
    }

    /// True for `Insufficient`.
    pub fn is_insufficient(&self) -> bool {
        matches!(self, ChangeOutcome::Insufficient)
    }
}

/// Pure change computation on amounts in new-era units.
///
/// ```rust
/// use lira_core::{calculate_change, ChangeOutcome};
///
/// assert_eq!(
///     calculate_change(100.0, 75.0),
///     ChangeOutcome::Change { change_new: 25.0, change_old: 2_500.0 }
/// );
/// assert_eq!(calculate_change(50.0, 75.0), ChangeOutcome::Insufficient);
/// ```
pub fn calculate_change(paid: f64, price: f64) -> ChangeOutcome {
    if paid.is_nan() || price.is_nan() {
        return ChangeOutcome::Empty;
    }
    if paid < price {
        return ChangeOutcome::Insufficient;
    }
    let change_new = paid - price;
    ChangeOutcome::Change {
        change_new,
        change_old: new_to_old(change_new),
    }
}

/// Text state of the change calculator card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChangeCalculator {
    paid: String,
    price: String,
}

impl ChangeCalculator {
    /// Paid field text (sanitised).
    pub fn paid(&self) -> &str {
        &self.paid
    }

    /// Price field text (sanitised).
    pub fn price(&self) -> &str {
        &self.price
    }

    /// Sets the amount handed to the shop, in new units.
    pub fn set_paid(&mut self, raw: &str) -> ChangeOutcome {
        self.paid = sanitize_numeric_input(raw);
        self.outcome()
    }

    /// Sets the item price, in new units.
    pub fn set_price(&mut self, raw: &str) -> ChangeOutcome {
        self.price = sanitize_numeric_input(raw);
        self.outcome()
    }

    /// Current outcome for the two fields.
    pub fn outcome(&self) -> ChangeOutcome {
        match (parse_amount(&self.paid), parse_amount(&self.price)) {
            (Some(paid), Some(price)) => calculate_change(paid, price),
            _ => ChangeOutcome::Empty,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_in_both_eras() {
        let outcome = calculate_change(100.0, 75.0);
        assert_eq!(
            outcome,
            ChangeOutcome::Change {
                change_new: 25.0,
                change_old: 2_500.0
            }
        );
        assert_eq!(outcome.change_old_amount(), Some(OldLira::from_old(2_500)));
    }

    #[test]
    fn test_exact_payment_is_zero_change() {
        assert_eq!(
            calculate_change(75.0, 75.0),
            ChangeOutcome::Change {
                change_new: 0.0,
                change_old: 0.0
            }
        );
    }

    #[test]
    fn test_insufficient_payment() {
        let outcome = calculate_change(50.0, 75.0);
        assert!(outcome.is_insufficient());
        assert_eq!(outcome.change_old_amount(), None);
    }

    #[test]
    fn test_calculator_fields() {
        let mut calc = ChangeCalculator::default();
        assert_eq!(calc.set_paid("100"), ChangeOutcome::Empty);
        assert_eq!(
            calc.set_price("75 SYP"),
            ChangeOutcome::Change {
                change_new: 25.0,
                change_old: 2_500.0
            }
        );
        assert_eq!(calc.price(), "75");

        assert_eq!(calc.set_paid("50"), ChangeOutcome::Insufficient);
        assert_eq!(calc.set_paid(""), ChangeOutcome::Empty);
        assert_eq!(calc.set_paid("."), ChangeOutcome::Empty);
    }

    #[test]
    fn test_fractional_change() {
        let outcome = calculate_change(10.5, 2.25);
        assert_eq!(outcome.change_old_amount(), Some(OldLira::from_old(825)));
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(calculate_change(100.0, 75.0)).unwrap();
        assert_eq!(json["status"], serde_json::json!("change"));
        assert_eq!(json["changeNew"], serde_json::json!(25.0));
        assert_eq!(json["changeOld"], serde_json::json!(2500.0));

        let json = serde_json::to_value(ChangeOutcome::Insufficient).unwrap();
        assert_eq!(json["status"], serde_json::json!("insufficient"));
    }
}
