//! # Change Commands
//!
//! Paid and price are entered in new pounds; the outcome carries the change
//! in both eras.

use lira_core::{ChangeCalculator, ChangeOutcome};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::ChangeState;

/// Calculator fields plus outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeResponse {
    pub paid: String,
    pub price: String,
    pub outcome: ChangeOutcome,
}

impl From<&ChangeCalculator> for ChangeResponse {
    fn from(calc: &ChangeCalculator) -> Self {
        ChangeResponse {
            paid: calc.paid().to_string(),
            price: calc.price().to_string(),
            outcome: calc.outcome(),
        }
    }
}

/// Sets the amount handed over.
pub fn set_paid(change: &ChangeState, raw: &str) -> ChangeResponse {
    debug!("set_paid command");
    change.with_calculator_mut(|c| {
        c.set_paid(raw);
        ChangeResponse::from(&*c)
    })
}

/// Sets the price.
pub fn set_price(change: &ChangeState, raw: &str) -> ChangeResponse {
    debug!("set_price command");
    change.with_calculator_mut(|c| {
        c.set_price(raw);
        ChangeResponse::from(&*c)
    })
}

/// Current calculator fields and outcome.
pub fn get_change(change: &ChangeState) -> ChangeResponse {
    change.with_calculator(|c| ChangeResponse::from(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_flow() {
        let state = ChangeState::new();

        assert_eq!(set_paid(&state, "100").outcome, ChangeOutcome::Empty);

        let response = set_price(&state, "75");
        assert_eq!(
            response.outcome,
            ChangeOutcome::Change {
                change_new: 25.0,
                change_old: 2_500.0
            }
        );
        assert_eq!(response.paid, "100");

        assert!(set_paid(&state, "50").outcome.is_insufficient());
        assert_eq!(get_change(&state).paid, "50");
    }

    #[test]
    fn test_response_serialization() {
        let state = ChangeState::new();
        set_paid(&state, "10");
        let json = serde_json::to_value(set_price(&state, "12")).unwrap();
        assert_eq!(json["outcome"]["status"], serde_json::json!("insufficient"));
        assert_eq!(json["price"], serde_json::json!("12"));
    }
}
