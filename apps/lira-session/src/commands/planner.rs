//! # Planner Commands
//!
//! ## Where the amount comes from
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  typed amount (old units) ──► set_payment_amount ───┐                   │
//! │                                                     ├──► Planner        │
//! │  change calculator result ──► use_change_as_payment ┘    (view)         │
//! │                                                                         │
//! │  note chips ──► toggle_denomination ──► replan with the same amount     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use lira_core::validation::validate_amount;
use lira_core::{Era, PlanStrategy};
use tracing::{debug, info};

use crate::error::{ApiError, ErrorCode, SessionResult};
use crate::state::{ChangeState, Planner, PlannerState};

/// Sets the amount to pay, in old units. Rounded to whole pounds for planning.
///
/// ## Errors
/// `VALIDATION_ERROR` for negative or non-finite amounts.
pub fn set_payment_amount(planner: &PlannerState, amount_old: f64) -> SessionResult<Planner> {
    debug!(amount_old, "set_payment_amount command");
    let amount_old = validate_amount(amount_old)?;
    Ok(planner.with_planner_mut(|p| {
        p.set_amount(amount_old);
        p.clone()
    }))
}

/// Plans the change owed by the change calculator.
///
/// ## Errors
/// `NO_CHANGE` when the calculator has no change to give (empty fields or
/// insufficient payment).
pub fn use_change_as_payment(
    change: &ChangeState,
    planner: &PlannerState,
) -> SessionResult<Planner> {
    let amount = change
        .with_calculator(|c| c.outcome().change_old_amount())
        .ok_or_else(|| ApiError::new(ErrorCode::NoChange, "No change to plan"))?;
    info!(amount = %amount, "Planning change amount");
    set_payment_amount(planner, amount.old_units() as f64)
}

/// Flips one banknote on or off.
///
/// ## Errors
/// `VALIDATION_ERROR` when the face is not printed in that era.
pub fn toggle_denomination(
    planner: &PlannerState,
    era: Era,
    face: u32,
) -> SessionResult<Planner> {
    debug!(%era, face, "toggle_denomination command");
    planner.with_planner_mut(|p| -> SessionResult<Planner> {
        p.toggle(era, face)?;
        Ok(p.clone())
    })
}

/// Switches between greedy and exact planning.
pub fn set_plan_strategy(planner: &PlannerState, strategy: PlanStrategy) -> Planner {
    debug!(?strategy, "set_plan_strategy command");
    planner.with_planner_mut(|p| {
        p.set_strategy(strategy);
        p.clone()
    })
}

/// Current planner card.
pub fn get_planner(planner: &PlannerState) -> Planner {
    planner.with_planner(|p| p.clone())
}
