//! # Planner State
//!
//! Amount to pay, enabled banknotes, strategy and the resulting plan.
//!
//! ## Update Rule
//! ```text
//! amount / strategy ──► evaluate() ──► commit input + view
//!
//! note toggle ──► candidate selection ──ok──► evaluate() ──► commit
//!                        │
//!                       err ──► state untouched, error returned
//! ```

use std::sync::{Arc, Mutex};

use lira_core::planner::plan_amount_with;
use lira_core::{CoreResult, DenominationSelection, Era, PaymentPlan, PlanStrategy};
use serde::{Deserialize, Serialize};

use super::lock;

/// What the planner card shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlannerView {
    /// No positive amount entered.
    #[default]
    NoInput,
    /// Enabled notes cannot cover the amount exactly.
    Impossible { plan: PaymentPlan },
    /// Exact composition found.
    Plan { plan: PaymentPlan },
}

impl PlannerView {
    /// The plan, for either plan-bearing variant.
    pub fn plan(&self) -> Option<&PaymentPlan> {
        match self {
            PlannerView::NoInput => None,
            PlannerView::Impossible { plan } | PlannerView::Plan { plan } => Some(plan),
        }
    }
}

fn evaluate(
    strategy: PlanStrategy,
    amount_old: f64,
    selection: &DenominationSelection,
) -> PlannerView {
    match plan_amount_with(strategy, amount_old, selection) {
        None => PlannerView::NoInput,
        Some(plan) if plan.is_possible => PlannerView::Plan { plan },
        Some(plan) => PlannerView::Impossible { plan },
    }
}

/// Planner card contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Planner {
    amount_old: f64,
    selection: DenominationSelection,
    strategy: PlanStrategy,
    view: PlannerView,
}

impl Planner {
    /// Amount to pay in old units, as entered.
    pub fn amount_old(&self) -> f64 {
        self.amount_old
    }

    /// Enabled banknotes.
    pub fn selection(&self) -> &DenominationSelection {
        &self.selection
    }

    /// Active strategy.
    pub fn strategy(&self) -> PlanStrategy {
        self.strategy
    }

    /// Current result.
    pub fn view(&self) -> &PlannerView {
        &self.view
    }

    /// Replaces the amount and replans.
    pub fn set_amount(&mut self, amount_old: f64) -> &PlannerView {
        self.amount_old = amount_old;
        self.replan()
    }

    /// Switches strategy and replans.
    pub fn set_strategy(&mut self, strategy: PlanStrategy) -> &PlannerView {
        self.strategy = strategy;
        self.replan()
    }

    /// Flips one banknote, replans and returns its new state.
    pub fn toggle(&mut self, era: Era, face: u32) -> CoreResult<bool> {
        let mut selection = self.selection.clone();
        let enabled = selection.toggle(era, face)?;
        self.selection = selection;
        self.replan();
        Ok(enabled)
    }

    fn replan(&mut self) -> &PlannerView {
        self.view = evaluate(self.strategy, self.amount_old, &self.selection);
        &self.view
    }
}

/// Thread-safe wrapper around the planner card.
#[derive(Debug, Clone, Default)]
pub struct PlannerState {
    planner: Arc<Mutex<Planner>>,
}

impl PlannerState {
    /// Creates a planner with every note enabled and no amount.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the planner.
    pub fn with_planner<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Planner) -> R,
    {
        f(&lock(&self.planner))
    }

    /// Executes a function with write access to the planner.
    pub fn with_planner_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Planner) -> R,
    {
        f(&mut lock(&self.planner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lira_core::{CoreError, OldLira};

    #[test]
    fn test_no_input_until_positive_amount() {
        let mut planner = Planner::default();
        assert_eq!(planner.view(), &PlannerView::NoInput);

        assert_eq!(planner.set_amount(0.0), &PlannerView::NoInput);
        assert!(matches!(
            planner.set_amount(60_000.0),
            PlannerView::Plan { .. }
        ));
    }

    #[test]
    fn test_toggle_replans() {
        let mut planner = Planner::default();
        planner.set_amount(300.0);
        assert!(matches!(planner.view(), PlannerView::Plan { .. }));

        for face in [500, 200, 100, 50] {
            planner.toggle(Era::Old, face).unwrap();
        }
        // nothing small enough is left
        let plan = planner.view().plan().unwrap();
        assert!(matches!(planner.view(), PlannerView::Impossible { .. }));
        assert_eq!(plan.remainder, OldLira::from_old(300));

        assert!(planner.toggle(Era::Old, 100).unwrap());
        assert!(matches!(planner.view(), PlannerView::Plan { .. }));
    }

    #[test]
    fn test_unknown_face_leaves_state() {
        let mut planner = Planner::default();
        let before = planner.clone();
        assert!(matches!(
            planner.toggle(Era::New, 20),
            Err(CoreError::Validation(_))
        ));
        assert_eq!(planner, before);
    }

    #[test]
    fn test_large_amount_in_exact_mode_replans() {
        let mut planner = Planner::default();
        planner.set_strategy(PlanStrategy::Exact);
        planner.set_amount(5_000.0);

        let view = planner.set_amount(50_000_000.0).clone();
        assert_eq!(planner.amount_old(), 50_000_000.0);
        let plan = view.plan().unwrap();
        assert!(matches!(view, PlannerView::Plan { .. }));
        assert_eq!(plan.total, OldLira::from_old(50_000_000));
        assert_eq!(plan.summary(), "1,000×500 (new)");
    }

    #[test]
    fn test_restored_planner_rejects_unknown_faces() {
        let json = r#"{
            "amountOld": 100.0,
            "selection": {"newEra": {"0": true}, "oldEra": {}},
            "strategy": "greedy",
            "view": {"status": "no_input"}
        }"#;
        assert!(serde_json::from_str::<Planner>(json).is_err());
    }

    #[test]
    fn test_view_serialization() {
        let mut planner = Planner::default();
        planner.set_amount(1_075.0);
        let json = serde_json::to_value(&planner).unwrap();
        assert_eq!(json["amountOld"], serde_json::json!(1075.0));
        assert_eq!(json["strategy"], serde_json::json!("greedy"));
        assert_eq!(json["view"]["status"], serde_json::json!("impossible"));
        assert_eq!(json["view"]["plan"]["remainder"], serde_json::json!(25));
    }
}
