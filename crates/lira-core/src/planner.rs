//! # Payment Planner
//!
//! Composes a target amount out of the banknotes the user has enabled.
//!
//! ## Algorithm (default: greedy, two-phase)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  remainder = target (old units, already rounded)                        │
//! │                                                                         │
//! │  Phase 1: NEW era, faces descending                                     │
//! │     value = face × 100                                                  │
//! │     count = remainder / value     → emit if count > 0                   │
//! │     remainder -= count × value                                          │
//! │                                                                         │
//! │  Phase 2: OLD era, faces descending                                     │
//! │     value = face                                                        │
//! │     (same consumption)                                                  │
//! │                                                                         │
//! │  is_possible = (remainder == 0)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The era partition dominates value ordering: new 500 (= 50,000 old) and
//! even new 10 (= 1,000 old) are consumed before old 5000 is looked at.
//!
//! ## Known limitation
//! Greedy largest-first neither minimises the note count nor finds every
//! composition that exists. With only old 500 and old 200 enabled, 600 is
//! reported impossible (500 leaves 100) although 3 × 200 works. Greedy stays
//! the default; [`PlanStrategy::Exact`] is an opt-in alternative.
//!
//! ## Usage
//! ```rust
//! use lira_core::{plan, DenominationSelection, Era, OldLira};
//!
//! let selection = DenominationSelection::from_faces(&[500], &[5000]).unwrap();
//! let plan = plan(OldLira::from_old(100_000), &selection).unwrap();
//!
//! assert!(plan.is_possible);
//! assert_eq!(plan.items.len(), 1);
//! assert_eq!((plan.items[0].era, plan.items[0].denomination, plan.items[0].count), (Era::New, 500, 2));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;
use ts_rs::TS;

use crate::denomination::{Denomination, DenominationSelection, Era};
use crate::money::{group_thousands, OldLira};
use crate::EXACT_PLAN_LIMIT;

// =============================================================================
// Result Types
// =============================================================================

/// One line of a plan: `count` notes of `denomination` from `era`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    pub era: Era,
    /// Face value as printed on the note.
    pub denomination: u32,
    pub count: i64,
}

impl PlanItem {
    /// Old-unit value of all notes on this line.
    pub fn subtotal(&self) -> OldLira {
        OldLira::from_old(self.denomination as i64 * self.era.factor()) * self.count
    }
}

impl fmt::Display for PlanItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}×{} ({})",
            group_thousands(self.count),
            group_thousands(self.denomination as i64),
            self.era
        )
    }
}

/// Outcome of planning one target amount.
///
/// ## Invariants
/// - `remainder == 0` exactly when `is_possible`
/// - `sum(item.subtotal()) + remainder == total`
/// - items are ordered new era first, each era by descending face, and
///   every `count` is positive
///
/// An impossible plan is still a plan. Render it as "cannot be composed
/// with the selected notes", never as a partial payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPlan {
    pub items: Vec<PlanItem>,
    pub is_possible: bool,
    /// Old units left unmatched.
    pub remainder: OldLira,
    /// The rounded target.
    pub total: OldLira,
}

impl PaymentPlan {
    /// Total number of notes handed over.
    pub fn note_count(&self) -> i64 {
        self.items.iter().map(|item| item.count).sum()
    }

    /// Old units covered by the listed notes.
    pub fn covered(&self) -> OldLira {
        self.items
            .iter()
            .fold(OldLira::zero(), |acc, item| acc + item.subtotal())
    }

    /// One-line rendering, e.g. `2×500 (new) + 1×50 (old)`.
    pub fn summary(&self) -> String {
        self.items
            .iter()
            .map(PlanItem::to_string)
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

// =============================================================================
// Strategy
// =============================================================================

/// How the planner searches for a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PlanStrategy {
    /// Largest-first, new era before old era.
    #[default]
    Greedy,
    /// Fewest notes over the enabled set; falls back to the greedy result
    /// when no exact composition exists or the target is above
    /// [`EXACT_PLAN_LIMIT`].
    Exact,
}

// =============================================================================
// Entry Points
// =============================================================================

/// Plans `target` with the default greedy strategy.
///
/// Returns `None` when `target <= 0`: no plan is attempted for an empty
/// amount, which the caller shows as "no input yet" rather than as an empty
/// successful plan.
pub fn plan(target: OldLira, selection: &DenominationSelection) -> Option<PaymentPlan> {
    if !target.is_positive() {
        return None;
    }
    Some(greedy(target, selection))
}

/// Plans a display amount in old units, rounding it first.
///
/// The empty-amount check runs on the raw value, before rounding. A
/// positive amount that rounds to zero (e.g. `0.3`) therefore still yields
/// a plan, one with no items, `total == 0` and `is_possible == true`.
pub fn plan_amount(amount_old: f64, selection: &DenominationSelection) -> Option<PaymentPlan> {
    if is_empty_amount(amount_old) {
        return None;
    }
    Some(greedy(OldLira::from_display(amount_old), selection))
}

/// [`plan_amount`] with an explicit strategy.
pub fn plan_amount_with(
    strategy: PlanStrategy,
    amount_old: f64,
    selection: &DenominationSelection,
) -> Option<PaymentPlan> {
    if is_empty_amount(amount_old) {
        return None;
    }
    Some(run(strategy, OldLira::from_display(amount_old), selection))
}

/// Plans `target` with an explicit strategy.
///
/// `Exact` only searches targets up to [`EXACT_PLAN_LIMIT`]; larger ones get
/// the greedy plan.
pub fn plan_with(
    strategy: PlanStrategy,
    target: OldLira,
    selection: &DenominationSelection,
) -> Option<PaymentPlan> {
    if !target.is_positive() {
        return None;
    }
    Some(run(strategy, target, selection))
}

fn is_empty_amount(amount_old: f64) -> bool {
    amount_old.is_nan() || amount_old <= 0.0
}

fn run(strategy: PlanStrategy, target: OldLira, selection: &DenominationSelection) -> PaymentPlan {
    match strategy {
        PlanStrategy::Exact if target.old_units() <= EXACT_PLAN_LIMIT => exact(target, selection),
        PlanStrategy::Exact => {
            trace!(
                target = target.old_units(),
                limit = EXACT_PLAN_LIMIT,
                "target above exact limit, planning greedily"
            );
            greedy(target, selection)
        }
        PlanStrategy::Greedy => greedy(target, selection),
    }
}

// =============================================================================
// Greedy
// =============================================================================

fn greedy(target: OldLira, selection: &DenominationSelection) -> PaymentPlan {
    let mut remainder = target.old_units();
    let mut items = Vec::new();

    for era in Era::ALL {
        for face in selection.enabled(era) {
            let value = face as i64 * era.factor();
            let count = remainder / value;
            if count > 0 {
                items.push(PlanItem {
                    era,
                    denomination: face,
                    count,
                });
                remainder -= count * value;
            }
        }
    }

    trace!(
        target = target.old_units(),
        remainder,
        lines = items.len(),
        "greedy plan computed"
    );

    PaymentPlan {
        items,
        is_possible: remainder == 0,
        remainder: OldLira::from_old(remainder),
        total: target,
    }
}

// =============================================================================
// Exact (fewest notes)
// =============================================================================

const UNREACHABLE: u32 = u32::MAX;

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

fn exact(target: OldLira, selection: &DenominationSelection) -> PaymentPlan {
    let notes: Vec<Denomination> = Era::ALL
        .into_iter()
        .flat_map(|era| {
            selection
                .enabled(era)
                .into_iter()
                .map(move |face| Denomination { era, face })
        })
        .collect();

    let fallback = || greedy(target, selection);

    let step = notes
        .iter()
        .map(|note| note.value_in_old().old_units())
        .fold(0, gcd);
    if step == 0 || target.old_units() % step != 0 {
        return fallback();
    }

    // Work in multiples of the common step; every value divides evenly.
    let goal = (target.old_units() / step) as usize;
    let weights: Vec<usize> = notes
        .iter()
        .map(|note| (note.value_in_old().old_units() / step) as usize)
        .collect();

    let mut fewest = vec![UNREACHABLE; goal + 1];
    let mut last_note = vec![usize::MAX; goal + 1];
    fewest[0] = 0;

    for amount in 1..=goal {
        for (idx, &weight) in weights.iter().enumerate() {
            if weight > amount || fewest[amount - weight] == UNREACHABLE {
                continue;
            }
            let candidate = fewest[amount - weight] + 1;
            // Strictly fewer only, so ties keep the earlier (planning-order) note.
            if candidate < fewest[amount] {
                fewest[amount] = candidate;
                last_note[amount] = idx;
            }
        }
    }

    if fewest[goal] == UNREACHABLE {
        return fallback();
    }

    let mut counts = vec![0i64; notes.len()];
    let mut cursor = goal;
    while cursor > 0 {
        let idx = last_note[cursor];
        counts[idx] += 1;
        cursor -= weights[idx];
    }

    let items: Vec<PlanItem> = notes
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(note, count)| PlanItem {
            era: note.era,
            denomination: note.face,
            count,
        })
        .collect();

    trace!(
        target = target.old_units(),
        notes = fewest[goal],
        "exact plan computed"
    );

    PaymentPlan {
        items,
        is_possible: true,
        remainder: OldLira::zero(),
        total: target,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
