//! # lira-core: Pure Logic for the Lira Companion
//!
//! Converts between the old Syrian pound, the redenominated (new) Syrian
//! pound and the US dollar, and plans how to pay a cash amount with the
//! banknotes a user has on hand.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Lira Companion Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    lira-session (app layer)                     │   │
//! │  │    edit_converter_field ─► set_paid ─► toggle_denomination     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ lira-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐ ┌───────────┐ ┌───────────┐ ┌────────────┐  │   │
//! │  │   │denomination │ │  planner  │ │ converter │ │   change   │  │   │
//! │  │   │  catalogs   │ │  greedy   │ │ old/new/$ │ │ paid-price │  │   │
//! │  │   │  selection  │ │  + exact  │ │  fields   │ │            │  │   │
//! │  │   └─────────────┘ └───────────┘ └───────────┘ └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │                 lira-rates (USD rate, cached)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `OldLira`, an integer amount in old-era units
//! - [`denomination`] - Banknote catalogs and the user's enabled selection
//! - [`planner`] - Composes a target amount out of enabled banknotes
//! - [`converter`] - The three linked old/new/USD fields
//! - [`change`] - Change owed after paying in new-era units
//! - [`validation`] - Input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use lira_core::{plan, DenominationSelection, Era, OldLira};
//!
//! let selection = DenominationSelection::default(); // everything enabled
//! let plan = plan(OldLira::from_old(52_550), &selection).unwrap();
//!
//! assert!(plan.is_possible);
//! assert_eq!(plan.items[0].era, Era::New);
//! assert_eq!(plan.items[0].denomination, 500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod change;
pub mod converter;
pub mod denomination;
pub mod error;
pub mod money;
pub mod planner;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use change::{calculate_change, ChangeCalculator, ChangeOutcome};
pub use converter::{Converter, ConverterField};
pub use denomination::{Denomination, DenominationSelection, Era};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::OldLira;
pub use planner::{
    plan, plan_amount, plan_amount_with, plan_with, PaymentPlan, PlanItem, PlanStrategy,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Old-era units per new-era unit.
///
/// The redenomination removed two zeros: 1 new pound = 100 old pounds.
pub const REDENOMINATION_FACTOR: i64 = 100;

/// Largest target (in old units) the exact planner will search.
///
/// The exact strategy keeps one table entry per multiple of the enabled
/// notes' common divisor (at least 50), so a call stays under 200,000
/// entries. Larger targets are planned greedily.
pub const EXACT_PLAN_LIMIT: i64 = 10_000_000;
