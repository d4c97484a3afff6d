//! # Commands Module
//!
//! Every user action, as a function over the state it touches.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── converter.rs  ◄─── edit_converter_field, reset, copy
//! ├── change.rs     ◄─── set_paid, set_price
//! ├── planner.rs    ◄─── amount, change hand-off, toggles, strategy
//! └── rates.rs      ◄─── refresh_rate, set_online
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the planner
//! fn toggle_denomination(planner: &PlannerState, era: Era, face: u32)
//!
//! // Needs the converter and the current rate
//! async fn edit_converter_field(converter: &ConverterState, rates: &RateState, ...)
//! ```
//!
//! Commands recompute derived values before returning, so the returned
//! value is always what the card should show next.

pub mod change;
pub mod converter;
pub mod planner;
pub mod rates;

pub use change::{get_change, set_paid, set_price, ChangeResponse};
pub use converter::{copy_converter_value, edit_converter_field, get_converter, reset_converter};
pub use planner::{
    get_planner, set_payment_amount, set_plan_strategy, toggle_denomination,
    use_change_as_payment,
};
pub use rates::{refresh_rate, set_online};
