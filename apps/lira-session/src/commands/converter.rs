//! # Converter Commands
//!
//! ```text
//! keystroke in OLD ──► edit_converter_field(Old, "50000")
//!                          │
//!                          ├── current rate (no fetch)
//!                          ▼
//!                      { old: "50000", new: "500", usd: "3.33" }
//! ```

use lira_core::{Converter, ConverterField};
use tracing::debug;

use crate::state::{ConverterState, RateState};

/// Applies an edit to one field using the rate currently known.
pub async fn edit_converter_field(
    converter: &ConverterState,
    rates: &RateState,
    field: ConverterField,
    raw: &str,
) -> Converter {
    let rate = rates.rate().await;
    debug!(?field, has_rate = rate.is_some(), "edit_converter_field command");
    converter.with_converter_mut(|c| {
        c.edit(field, raw, rate);
        c.clone()
    })
}

/// Clears all three fields.
pub fn reset_converter(converter: &ConverterState) -> Converter {
    debug!("reset_converter command");
    converter.with_converter_mut(|c| {
        c.reset();
        c.clone()
    })
}

/// Text of the last edited field. `None` leaves the clipboard alone.
pub fn copy_converter_value(converter: &ConverterState) -> Option<String> {
    converter.with_converter(|c| c.copy_value().map(str::to_string))
}

/// Current converter fields.
pub fn get_converter(converter: &ConverterState) -> Converter {
    converter.with_converter(|c| c.clone())
}
