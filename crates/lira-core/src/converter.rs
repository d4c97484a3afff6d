//! # Converter
//!
//! Three linked text fields (old pounds, new pounds, US dollars) where
//! editing any one recomputes the other two.
//!
//! ## Field Links
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │     OLD  ──── ÷ 100 ────►  NEW           OLD ──── ÷ rate ────► USD      │
//! │     OLD  ◄─── × 100 ─────  NEW           OLD ◄─── × rate ───── USD      │
//! │                                                                         │
//! │  • The edited field keeps the user's (sanitised) text verbatim          │
//! │  • Derived fields show at most 2 decimals, trailing zeros stripped      │
//! │  • Last writer wins, no cross-field validation                          │
//! │  • Empty or "." clears the other two fields                             │
//! │  • No rate: the USD field is cleared and USD edits clear old/new        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lira_core::{Converter, ConverterField};
//!
//! let mut converter = Converter::default();
//! converter.edit(ConverterField::Old, "50,000 SYP", Some(15_000.0));
//!
//! assert_eq!(converter.old_text(), "50000");
//! assert_eq!(converter.new_text(), "500");
//! assert_eq!(converter.usd_text(), "3.33");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::REDENOMINATION_FACTOR;

// =============================================================================
// Scalar Conversions
// =============================================================================

/// Old pounds to new pounds.
#[inline]
pub fn old_to_new(old: f64) -> f64 {
    old / REDENOMINATION_FACTOR as f64
}

/// New pounds to old pounds.
#[inline]
pub fn new_to_old(new: f64) -> f64 {
    new * REDENOMINATION_FACTOR as f64
}

/// Old pounds to dollars. `None` without a usable rate.
pub fn old_to_usd(old: f64, rate: Option<f64>) -> Option<f64> {
    usable_rate(rate).map(|rate| old / rate)
}

/// Dollars to old pounds. `None` without a usable rate.
pub fn usd_to_old(usd: f64, rate: Option<f64>) -> Option<f64> {
    usable_rate(rate).map(|rate| usd * rate)
}

/// A rate of zero, a negative or a non-finite rate counts as no rate.
fn usable_rate(rate: Option<f64>) -> Option<f64> {
    rate.filter(|r| r.is_finite() && *r > 0.0)
}

// =============================================================================
// Text Helpers
// =============================================================================

/// Keeps only ASCII digits and `.`.
///
/// ```rust
/// use lira_core::converter::sanitize_numeric_input;
///
/// assert_eq!(sanitize_numeric_input("1,250.5 ل.س"), "1250.5.");
/// ```
pub fn sanitize_numeric_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Parses the longest numeric prefix of sanitised text.
///
/// Accepts `digits[.digits]`, `.digits` and `digits.`; stops at the second
/// `.`, so `"1.2.3"` reads as `1.2`. Returns `None` when no digit is found.
pub fn parse_amount(text: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;

    for (idx, ch) in text.char_indices() {
        match ch {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = idx + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    text[..end].parse::<f64>().ok()
}

/// Renders a derived value: 2 decimals, trailing zeros and dot stripped.
///
/// ```rust
/// use lira_core::converter::format_value;
///
/// assert_eq!(format_value(500.0), "500");
/// assert_eq!(format_value(3.333333), "3.33");
/// assert_eq!(format_value(0.5), "0.5");
/// ```
pub fn format_value(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        fixed.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// Converter
// =============================================================================

/// One of the three converter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ConverterField {
    Old,
    New,
    Usd,
}

/// Text state of the converter card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Converter {
    old: String,
    new: String,
    usd: String,
    last_updated: Option<ConverterField>,
}

impl Converter {
    /// Old-pound field text.
    pub fn old_text(&self) -> &str {
        &self.old
    }

    /// New-pound field text.
    pub fn new_text(&self) -> &str {
        &self.new
    }

    /// Dollar field text.
    pub fn usd_text(&self) -> &str {
        &self.usd
    }

    /// The field the user edited last, if any.
    pub fn last_updated(&self) -> Option<ConverterField> {
        self.last_updated
    }

    /// Applies a keystroke-level edit to `field` and recomputes the others.
    pub fn edit(&mut self, field: ConverterField, raw: &str, rate: Option<f64>) {
        let text = sanitize_numeric_input(raw);
        let amount = if text.is_empty() || text == "." {
            None
        } else {
            parse_amount(&text)
        };
        let rate = usable_rate(rate);
        self.last_updated = Some(field);

        match field {
            ConverterField::Old => {
                self.old = text;
                match amount {
                    Some(old) => {
                        self.new = format_value(old_to_new(old));
                        self.usd = old_to_usd(old, rate).map(format_value).unwrap_or_default();
                    }
                    None => {
                        self.new.clear();
                        self.usd.clear();
                    }
                }
            }
            ConverterField::New => {
                self.new = text;
                match amount {
                    Some(new) => {
                        let old = new_to_old(new);
                        self.old = format_value(old);
                        self.usd = old_to_usd(old, rate).map(format_value).unwrap_or_default();
                    }
                    None => {
                        self.old.clear();
                        self.usd.clear();
                    }
                }
            }
            ConverterField::Usd => {
                self.usd = text;
                match amount.and_then(|usd| usd_to_old(usd, rate)) {
                    Some(old) => {
                        self.old = format_value(old);
                        self.new = format_value(old_to_new(old));
                    }
                    None => {
                        self.old.clear();
                        self.new.clear();
                    }
                }
            }
        }
    }

    /// Clears every field.
    pub fn reset(&mut self) {
        *self = Converter::default();
    }

    /// Text of the last edited field, for copying. `None` when empty.
    pub fn copy_value(&self) -> Option<&str> {
        let text = match self.last_updated? {
            ConverterField::Old => &self.old,
            ConverterField::New => &self.new,
            ConverterField::Usd => &self.usd,
        };
        (!text.is_empty()).then_some(text.as_str())
    }

    /// True when at least one field holds text.
    pub fn has_any_value(&self) -> bool {
        !(self.old.is_empty() && self.new.is_empty() && self.usd.is_empty())
    }

    /// Old-pound amount, when the field holds a number.
    pub fn old_amount(&self) -> Option<f64> {
        parse_amount(&self.old)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
