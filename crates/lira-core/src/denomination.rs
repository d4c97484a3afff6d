//! # Denominations
//!
//! Fixed banknote catalogs for both currency eras and the user's current
//! selection of notes on hand.
//!
//! ## Catalogs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Era   Faces                                   Value in old units       │
//! │  ────  ────────────────────────────────────   ───────────────────       │
//! │  New   500  200  100  50  25  10               face × 100               │
//! │  Old   5000 2000 1000 500 200 100 50           face                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalogs never change at runtime. Only the enabled/disabled membership
//! held by [`DenominationSelection`] does.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::{group_thousands, OldLira};
use crate::validation::validate_face;
use crate::REDENOMINATION_FACTOR;

/// New-era faces, highest first.
pub const NEW_DENOMINATIONS: [u32; 6] = [500, 200, 100, 50, 25, 10];

/// Old-era faces, highest first.
pub const OLD_DENOMINATIONS: [u32; 7] = [5000, 2000, 1000, 500, 200, 100, 50];

// =============================================================================
// Era
// =============================================================================

/// Which side of the redenomination a banknote belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Era {
    /// Post-redenomination notes (1 new = 100 old).
    New,
    /// Pre-redenomination notes.
    Old,
}

impl Era {
    /// Both eras in planning order.
    pub const ALL: [Era; 2] = [Era::New, Era::Old];

    /// Old units per face unit.
    #[inline]
    pub const fn factor(&self) -> i64 {
        match self {
            Era::New => REDENOMINATION_FACTOR,
            Era::Old => 1,
        }
    }

    /// The era's fixed catalog, highest face first.
    pub const fn catalog(&self) -> &'static [u32] {
        match self {
            Era::New => &NEW_DENOMINATIONS,
            Era::Old => &OLD_DENOMINATIONS,
        }
    }

    /// Checks whether `face` is printed in this era.
    pub fn is_catalogued(&self, face: u32) -> bool {
        self.catalog().contains(&face)
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Era::New => write!(f, "new"),
            Era::Old => write!(f, "old"),
        }
    }
}

// =============================================================================
// Denomination
// =============================================================================

/// A banknote face value tagged with its era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Denomination {
    pub era: Era,
    pub face: u32,
}

impl Denomination {
    /// Creates a catalogued denomination.
    pub fn new(era: Era, face: u32) -> Result<Self, ValidationError> {
        validate_face(era, face)?;
        Ok(Denomination { era, face })
    }

    /// What one note is worth in old units.
    ///
    /// ```rust
    /// use lira_core::{Denomination, Era};
    ///
    /// let note = Denomination::new(Era::New, 25).unwrap();
    /// assert_eq!(note.value_in_old().old_units(), 2_500);
    /// ```
    #[inline]
    pub fn value_in_old(&self) -> OldLira {
        OldLira::from_old(self.face as i64 * self.era.factor())
    }

    /// Every catalogued denomination, new era first, each era descending.
    pub fn all() -> impl Iterator<Item = Denomination> {
        Era::ALL.into_iter().flat_map(|era| {
            era.catalog()
                .iter()
                .map(move |&face| Denomination { era, face })
        })
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", group_thousands(self.face as i64), self.era)
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Which notes the user currently has on hand.
///
/// An explicit face → enabled map per era, owned by the calling session and
/// passed into the planner on every call. Defaults to everything enabled.
///
/// Both maps always hold exactly their era's catalog. Deserializing checks
/// every face; catalogued faces missing from the input are disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DenominationSelection {
    new_era: BTreeMap<u32, bool>,
    old_era: BTreeMap<u32, bool>,
}

/// Wire shape of a selection before its faces are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSelection {
    #[serde(default)]
    new_era: BTreeMap<u32, bool>,
    #[serde(default)]
    old_era: BTreeMap<u32, bool>,
}

impl TryFrom<RawSelection> for DenominationSelection {
    type Error = ValidationError;

    fn try_from(raw: RawSelection) -> Result<Self, Self::Error> {
        let mut selection = Self::none_enabled();
        for (era, faces) in [(Era::New, raw.new_era), (Era::Old, raw.old_era)] {
            for (face, enabled) in faces {
                selection.set(era, face, enabled)?;
            }
        }
        Ok(selection)
    }
}

impl<'de> Deserialize<'de> for DenominationSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawSelection::deserialize(deserializer)?;
        DenominationSelection::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl Default for DenominationSelection {
    fn default() -> Self {
        DenominationSelection::all_enabled()
    }
}

impl DenominationSelection {
    /// Every catalogued note enabled.
    pub fn all_enabled() -> Self {
        Self::filled(true)
    }

    /// Every catalogued note disabled.
    pub fn none_enabled() -> Self {
        Self::filled(false)
    }

    /// Builds a selection from explicit face lists.
    ///
    /// Faces that are not catalogued for their era are rejected.
    pub fn from_faces(new_faces: &[u32], old_faces: &[u32]) -> Result<Self, ValidationError> {
        let mut selection = Self::none_enabled();
        for &face in new_faces {
            selection.set(Era::New, face, true)?;
        }
        for &face in old_faces {
            selection.set(Era::Old, face, true)?;
        }
        Ok(selection)
    }

    fn filled(enabled: bool) -> Self {
        DenominationSelection {
            new_era: NEW_DENOMINATIONS.iter().map(|&d| (d, enabled)).collect(),
            old_era: OLD_DENOMINATIONS.iter().map(|&d| (d, enabled)).collect(),
        }
    }

    fn map(&self, era: Era) -> &BTreeMap<u32, bool> {
        match era {
            Era::New => &self.new_era,
            Era::Old => &self.old_era,
        }
    }

    fn map_mut(&mut self, era: Era) -> &mut BTreeMap<u32, bool> {
        match era {
            Era::New => &mut self.new_era,
            Era::Old => &mut self.old_era,
        }
    }

    /// Flips one note on or off and returns its new state.
    pub fn toggle(&mut self, era: Era, face: u32) -> Result<bool, ValidationError> {
        validate_face(era, face)?;
        let slot = self.map_mut(era).entry(face).or_insert(false);
        *slot = !*slot;
        Ok(*slot)
    }

    /// Sets one note explicitly.
    pub fn set(&mut self, era: Era, face: u32, enabled: bool) -> Result<(), ValidationError> {
        validate_face(era, face)?;
        self.map_mut(era).insert(face, enabled);
        Ok(())
    }

    /// Returns whether a note is enabled. Unknown faces are never enabled.
    pub fn is_enabled(&self, era: Era, face: u32) -> bool {
        self.map(era).get(&face).copied().unwrap_or(false)
    }

    /// Enabled faces for an era, highest first.
    pub fn enabled(&self, era: Era) -> Vec<u32> {
        self.map(era)
            .iter()
            .rev()
            .filter(|(_, on)| **on)
            .map(|(&face, _)| face)
            .collect()
    }

    /// Re-enables every note of both eras.
    pub fn enable_all(&mut self) {
        *self = Self::all_enabled();
    }

    /// Disables every note of one era.
    pub fn disable_all(&mut self, era: Era) {
        self.map_mut(era).values_mut().for_each(|on| *on = false);
    }

    /// True when no note of either era is enabled.
    pub fn is_empty(&self) -> bool {
        Era::ALL
            .iter()
            .all(|&era| self.map(era).values().all(|&on| !on))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_are_descending_and_positive() {
        for era in Era::ALL {
            let catalog = era.catalog();
            assert!(catalog.iter().all(|&d| d > 0));
            assert!(catalog.windows(2).all(|w| w[0] > w[1]));
        }
    }

    #[test]
    fn test_value_in_old() {
        let new_500 = Denomination::new(Era::New, 500).unwrap();
        let old_5000 = Denomination::new(Era::Old, 5000).unwrap();
        assert_eq!(new_500.value_in_old().old_units(), 50_000);
        assert_eq!(old_5000.value_in_old().old_units(), 5_000);
    }

    #[test]
    fn test_unknown_denomination_rejected() {
        assert!(Denomination::new(Era::New, 5000).is_err());
        assert!(Denomination::new(Era::Old, 25).is_err());
    }

    #[test]
    fn test_all_lists_new_era_first() {
        let all: Vec<Denomination> = Denomination::all().collect();
        assert_eq!(all.len(), 13);
        assert_eq!(all[0], Denomination { era: Era::New, face: 500 });
        assert_eq!(all[6], Denomination { era: Era::Old, face: 5000 });
    }

    #[test]
    fn test_default_selection_enables_everything() {
        let selection = DenominationSelection::default();
        assert_eq!(selection.enabled(Era::New), NEW_DENOMINATIONS.to_vec());
        assert_eq!(selection.enabled(Era::Old), OLD_DENOMINATIONS.to_vec());
        assert!(!selection.is_empty());
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut selection = DenominationSelection::default();
        assert_eq!(selection.toggle(Era::Old, 50), Ok(false));
        assert!(!selection.is_enabled(Era::Old, 50));
        assert_eq!(selection.toggle(Era::Old, 50), Ok(true));
        assert!(selection.is_enabled(Era::Old, 50));
    }

    #[test]
    fn test_toggle_unknown_face() {
        let mut selection = DenominationSelection::default();
        let err = selection.toggle(Era::New, 1000).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownDenomination {
                era: Era::New,
                face: 1000
            }
        );
        assert!(!selection.is_enabled(Era::New, 1000));
    }

    #[test]
    fn test_from_faces_and_disable() {
        let mut selection = DenominationSelection::from_faces(&[25, 500], &[200]).unwrap();
        assert_eq!(selection.enabled(Era::New), vec![500, 25]);
        assert_eq!(selection.enabled(Era::Old), vec![200]);

        selection.disable_all(Era::New);
        assert!(selection.enabled(Era::New).is_empty());
        selection.disable_all(Era::Old);
        assert!(selection.is_empty());

        selection.enable_all();
        assert_eq!(selection, DenominationSelection::all_enabled());
    }

    #[test]
    fn test_selection_deserialize_checks_faces() {
        let zero = serde_json::from_str::<DenominationSelection>(r#"{"newEra":{"0":true},"oldEra":{}}"#);
        assert!(zero.is_err());
        let stray = serde_json::from_str::<DenominationSelection>(r#"{"oldEra":{"7":true}}"#);
        assert!(stray.is_err());

        let partial: DenominationSelection =
            serde_json::from_str(r#"{"newEra":{"500":true},"oldEra":{"50":true}}"#).unwrap();
        assert_eq!(partial.enabled(Era::New), vec![500]);
        assert_eq!(partial.enabled(Era::Old), vec![50]);
        assert_eq!(partial, DenominationSelection::from_faces(&[500], &[50]).unwrap());
    }

    #[test]
    fn test_selection_json_round_trip() {
        let selection = DenominationSelection::from_faces(&[25, 10], &[5000]).unwrap();
        let json = serde_json::to_string(&selection).unwrap();
        let back: DenominationSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, selection);
    }

    #[test]
    fn test_selection_serializes_camel_case() {
        let selection = DenominationSelection::from_faces(&[10], &[]).unwrap();
        let json = serde_json::to_value(&selection).unwrap();
        assert_eq!(json["newEra"]["10"], serde_json::json!(true));
        assert_eq!(json["oldEra"]["5000"], serde_json::json!(false));
    }
}
