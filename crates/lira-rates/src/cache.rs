//! # Rate Cache
//!
//! Keeps the last successfully fetched rate with the time it was fetched.
//!
//! ## Record Format
//! ```text
//! syp_usd_rate.json
//! {"rate": 14750.0, "timestamp": 1760700000000}
//!           │                     │
//!           │                     └── fetch time, Unix epoch milliseconds
//!           └── old pounds per US dollar
//! ```
//!
//! A missing, unreadable or corrupt file reads as "no cached rate". The
//! service then behaves as on first launch.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RateResult;

// =============================================================================
// CachedRate
// =============================================================================

/// A rate with its fetch time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachedRate {
    /// Old pounds per US dollar.
    pub rate: f64,
    /// Fetch time in epoch milliseconds.
    pub timestamp: i64,
}

impl CachedRate {
    /// Creates a record fetched at `at`.
    pub fn new(rate: f64, at: DateTime<Utc>) -> Self {
        Self {
            rate,
            timestamp: at.timestamp_millis(),
        }
    }

    /// Fetch time, when the timestamp is representable.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Whether the record is still within `window` at `now`.
    ///
    /// A record exactly `window` old is still fresh. A timestamp outside the
    /// calendar range is never fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        if self.fetched_at().is_none() {
            return false;
        }
        let window_ms = i64::try_from(window.as_millis()).unwrap_or(i64::MAX);
        now.timestamp_millis()
            .checked_sub(self.timestamp)
            .is_some_and(|age_ms| age_ms <= window_ms)
    }
}

// =============================================================================
// RateStore
// =============================================================================

/// Persistence for the last good rate.
pub trait RateStore: Send + Sync {
    /// Returns the cached record, if any.
    fn load(&self) -> Option<CachedRate>;

    /// Replaces the cached record.
    fn store(&mut self, record: &CachedRate) -> RateResult<()>;
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct FileRateStore {
    path: PathBuf,
}

impl FileRateStore {
    /// Store backed by the file at `path`. Nothing is read until `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RateStore for FileRateStore {
    fn load(&self) -> Option<CachedRate> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "No cached rate yet");
                return None;
            }
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Failed to read cached rate");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(path = ?self.path, error = %e, "Ignoring corrupt cached rate");
                None
            }
        }
    }

    fn store(&mut self, record: &CachedRate) -> RateResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(record)?)?;
        debug!(path = ?self.path, rate = record.rate, "Cached rate written");
        Ok(())
    }
}

/// In-memory store, for tests and for running without a data directory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRateStore {
    record: Option<CachedRate>,
}

impl MemoryRateStore {
    /// Store seeded with `record`.
    pub fn with_record(record: CachedRate) -> Self {
        Self {
            record: Some(record),
        }
    }
}

impl RateStore for MemoryRateStore {
    fn load(&self) -> Option<CachedRate> {
        self.record
    }

    fn store(&mut self, record: &CachedRate) -> RateResult<()> {
        self.record = Some(*record);
        Ok(())
    }
}
