//! # Rate Service
//!
//! Decides whether to use the cached rate or fetch a new one, and tracks
//! whether the device looks offline.
//!
//! ## Decision Table
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │  cached?  fresh?  force?  online?  │  action                 origin      │
//! ├────────────────────────────────────┼─────────────────────────────────────┤
//! │  yes      yes     no      any      │  use cache              Cache       │
//! │  yes      -       -       no       │  use cache, no fetch    OfflineCache│
//! │  no       -       -       no       │  offline = true         (kept)      │
//! │  -        -       -       yes      │  fetch:                             │
//! │                                    │   ok      → store, offline = false  │
//! │                                    │             Network                 │
//! │                                    │   no rate → keep current value      │
//! │                                    │   error   → offline = true,         │
//! │                                    │             cached value if any     │
//! │                                    │             StaleFallback           │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Fetch failures are logged and absorbed. Callers only ever see a rate or
//! the absence of one.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cache::{CachedRate, FileRateStore, MemoryRateStore, RateStore};
use crate::config::RatesConfig;
use crate::error::{RateError, RateResult};
use crate::source::{HttpRateSource, RateSource};

/// Where the current rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateOrigin {
    /// No rate known yet.
    #[default]
    None,
    /// Fresh cached value.
    Cache,
    /// Cached value used because the device is offline.
    OfflineCache,
    /// Just fetched.
    Network,
    /// Cached value used after a failed fetch.
    StaleFallback,
}

/// What the header badge needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSnapshot {
    pub rate: Option<f64>,
    pub origin: RateOrigin,
    pub offline: bool,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Rate cache plus fetch policy.
pub struct RateService {
    store: Box<dyn RateStore>,
    source: Arc<dyn RateSource>,
    freshness: Duration,
    online: bool,
    offline: bool,
    current: Option<f64>,
    origin: RateOrigin,
    fetched_at: Option<DateTime<Utc>>,
}

impl RateService {
    /// Creates a service. The device is assumed online until told otherwise.
    pub fn new(
        store: Box<dyn RateStore>,
        source: Arc<dyn RateSource>,
        freshness: Duration,
    ) -> Self {
        Self {
            store,
            source,
            freshness,
            online: true,
            offline: false,
            current: None,
            origin: RateOrigin::None,
            fetched_at: None,
        }
    }

    /// Builds the HTTP source and file cache described by `config`.
    ///
    /// Without a usable data directory the cache lives in memory only.
    pub fn from_config(config: &RatesConfig) -> RateResult<Self> {
        let source = Arc::new(HttpRateSource::from_config(config)?);
        let store: Box<dyn RateStore> = match config.cache_path() {
            Some(path) => {
                info!(?path, "Using rate cache file");
                Box::new(FileRateStore::new(path))
            }
            None => {
                warn!("No data directory available, rate cache kept in memory");
                Box::new(MemoryRateStore::default())
            }
        };
        Ok(Self::new(store, source, config.freshness()))
    }

    /// Resolves the rate now. See the module table.
    pub async fn get_rate(&mut self, force: bool) -> Option<f64> {
        self.get_rate_at(force, Utc::now()).await
    }

    /// Resolves the rate as if the current time were `now`.
    pub async fn get_rate_at(&mut self, force: bool, now: DateTime<Utc>) -> Option<f64> {
        let cached = self.store.load();

        if let Some(record) = cached {
            if !force && record.is_fresh(now, self.freshness) {
                debug!(rate = record.rate, "Using fresh cached rate");
                self.adopt(record, RateOrigin::Cache);
                return self.current;
            }
            if !self.online {
                debug!(rate = record.rate, "Offline, using cached rate");
                self.adopt(record, RateOrigin::OfflineCache);
                return self.current;
            }
        }

        if !self.online {
            debug!("Offline with no cached rate");
            self.offline = true;
            return self.current;
        }

        match self.source.fetch_rate().await {
            Ok(rate) => {
                let record = CachedRate::new(rate, now);
                if let Err(e) = self.store.store(&record) {
                    warn!(error = %e, "Failed to cache fetched rate");
                }
                info!(rate, "Fetched SYP/USD rate");
                self.offline = false;
                self.adopt(record, RateOrigin::Network);
            }
            Err(RateError::MissingRate) => {
                warn!("Rate payload carried no SYP value, keeping current rate");
            }
            Err(e) => {
                warn!(error = %e, retryable = e.is_retryable(), "Error fetching rate");
                self.offline = true;
                if let Some(record) = cached {
                    self.adopt(record, RateOrigin::StaleFallback);
                }
            }
        }

        self.current
    }

    /// Records a connectivity change. Going offline only flips the flag.
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
        self.offline = !online;
    }

    /// Connectivity came back: clear the flag and refresh if stale.
    pub async fn on_online(&mut self) -> Option<f64> {
        self.set_online(true);
        self.get_rate(false).await
    }

    /// Current rate, if any.
    pub fn rate(&self) -> Option<f64> {
        self.current
    }

    /// Whether the last attempt looked offline.
    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Rate rounded for display.
    pub fn display_rate(&self) -> Option<i64> {
        self.current.map(|rate| rate.round() as i64)
    }

    /// Everything the view needs in one copy.
    pub fn snapshot(&self) -> RateSnapshot {
        RateSnapshot {
            rate: self.current,
            origin: self.origin,
            offline: self.offline,
            fetched_at: self.fetched_at,
        }
    }

    fn adopt(&mut self, record: CachedRate, origin: RateOrigin) {
        self.current = Some(record.rate);
        self.fetched_at = record.fetched_at();
        self.origin = origin;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const TWELVE_HOURS: Duration = Duration::from_secs(12 * 3600);

    /// Scripted source that counts calls.
    struct ScriptedSource {
        replies: Mutex<Vec<RateResult<f64>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(replies: Vec<RateResult<f64>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateSource for ScriptedSource {
        async fn fetch_rate(&self) -> RateResult<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                Err(RateError::Request("no scripted reply".into()))
            } else {
                replies.remove(0)
            }
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn service(store: MemoryRateStore, source: Arc<ScriptedSource>) -> RateService {
        RateService::new(Box::new(store), source, TWELVE_HOURS)
    }

    fn cached(rate: f64, hours_ago: i64) -> MemoryRateStore {
        MemoryRateStore::with_record(CachedRate::new(rate, now() - chrono::Duration::hours(hours_ago)))
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_fetch() {
        let source = ScriptedSource::new(vec![Ok(20_000.0)]);
        let mut svc = service(cached(14_000.0, 1), source.clone());

        assert_eq!(svc.get_rate_at(false, now()).await, Some(14_000.0));
        assert_eq!(source.calls(), 0);
        assert_eq!(svc.snapshot().origin, RateOrigin::Cache);
    }

    #[tokio::test]
    async fn test_force_refetches_fresh_cache() {
        let source = ScriptedSource::new(vec![Ok(15_000.0)]);
        let mut svc = service(cached(14_000.0, 1), source.clone());

        assert_eq!(svc.get_rate_at(true, now()).await, Some(15_000.0));
        assert_eq!(source.calls(), 1);
        assert_eq!(svc.snapshot().origin, RateOrigin::Network);
        assert_eq!(svc.snapshot().fetched_at, Some(now()));
    }

    #[tokio::test]
    async fn test_stale_cache_refetches_and_stores() {
        let source = ScriptedSource::new(vec![Ok(15_500.0)]);
        let mut svc = service(cached(14_000.0, 13), source.clone());

        assert_eq!(svc.get_rate_at(false, now()).await, Some(15_500.0));
        assert_eq!(source.calls(), 1);

        // the new record is fresh for the next call
        assert_eq!(svc.get_rate_at(false, now()).await, Some(15_500.0));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_offline_with_cache_uses_it_without_fetch() {
        let source = ScriptedSource::new(vec![Ok(15_000.0)]);
        let mut svc = service(cached(14_000.0, 30), source.clone());
        svc.set_online(false);

        assert_eq!(svc.get_rate_at(true, now()).await, Some(14_000.0));
        assert_eq!(source.calls(), 0);
        assert_eq!(svc.snapshot().origin, RateOrigin::OfflineCache);
        assert!(svc.is_offline());
    }

    #[tokio::test]
    async fn test_offline_without_cache() {
        let source = ScriptedSource::new(vec![]);
        let mut svc = service(MemoryRateStore::default(), source.clone());
        svc.set_online(false);

        assert_eq!(svc.get_rate_at(false, now()).await, None);
        assert_eq!(source.calls(), 0);
        assert!(svc.snapshot().offline);
        assert_eq!(svc.snapshot().origin, RateOrigin::None);
    }

    #[tokio::test]
    async fn test_failed_fetch_falls_back_to_stale_cache() {
        let source = ScriptedSource::new(vec![Err(RateError::Timeout)]);
        let mut svc = service(cached(14_000.0, 48), source.clone());

        assert_eq!(svc.get_rate_at(false, now()).await, Some(14_000.0));
        assert!(svc.is_offline());
        assert_eq!(svc.snapshot().origin, RateOrigin::StaleFallback);
    }

    #[tokio::test]
    async fn test_failed_fetch_without_cache() {
        let source = ScriptedSource::new(vec![Err(RateError::HttpStatus(502))]);
        let mut svc = service(MemoryRateStore::default(), source);

        assert_eq!(svc.get_rate_at(false, now()).await, None);
        assert!(svc.is_offline());
    }

    #[tokio::test]
    async fn test_missing_rate_keeps_previous_value() {
        let source = ScriptedSource::new(vec![Ok(14_000.0), Err(RateError::MissingRate)]);
        let mut svc = service(MemoryRateStore::default(), source.clone());

        assert_eq!(svc.get_rate_at(false, now()).await, Some(14_000.0));
        assert_eq!(svc.get_rate_at(true, now()).await, Some(14_000.0));
        assert_eq!(source.calls(), 2);
        assert!(!svc.is_offline());
        assert_eq!(svc.snapshot().origin, RateOrigin::Network);
    }

    #[tokio::test]
    async fn test_success_clears_offline_flag() {
        let source = ScriptedSource::new(vec![Err(RateError::Timeout), Ok(14_250.6)]);
        let mut svc = service(MemoryRateStore::default(), source);

        svc.get_rate_at(false, now()).await;
        assert!(svc.is_offline());

        svc.get_rate_at(true, now()).await;
        assert!(!svc.is_offline());
        assert_eq!(svc.display_rate(), Some(14_251));
    }

    #[tokio::test]
    async fn test_on_online_refreshes() {
        let source = ScriptedSource::new(vec![Ok(16_000.0)]);
        let mut svc = service(MemoryRateStore::default(), source.clone());
        svc.set_online(false);
        assert!(svc.is_offline());

        assert_eq!(svc.on_online().await, Some(16_000.0));
        assert!(!svc.is_offline());
        assert_eq!(source.calls(), 1);
    }

    #[test]
    fn test_snapshot_serialization() {
        let svc = service(MemoryRateStore::default(), ScriptedSource::new(vec![]));
        let json = serde_json::to_value(svc.snapshot()).unwrap();
        assert_eq!(json["origin"], serde_json::json!("none"));
        assert_eq!(json["offline"], serde_json::json!(false));
        assert!(json["fetchedAt"].is_null());
    }
}
