//! # Rate State
//!
//! The shared rate service behind an async lock, since a refresh holds it
//! across the network call.

use std::sync::Arc;

use lira_core::money::group_thousands;
use lira_rates::{RateService, RateSnapshot};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Header badge contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateBadge {
    #[serde(flatten)]
    pub snapshot: RateSnapshot,

    /// Rate rounded to whole pounds.
    pub display_rate: Option<i64>,

    /// `"14,751"`, or `"---"` when no rate is known.
    pub label: String,
}

impl RateBadge {
    fn from_service(service: &RateService) -> Self {
        let display_rate = service.display_rate();
        RateBadge {
            snapshot: service.snapshot(),
            display_rate,
            label: display_rate.map_or_else(|| "---".to_string(), group_thousands),
        }
    }
}

/// Thread-safe wrapper around the rate service.
#[derive(Clone)]
pub struct RateState {
    service: Arc<Mutex<RateService>>,
}

impl RateState {
    /// Wraps a configured service.
    pub fn new(service: RateService) -> Self {
        RateState {
            service: Arc::new(Mutex::new(service)),
        }
    }

    /// Current rate without fetching.
    pub async fn rate(&self) -> Option<f64> {
        self.service.lock().await.rate()
    }

    /// Resolves the rate (see `RateService::get_rate`).
    pub async fn refresh(&self, force: bool) -> RateBadge {
        let mut service = self.service.lock().await;
        service.get_rate(force).await;
        RateBadge::from_service(&service)
    }

    /// Applies a connectivity event. Coming back online refreshes.
    pub async fn set_online(&self, online: bool) -> RateBadge {
        let mut service = self.service.lock().await;
        if online {
            service.on_online().await;
        } else {
            service.set_online(false);
        }
        RateBadge::from_service(&service)
    }

    /// Current badge without fetching.
    pub async fn badge(&self) -> RateBadge {
        RateBadge::from_service(&*self.service.lock().await)
    }
}
