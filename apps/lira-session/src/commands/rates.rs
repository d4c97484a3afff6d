//! # Rate Commands
//!
//! The refresh button and connectivity events.

use tracing::debug;

use crate::state::{RateBadge, RateState};

/// Resolves the rate. `force` skips the freshness check (refresh button).
pub async fn refresh_rate(rates: &RateState, force: bool) -> RateBadge {
    debug!(force, "refresh_rate command");
    rates.refresh(force).await
}

/// Reports a connectivity change from the platform.
pub async fn set_online(rates: &RateState, online: bool) -> RateBadge {
    debug!(online, "set_online command");
    rates.set_online(online).await
}
