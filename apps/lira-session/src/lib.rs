//! # Lira Session Library
//!
//! State and commands for one Lira Companion session: the old/new/USD
//! converter, the change calculator, the payment planner and the rate badge.
//!
//! ## Module Organization
//! ```text
//! lira_session/
//! ├── lib.rs          ◄─── You are here (Session, tracing setup)
//! ├── main.rs         ◄─── Binary: start a session, print the view
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── converter.rs◄─── Converter fields
//! │   ├── change.rs   ◄─── Change calculator fields
//! │   ├── planner.rs  ◄─── Amount, selection, strategy, plan
//! │   └── rates.rs    ◄─── Rate service + badge
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── converter.rs
//! │   ├── change.rs
//! │   ├── planner.rs
//! │   └── rates.rs
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. init_tracing()          EnvFilter, RUST_LOG overrides the default   │
//! │  2. RatesConfig::load       rates.toml + LIRA_RATE_* environment        │
//! │  3. Session::from_config    HTTP source + file cache                    │
//! │  4. session.start()         cached or fetched rate for the badge        │
//! │  5. commands...             each returns the card's next contents       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use lira_core::Converter;
use lira_rates::{RateService, RatesConfig};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::ChangeResponse;
use error::SessionResult;
use state::{ChangeState, ConverterState, Planner, PlannerState, RateBadge, RateState};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,lira=debug,reqwest=warn";

/// Everything a front end renders, in one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub converter: Converter,
    pub change: ChangeResponse,
    pub planner: Planner,
    pub rate: RateBadge,
}

/// One user session.
///
/// Clones share state, so a front end can hand a clone to each callback.
#[derive(Clone)]
pub struct Session {
    pub converter: ConverterState,
    pub change: ChangeState,
    pub planner: PlannerState,
    pub rates: RateState,
}

impl Session {
    /// Creates a session around an already configured rate service.
    pub fn new(rate_service: RateService) -> Self {
        Session {
            converter: ConverterState::new(),
            change: ChangeState::new(),
            planner: PlannerState::new(),
            rates: RateState::new(rate_service),
        }
    }

    /// Creates a session with the HTTP source and file cache from `config`.
    pub fn from_config(config: &RatesConfig) -> SessionResult<Self> {
        Ok(Self::new(RateService::from_config(config)?))
    }

    /// Resolves the initial rate (cache first).
    pub async fn start(&self) -> RateBadge {
        let badge = self.rates.refresh(false).await;
        info!(rate = ?badge.snapshot.rate, origin = ?badge.snapshot.origin, "Session started");
        badge
    }

    /// Snapshot of every card.
    pub async fn view(&self) -> SessionView {
        SessionView {
            converter: commands::get_converter(&self.converter),
            change: commands::get_change(&self.change),
            planner: commands::get_planner(&self.planner),
            rate: self.rates.badge().await,
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=lira_core=trace` - Show planner steps
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Calling it again is a no-op.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{
        edit_converter_field, set_paid, set_price, toggle_denomination, use_change_as_payment,
    };
    use crate::state::PlannerView;
    use crate::testing::session_with_rate;
    use lira_core::{ChangeOutcome, ConverterField, Era};
    use lira_rates::RateOrigin;

    #[tokio::test]
    async fn test_start_loads_rate() {
        let session = session_with_rate(14_000.0).await;
        let view = session.view().await;
        assert_eq!(view.rate.snapshot.rate, Some(14_000.0));
        assert_eq!(view.rate.snapshot.origin, RateOrigin::Network);
        assert_eq!(view.planner.view(), &PlannerView::NoInput);
        assert_eq!(view.change.outcome, ChangeOutcome::Empty);
    }

    #[tokio::test]
    async fn test_full_flow() {
        let session = session_with_rate(15_000.0).await;

        edit_converter_field(&session.converter, &session.rates, ConverterField::Usd, "2")
            .await;
        set_paid(&session.change, "1000");
        set_price(&session.change, "450");
        use_change_as_payment(&session.change, &session.planner).unwrap();
        toggle_denomination(&session.planner, Era::New, 500).unwrap();

        let view = session.view().await;
        assert_eq!(view.converter.old_text(), "30000");
        assert_eq!(view.planner.amount_old(), 55_000.0);
        let plan = view.planner.view().plan().unwrap();
        // 500 disabled: two 200s, one 100, one 50
        assert_eq!(plan.summary(), "2×200 (new) + 1×100 (new) + 1×50 (new)");
    }

    #[tokio::test]
    async fn test_view_serialization() {
        let session = session_with_rate(15_000.0).await;
        let json = serde_json::to_value(session.view().await).unwrap();

        assert_eq!(json["rate"]["origin"], serde_json::json!("network"));
        assert_eq!(json["rate"]["label"], serde_json::json!("15,000"));
        assert_eq!(json["planner"]["view"]["status"], serde_json::json!("no_input"));
        assert_eq!(json["change"]["outcome"]["status"], serde_json::json!("empty"));
        assert!(json["converter"]["lastUpdated"].is_null());
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
