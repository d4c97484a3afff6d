//! # lira-rates: SYP/USD Exchange Rate
//!
//! Fetches the dollar rate from a public feed, caches the last good value
//! on disk and keeps working from that value when the network is gone.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Rate Lifecycle                                  │
//! │                                                                         │
//! │  startup ──► get_rate(false) ──► fresh cache? ──yes──► use it           │
//! │                                       │                                 │
//! │                                       no                                │
//! │                                       ▼                                 │
//! │                                 online? ──no──► cached value (or none)  │
//! │                                       │                                 │
//! │                                      yes                                │
//! │                                       ▼                                 │
//! │                               HTTP GET feed ──ok──► store + use         │
//! │                                       │                                 │
//! │                                     error ──► offline, stale fallback   │
//! │                                                                         │
//! │  refresh button ──► get_rate(true)    (skips the freshness check)       │
//! │  online event   ──► on_online()       (clears the flag, get_rate(false))│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - `RatesConfig` (TOML file + environment)
//! - [`cache`] - `CachedRate` and the `RateStore` implementations
//! - [`source`] - `RateSource` and the reqwest-backed `HttpRateSource`
//! - [`service`] - `RateService`, the fetch/fallback policy
//! - [`error`] - `RateError`

pub mod cache;
pub mod config;
pub mod error;
pub mod service;
pub mod source;

pub use cache::{CachedRate, FileRateStore, MemoryRateStore, RateStore};
pub use config::RatesConfig;
pub use error::{RateError, RateResult};
pub use service::{RateOrigin, RateService, RateSnapshot};
pub use source::{HttpRateSource, RateSource};
