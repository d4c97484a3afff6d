//! # State Module
//!
//! One state type per card, each behind its own lock.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                          Session                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │        │                  │                  │                 │        │
//! │        ▼                  ▼                  ▼                 ▼        │
//! │  ┌────────────┐  ┌──────────────┐  ┌───────────────┐  ┌─────────────┐  │
//! │  │ Converter  │  │ ChangeState  │  │ PlannerState  │  │ RateState   │  │
//! │  │ State      │  │              │  │               │  │             │  │
//! │  │ Arc<Mutex< │  │ Arc<Mutex<   │  │ Arc<Mutex<    │  │ Arc<tokio   │  │
//! │  │ Converter>>│  │ ChangeCalc>> │  │ Planner>>     │  │ Mutex<Rate  │  │
//! │  │            │  │              │  │               │  │ Service>>   │  │
//! │  └────────────┘  └──────────────┘  └───────────────┘  └─────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Card states: std Mutex, never held across an await                  │
//! │  • RateState: tokio Mutex, held across the HTTP fetch                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod change;
mod converter;
mod planner;
mod rates;

pub use change::ChangeState;
pub use converter::ConverterState;
pub use planner::{Planner, PlannerState, PlannerView};
pub use rates::{RateBadge, RateState};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks a card state. A panic in another holder leaves plain data behind,
/// so a poisoned lock is recovered rather than propagated.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
