//! # Change State
//!
//! Paid and price fields of the change calculator.

use std::sync::{Arc, Mutex};

use lira_core::ChangeCalculator;

use super::lock;

/// Thread-safe wrapper around the change calculator card.
#[derive(Debug, Clone, Default)]
pub struct ChangeState {
    calculator: Arc<Mutex<ChangeCalculator>>,
}

impl ChangeState {
    /// Creates an empty calculator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the calculator.
    pub fn with_calculator<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ChangeCalculator) -> R,
    {
        f(&lock(&self.calculator))
    }

    /// Executes a function with write access to the calculator.
    pub fn with_calculator_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ChangeCalculator) -> R,
    {
        f(&mut lock(&self.calculator))
    }
}
