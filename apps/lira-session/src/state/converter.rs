//! # Converter State
//!
//! The three linked old/new/USD fields.

use std::sync::{Arc, Mutex};

use lira_core::Converter;

use super::lock;

/// Thread-safe wrapper around the converter card.
#[derive(Debug, Clone, Default)]
pub struct ConverterState {
    converter: Arc<Mutex<Converter>>,
}

impl ConverterState {
    /// Creates an empty converter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the converter.
    pub fn with_converter<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Converter) -> R,
    {
        f(&lock(&self.converter))
    }

    /// Executes a function with write access to the converter.
    pub fn with_converter_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Converter) -> R,
    {
        f(&mut lock(&self.converter))
    }
}
