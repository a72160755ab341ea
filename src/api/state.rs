//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, Settings};
use crate::store::PayrollStore;

/// Shared application state.
///
/// Holds the payroll store and the loaded configuration. Cloning is cheap;
/// every clone refers to the same store.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<dyn PayrollStore>,
}

impl AppState {
    /// Creates a new application state over the given store.
    pub fn new(config: ConfigLoader, store: impl PayrollStore + 'static) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }

    /// Returns the loaded settings.
    pub fn settings(&self) -> &Settings {
        self.config.settings()
    }

    /// Returns the payroll store.
    pub fn store(&self) -> &dyn PayrollStore {
        self.store.as_ref()
    }
}
