//! Configuration loading and management for the payroll service.
//!
//! This module loads server settings, ledger engine tuning, and the workers
//! seeded at startup from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_ledger::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Seeding {} workers", config.workers().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_ATTENDANCE_PAGE_SIZE, PayrollSettings, ServerSettings, Settings, WorkerSeed,
};
