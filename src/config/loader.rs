//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading service
//! settings and seed workers from YAML files.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::ledger::{NewWorker, create_worker};
use crate::models::Worker;
use crate::store::PayrollStore;

use super::types::{Settings, WorkerSeed, WorkersConfig};

/// Loads and provides access to service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── settings.yaml   # Server and ledger engine settings
/// └── workers.yaml    # Workers and rate cards seeded at startup
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_ledger::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Listening on port {}", loader.settings().server.port);
/// # Ok::<(), payroll_ledger::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    settings: Settings,
    workers: Vec<WorkerSeed>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if either file is missing
    /// - `ConfigParseError` if a file is not valid YAML for its schema, or a
    ///   setting is out of range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("settings.yaml");
        let settings = Self::load_yaml::<Settings>(&settings_path)?;
        Self::validate_settings(&settings, &settings_path)?;

        let workers_path = path.join("workers.yaml");
        let workers = Self::load_yaml::<WorkersConfig>(&workers_path)?.workers;

        info!(
            path = %path.display(),
            seed_workers = workers.len(),
            "Configuration loaded"
        );

        Ok(Self { settings, workers })
    }

    /// Builds a loader from already-parsed parts.
    pub fn from_parts(settings: Settings, workers: Vec<WorkerSeed>) -> Self {
        Self { settings, workers }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_settings(settings: &Settings, path: &Path) -> EngineResult<()> {
        let invalid = |message: &str| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message: message.to_string(),
        };

        if settings.payroll.max_upsert_attempts == 0 {
            return Err(invalid("payroll.max_upsert_attempts must be at least 1"));
        }
        if settings.payroll.attendance_page_size == 0 {
            return Err(invalid("payroll.attendance_page_size must be at least 1"));
        }
        Ok(())
    }

    /// Returns the service settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the workers to seed at startup.
    pub fn workers(&self) -> &[WorkerSeed] {
        &self.workers
    }

    /// Creates every seed worker, with its rate card when one is given.
    ///
    /// # Errors
    ///
    /// Fails on the first seed the ledger rejects, such as a duplicate id
    /// or a lone rate.
    pub fn seed_store(&self, store: &dyn PayrollStore) -> EngineResult<usize> {
        for seed in &self.workers {
            create_worker(
                store,
                NewWorker {
                    worker: Worker {
                        id: seed.id.clone(),
                        name: seed.name.clone(),
                        phone: seed.phone.clone(),
                        village: seed.village.clone(),
                    },
                    full_day_rate: seed.full_day_rate,
                    half_day_rate: seed.half_day_rate,
                },
            )?;
        }
        Ok(self.workers.len())
    }
}
