//! Configuration types for the payroll service.
//!
//! These structures are deserialized from the YAML files in a configuration
//! directory.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::ledger::DEFAULT_MAX_UPSERT_ATTEMPTS;

/// Default number of attendance records per listing page.
pub const DEFAULT_ATTENDANCE_PAGE_SIZE: usize = 15;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upsert_attempts() -> u32 {
    DEFAULT_MAX_UPSERT_ATTEMPTS
}

fn default_attendance_page_size() -> usize {
    DEFAULT_ATTENDANCE_PAGE_SIZE
}

/// Where the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Tuning for the ledger engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayrollSettings {
    /// How many times a summary upsert is tried before giving up with
    /// `StorageConflict`.
    #[serde(default = "default_max_upsert_attempts")]
    pub max_upsert_attempts: u32,
    /// Records per page when listing attendance.
    #[serde(default = "default_attendance_page_size")]
    pub attendance_page_size: usize,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            max_upsert_attempts: default_max_upsert_attempts(),
            attendance_page_size: default_attendance_page_size(),
        }
    }
}

/// Contents of `settings.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSettings,
    /// Ledger engine settings.
    #[serde(default)]
    pub payroll: PayrollSettings,
}

/// A worker loaded into the store at startup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorkerSeed {
    /// Worker id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Home village.
    #[serde(default)]
    pub village: String,
    /// Initial full-day rate.
    #[serde(default)]
    pub full_day_rate: Option<Decimal>,
    /// Initial half-day rate.
    #[serde(default)]
    pub half_day_rate: Option<Decimal>,
}

/// Contents of `workers.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct WorkersConfig {
    #[serde(default)]
    pub workers: Vec<WorkerSeed>,
}
