//! Error types for the payroll ledger service.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition the ledger engine, the store, and the configuration
//! loader can report.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll ledger service.
///
/// Every error carries enough context (field name, offending value, key) to
/// render a user-facing message.
///
/// # Example
///
/// ```
/// use payroll_ledger::error::EngineError;
///
/// let error = EngineError::Validation {
///     field: "amount".to_string(),
///     message: "must be greater than zero, got -5".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid field 'amount': must be greater than zero, got -5"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An input field was missing, malformed, or out of range.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "rate card", "payroll summary").
        entity: String,
        /// The key that was looked up.
        id: String,
    },

    /// The worker already has an attendance record on this date.
    #[error("Attendance already marked for worker '{worker_id}' on {date}")]
    DuplicateAttendance {
        /// The worker the record belongs to.
        worker_id: String,
        /// The date that is already taken.
        date: NaiveDate,
    },

    /// A summary upsert kept losing a race with concurrent writers.
    #[error(
        "Payroll summary for worker '{worker_id}' in {month} changed concurrently ({attempts} attempts)"
    )]
    StorageConflict {
        /// The worker whose summary was being written.
        worker_id: String,
        /// The payroll month being written.
        month: String,
        /// How many attempts were made before giving up.
        attempts: u32,
    },

    /// The storage backend failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Validation`] error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`EngineError::NotFound`] error.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
