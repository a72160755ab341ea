//! Worker and rate card models.
//!
//! A [`Worker`] exists independently of its [`SalaryRate`]; payments can be
//! recorded for a worker that has no rate card yet.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AttendanceStatus;
use crate::error::{EngineError, EngineResult};

/// A member of the crew.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier for the worker.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Home village, used by site managers to group crews.
    #[serde(default)]
    pub village: String,
}

/// The current daily rate card of a worker.
///
/// Rates are only read when a new attendance record is created; stored
/// attendance amounts keep the rate that was current at the time.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::{AttendanceStatus, SalaryRate};
/// use rust_decimal::Decimal;
///
/// let rate = SalaryRate {
///     worker_id: "w_001".to_string(),
///     full_day_rate: Decimal::new(500, 0),
///     half_day_rate: Decimal::new(250, 0),
/// };
///
/// assert_eq!(rate.amount_for(AttendanceStatus::Full), Decimal::new(500, 0));
/// assert_eq!(rate.amount_for(AttendanceStatus::Half), Decimal::new(250, 0));
/// assert_eq!(rate.amount_for(AttendanceStatus::Absent), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRate {
    /// The worker this rate card belongs to.
    pub worker_id: String,
    /// Amount earned for a full day.
    pub full_day_rate: Decimal,
    /// Amount earned for a half day.
    pub half_day_rate: Decimal,
}

impl SalaryRate {
    /// The amount a day with the given status earns under this rate card.
    pub fn amount_for(&self, status: AttendanceStatus) -> Decimal {
        match status {
            AttendanceStatus::Full => self.full_day_rate,
            AttendanceStatus::Half => self.half_day_rate,
            AttendanceStatus::Absent => Decimal::ZERO,
        }
    }

    /// Rejects negative rates.
    pub fn validate(&self) -> EngineResult<()> {
        if self.full_day_rate < Decimal::ZERO {
            return Err(EngineError::validation(
                "full_day_rate",
                format!("must not be negative, got {}", self.full_day_rate),
            ));
        }
        if self.half_day_rate < Decimal::ZERO {
            return Err(EngineError::validation(
                "half_day_rate",
                format!("must not be negative, got {}", self.half_day_rate),
            ));
        }
        Ok(())
    }
}
