//! Attendance record model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How much of a day a worker was present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttendanceStatus {
    /// Worked a full day.
    Full,
    /// Worked half a day.
    Half,
    /// Did not work.
    Absent,
}

/// One day of attendance for one worker at one worksite.
///
/// `amount_earned` is a snapshot of the rate card at marking time and is
/// never recomputed, so later rate changes leave history untouched.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = AttendanceRecord {
///     id: 1,
///     worker_id: "w_001".to_string(),
///     worksite_id: "site_a".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     status: AttendanceStatus::Full,
///     amount_earned: Decimal::new(500, 0),
/// };
/// assert!(record.is_present());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Store-assigned identifier.
    pub id: u64,
    /// The worker this record belongs to.
    pub worker_id: String,
    /// The worksite the worker was marked at.
    pub worksite_id: String,
    /// The working day.
    pub date: NaiveDate,
    /// Attendance status for the day.
    pub status: AttendanceStatus,
    /// Amount earned for the day, fixed at creation.
    pub amount_earned: Decimal,
}

impl AttendanceRecord {
    /// Returns true unless the worker was absent.
    pub fn is_present(&self) -> bool {
        self.status != AttendanceStatus::Absent
    }
}
