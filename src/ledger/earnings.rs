//! Monthly earnings from attendance snapshots.

use rust_decimal::Decimal;
use tracing::debug;

use super::money;
use super::workers::require_worker;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, AttendanceStatus, MonthlyEarnings, PayrollMonth};
use crate::store::PayrollStore;

/// Computes a worker's day counts and earned salary for one month.
///
/// `earned_salary` sums the `amount_earned` stored on each record rather than
/// re-pricing days with the current rate card. The result is a pure function
/// of stored attendance.
///
/// # Errors
///
/// Returns a validation error when `worker_id` does not reference a worker.
pub fn compute_monthly_earnings(
    store: &dyn PayrollStore,
    worker_id: &str,
    month: PayrollMonth,
) -> EngineResult<MonthlyEarnings> {
    require_worker(store, worker_id)?;
    let records = store.attendance_for_worker(worker_id, Some(month))?;
    let earnings = summarize_attendance(worker_id, month, &records)?;

    debug!(
        worker_id,
        month = %month,
        records = records.len(),
        days_present = earnings.days_present(),
        earned_salary = %earnings.earned_salary,
        "Monthly earnings computed"
    );
    Ok(earnings)
}

/// Aggregates the records of `worker_id` that fall in `month`; other
/// records and absent days are ignored.
///
/// # Errors
///
/// Returns a validation error if the earned total overflows.
///
/// # Example
///
/// ```
/// use payroll_ledger::ledger::summarize_attendance;
/// use payroll_ledger::models::{AttendanceRecord, AttendanceStatus, PayrollMonth};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let march = PayrollMonth::new(2024, 3).unwrap();
/// let records = vec![AttendanceRecord {
///     id: 1,
///     worker_id: "w_001".to_string(),
///     worksite_id: "site_a".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     status: AttendanceStatus::Half,
///     amount_earned: Decimal::new(250, 0),
/// }];
///
/// let earnings = summarize_attendance("w_001", march, &records).unwrap();
/// assert_eq!(earnings.half_days, 1);
/// assert_eq!(earnings.earned_salary, Decimal::new(250, 0));
/// ```
pub fn summarize_attendance(
    worker_id: &str,
    month: PayrollMonth,
    records: &[AttendanceRecord],
) -> EngineResult<MonthlyEarnings> {
    let mut earnings = MonthlyEarnings {
        worker_id: worker_id.to_string(),
        month,
        full_days: 0,
        half_days: 0,
        earned_salary: Decimal::ZERO,
    };

    for record in records.iter().filter(|r| {
        r.worker_id == worker_id && month.contains_date(r.date) && r.is_present()
    }) {
        match record.status {
            AttendanceStatus::Full => earnings.full_days += 1,
            AttendanceStatus::Half => earnings.half_days += 1,
            AttendanceStatus::Absent => {}
        }
        earnings.earned_salary =
            money::add(earnings.earned_salary, record.amount_earned, "earned salary")?;
    }

    Ok(earnings)
}
