//! Storage abstraction for the payroll ledger.
//!
//! The ledger engine talks to storage only through [`PayrollStore`], so a
//! database-backed implementation can replace [`InMemoryStore`] without
//! touching the engine.

mod memory;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, AttendanceStatus, MonthlyPayrollSummary, PaidStatus, PaymentType,
    PayrollMonth, SalaryPayment, SalaryRate, Worker,
};

pub use memory::InMemoryStore;

/// An attendance record before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendance {
    /// The worker.
    pub worker_id: String,
    /// The worksite.
    pub worksite_id: String,
    /// The working day.
    pub date: NaiveDate,
    /// Attendance status.
    pub status: AttendanceStatus,
    /// Amount snapshot from the rate card.
    pub amount_earned: Decimal,
}

/// A payment before the store assigns its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPayment {
    /// The worker.
    pub worker_id: String,
    /// Bucket month (the month of `payment_date`).
    pub month: PayrollMonth,
    /// Kind of payment.
    pub payment_type: PaymentType,
    /// Positive amount.
    pub amount: Decimal,
    /// Day paid.
    pub payment_date: NaiveDate,
    /// Remark.
    pub note: String,
}

/// A stored summary with its concurrency metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    /// The summary itself.
    pub summary: MonthlyPayrollSummary,
    /// Bumped on every write; used for compare-and-swap.
    pub version: u64,
    /// The attendance revision of `(worker_id, month)` the row was built from.
    pub attendance_revision: u64,
}

/// Filters for listing attendance. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceFilter {
    /// Exact date.
    pub date: Option<NaiveDate>,
    /// Exact worker id.
    pub worker_id: Option<String>,
    /// Exact worksite id.
    pub worksite_id: Option<String>,
}

impl AttendanceFilter {
    /// Returns true if the record passes every set filter.
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        self.date.is_none_or(|d| record.date == d)
            && self
                .worker_id
                .as_deref()
                .is_none_or(|w| record.worker_id == w)
            && self
                .worksite_id
                .as_deref()
                .is_none_or(|s| record.worksite_id == s)
    }
}

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Total number of matching rows across all pages.
    pub count: usize,
    /// The rows on this page.
    pub results: Vec<T>,
}

/// Persistence operations the ledger engine needs.
///
/// Implementations must make each method atomic: no reader may observe a
/// half-written summary, and the `(worker_id, date)` uniqueness check in
/// [`PayrollStore::insert_attendance`] must happen in the same critical
/// section as the insert.
pub trait PayrollStore: Send + Sync {
    /// Adds a worker. Fails with a validation error if the id is taken.
    fn insert_worker(&self, worker: Worker) -> EngineResult<Worker>;

    /// Looks up a worker by id.
    fn get_worker(&self, worker_id: &str) -> EngineResult<Option<Worker>>;

    /// All workers ordered by id.
    fn list_workers(&self) -> EngineResult<Vec<Worker>>;

    /// Creates or replaces a worker's rate card.
    fn set_rate(&self, rate: SalaryRate) -> EngineResult<()>;

    /// The worker's current rate card, if any.
    fn get_rate(&self, worker_id: &str) -> EngineResult<Option<SalaryRate>>;

    /// Inserts attendance, rejecting a second record for the same
    /// `(worker_id, date)` with `DuplicateAttendance`.
    fn insert_attendance(&self, record: NewAttendance) -> EngineResult<AttendanceRecord>;

    /// A worker's attendance, optionally limited to one month, ordered by date.
    fn attendance_for_worker(
        &self,
        worker_id: &str,
        month: Option<PayrollMonth>,
    ) -> EngineResult<Vec<AttendanceRecord>>;

    /// Every attendance record in a month, ordered by worker then date.
    fn attendance_in_month(&self, month: PayrollMonth) -> EngineResult<Vec<AttendanceRecord>>;

    /// A counter that changes whenever attendance for `(worker_id, month)`
    /// changes. Starts at zero.
    fn attendance_revision(&self, worker_id: &str, month: PayrollMonth) -> EngineResult<u64>;

    /// Filtered attendance ordered by date then worker, skipping `offset` rows
    /// and returning at most `limit`.
    fn list_attendance(
        &self,
        filter: &AttendanceFilter,
        offset: usize,
        limit: usize,
    ) -> EngineResult<Page<AttendanceRecord>>;

    /// Appends a payment to the log.
    fn append_payment(&self, payment: NewPayment) -> EngineResult<SalaryPayment>;

    /// All payments for a worker in insertion order.
    fn payments_for_worker(&self, worker_id: &str) -> EngineResult<Vec<SalaryPayment>>;

    /// The stored summary for `(worker_id, month)`.
    fn get_summary(&self, worker_id: &str, month: PayrollMonth)
    -> EngineResult<Option<SummaryRow>>;

    /// Writes a summary if the stored version still equals
    /// `expected_version` (`None` meaning "no row yet"). Otherwise fails with
    /// `StorageConflict` and writes nothing.
    fn upsert_summary(
        &self,
        summary: MonthlyPayrollSummary,
        attendance_revision: u64,
        expected_version: Option<u64>,
    ) -> EngineResult<SummaryRow>;

    /// Summaries ordered by month then worker, optionally limited to one month.
    fn list_summaries(&self, month: Option<PayrollMonth>)
    -> EngineResult<Vec<MonthlyPayrollSummary>>;

    /// Summaries of one worker, oldest month first.
    fn summaries_for_worker(&self, worker_id: &str) -> EngineResult<Vec<MonthlyPayrollSummary>>;

    /// Sets the paid flag of an existing summary, failing with `NotFound`
    /// when there is none.
    fn set_paid_status(
        &self,
        worker_id: &str,
        month: PayrollMonth,
        status: PaidStatus,
    ) -> EngineResult<MonthlyPayrollSummary>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(worker: &str, site: &str, day: u32) -> AttendanceRecord {
        AttendanceRecord {
            id: 1,
            worker_id: worker.to_string(),
            worksite_id: site.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            status: AttendanceStatus::Full,
            amount_earned: Decimal::new(500, 0),
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(AttendanceFilter::default().matches(&record("w_001", "site_a", 4)));
    }

    #[test]
    fn test_filter_combines_fields() {
        let filter = AttendanceFilter {
            date: NaiveDate::from_ymd_opt(2024, 3, 4),
            worker_id: Some("w_001".to_string()),
            worksite_id: None,
        };
        assert!(filter.matches(&record("w_001", "site_b", 4)));
        assert!(!filter.matches(&record("w_002", "site_b", 4)));
        assert!(!filter.matches(&record("w_001", "site_b", 5)));
    }
}
