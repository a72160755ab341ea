//! In-memory [`PayrollStore`] implementation.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use super::{AttendanceFilter, NewAttendance, NewPayment, Page, PayrollStore, SummaryRow};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, MonthlyPayrollSummary, PaidStatus, PayrollMonth, SalaryPayment, SalaryRate,
    Worker,
};

#[derive(Debug, Default)]
struct Tables {
    workers: BTreeMap<String, Worker>,
    rates: HashMap<String, SalaryRate>,
    attendance: Vec<AttendanceRecord>,
    attendance_keys: HashSet<(String, NaiveDate)>,
    attendance_revisions: HashMap<(String, PayrollMonth), u64>,
    payments: Vec<SalaryPayment>,
    summaries: BTreeMap<(PayrollMonth, String), SummaryRow>,
    next_attendance_id: u64,
    next_payment_id: u64,
}

/// A process-local store guarded by a single [`RwLock`].
///
/// Every trait method takes the lock once, so each call is atomic with
/// respect to every other call.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::Worker;
/// use payroll_ledger::store::{InMemoryStore, PayrollStore};
///
/// let store = InMemoryStore::new();
/// store
///     .insert_worker(Worker {
///         id: "w_001".to_string(),
///         name: "Ramesh".to_string(),
///         phone: String::new(),
///         village: String::new(),
///     })
///     .unwrap();
///
/// assert!(store.get_worker("w_001").unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> EngineResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| EngineError::Storage {
            message: "store lock poisoned".to_string(),
        })
    }

    fn write(&self) -> EngineResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| EngineError::Storage {
            message: "store lock poisoned".to_string(),
        })
    }
}

impl PayrollStore for InMemoryStore {
    fn insert_worker(&self, worker: Worker) -> EngineResult<Worker> {
        let mut tables = self.write()?;
        if tables.workers.contains_key(&worker.id) {
            return Err(EngineError::validation(
                "id",
                format!("worker '{}' already exists", worker.id),
            ));
        }
        tables.workers.insert(worker.id.clone(), worker.clone());
        Ok(worker)
    }

    fn get_worker(&self, worker_id: &str) -> EngineResult<Option<Worker>> {
        Ok(self.read()?.workers.get(worker_id).cloned())
    }

    fn list_workers(&self) -> EngineResult<Vec<Worker>> {
        Ok(self.read()?.workers.values().cloned().collect())
    }

    fn set_rate(&self, rate: SalaryRate) -> EngineResult<()> {
        let mut tables = self.write()?;
        tables.rates.insert(rate.worker_id.clone(), rate);
        Ok(())
    }

    fn get_rate(&self, worker_id: &str) -> EngineResult<Option<SalaryRate>> {
        Ok(self.read()?.rates.get(worker_id).cloned())
    }

    fn insert_attendance(&self, record: NewAttendance) -> EngineResult<AttendanceRecord> {
        let mut tables = self.write()?;

        let key = (record.worker_id.clone(), record.date);
        if tables.attendance_keys.contains(&key) {
            return Err(EngineError::DuplicateAttendance {
                worker_id: record.worker_id,
                date: record.date,
            });
        }

        tables.next_attendance_id += 1;
        let stored = AttendanceRecord {
            id: tables.next_attendance_id,
            worker_id: record.worker_id,
            worksite_id: record.worksite_id,
            date: record.date,
            status: record.status,
            amount_earned: record.amount_earned,
        };

        tables.attendance_keys.insert(key);
        *tables
            .attendance_revisions
            .entry((stored.worker_id.clone(), PayrollMonth::of(stored.date)))
            .or_insert(0) += 1;
        tables.attendance.push(stored.clone());

        Ok(stored)
    }

    fn attendance_for_worker(
        &self,
        worker_id: &str,
        month: Option<PayrollMonth>,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let tables = self.read()?;
        let mut records: Vec<AttendanceRecord> = tables
            .attendance
            .iter()
            .filter(|r| r.worker_id == worker_id)
            .filter(|r| month.is_none_or(|m| m.contains_date(r.date)))
            .cloned()
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    fn attendance_in_month(&self, month: PayrollMonth) -> EngineResult<Vec<AttendanceRecord>> {
        let tables = self.read()?;
        let mut records: Vec<AttendanceRecord> = tables
            .attendance
            .iter()
            .filter(|r| month.contains_date(r.date))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.worker_id.cmp(&b.worker_id).then(a.date.cmp(&b.date)));
        Ok(records)
    }

    fn attendance_revision(&self, worker_id: &str, month: PayrollMonth) -> EngineResult<u64> {
        let tables = self.read()?;
        Ok(tables
            .attendance_revisions
            .get(&(worker_id.to_string(), month))
            .copied()
            .unwrap_or(0))
    }

    fn list_attendance(
        &self,
        filter: &AttendanceFilter,
        offset: usize,
        limit: usize,
    ) -> EngineResult<Page<AttendanceRecord>> {
        let tables = self.read()?;
        let mut matching: Vec<&AttendanceRecord> =
            tables.attendance.iter().filter(|r| filter.matches(r)).collect();
        matching.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.worker_id.cmp(&b.worker_id))
                .then(a.id.cmp(&b.id))
        });

        Ok(Page {
            count: matching.len(),
            results: matching
                .into_iter()
                .skip(offset)
                .take(limit)
                .cloned()
                .collect(),
        })
    }

    fn append_payment(&self, payment: NewPayment) -> EngineResult<SalaryPayment> {
        let mut tables = self.write()?;
        tables.next_payment_id += 1;
        let stored = SalaryPayment {
            id: tables.next_payment_id,
            worker_id: payment.worker_id,
            month: payment.month,
            payment_type: payment.payment_type,
            amount: payment.amount,
            payment_date: payment.payment_date,
            note: payment.note,
        };
        tables.payments.push(stored.clone());
        Ok(stored)
    }

    fn payments_for_worker(&self, worker_id: &str) -> EngineResult<Vec<SalaryPayment>> {
        let tables = self.read()?;
        Ok(tables
            .payments
            .iter()
            .filter(|p| p.worker_id == worker_id)
            .cloned()
            .collect())
    }

    fn get_summary(
        &self,
        worker_id: &str,
        month: PayrollMonth,
    ) -> EngineResult<Option<SummaryRow>> {
        let tables = self.read()?;
        Ok(tables.summaries.get(&(month, worker_id.to_string())).cloned())
    }

    fn upsert_summary(
        &self,
        summary: MonthlyPayrollSummary,
        attendance_revision: u64,
        expected_version: Option<u64>,
    ) -> EngineResult<SummaryRow> {
        let mut tables = self.write()?;
        let key = (summary.month, summary.worker_id.clone());

        let current_version = tables.summaries.get(&key).map(|row| row.version);
        if current_version != expected_version {
            return Err(EngineError::StorageConflict {
                worker_id: summary.worker_id,
                month: summary.month.to_string(),
                attempts: 1,
            });
        }

        let row = SummaryRow {
            summary,
            version: current_version.map_or(1, |v| v + 1),
            attendance_revision,
        };
        tables.summaries.insert(key, row.clone());
        Ok(row)
    }

    fn list_summaries(
        &self,
        month: Option<PayrollMonth>,
    ) -> EngineResult<Vec<MonthlyPayrollSummary>> {
        let tables = self.read()?;
        Ok(tables
            .summaries
            .iter()
            .filter(|((m, _), _)| month.is_none_or(|wanted| *m == wanted))
            .map(|(_, row)| row.summary.clone())
            .collect())
    }

    fn summaries_for_worker(&self, worker_id: &str) -> EngineResult<Vec<MonthlyPayrollSummary>> {
        let tables = self.read()?;
        Ok(tables
            .summaries
            .iter()
            .filter(|((_, w), _)| w == worker_id)
            .map(|(_, row)| row.summary.clone())
            .collect())
    }

    fn set_paid_status(
        &self,
        worker_id: &str,
        month: PayrollMonth,
        status: PaidStatus,
    ) -> EngineResult<MonthlyPayrollSummary> {
        let mut tables = self.write()?;
        let row = tables
            .summaries
            .get_mut(&(month, worker_id.to_string()))
            .ok_or_else(|| {
                EngineError::not_found("payroll summary", format!("{}/{}", worker_id, month))
            })?;

        row.summary.paid_status = status;
        row.version += 1;
        Ok(row.summary.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceStatus, PaymentType};
    use rust_decimal::Decimal;

    fn march() -> PayrollMonth {
        PayrollMonth::new(2024, 3).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn attendance(worker: &str, date: NaiveDate) -> NewAttendance {
        NewAttendance {
            worker_id: worker.to_string(),
            worksite_id: "site_a".to_string(),
            date,
            status: AttendanceStatus::Full,
            amount_earned: Decimal::new(500, 0),
        }
    }

    fn summary(worker: &str, amount: i64) -> MonthlyPayrollSummary {
        MonthlyPayrollSummary {
            worker_id: worker.to_string(),
            month: march(),
            total_full_days: 1,
            total_half_days: 0,
            total_amount: Decimal::new(amount, 0),
            paid_status: PaidStatus::Unpaid,
        }
    }

    fn worker(id: &str) -> Worker {
        Worker {
            id: id.to_string(),
            name: format!("Worker {}", id),
            phone: String::new(),
            village: String::new(),
        }
    }

    #[test]
    fn test_insert_worker_rejects_duplicate_id() {
        let store = InMemoryStore::new();
        store.insert_worker(worker("w_001")).unwrap();
        let result = store.insert_worker(worker("w_001"));
        assert!(matches!(result, Err(EngineError::Validation { .. })));
    }

    #[test]
    fn test_list_workers_ordered_by_id() {
        let store = InMemoryStore::new();
        store.insert_worker(worker("w_002")).unwrap();
        store.insert_worker(worker("w_001")).unwrap();
        let ids: Vec<String> = store
            .list_workers()
            .unwrap()
            .into_iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec!["w_001", "w_002"]);
    }

    #[test]
    fn test_insert_attendance_assigns_sequential_ids() {
        let store = InMemoryStore::new();
        let first = store.insert_attendance(attendance("w_001", day(4))).unwrap();
        let second = store.insert_attendance(attendance("w_001", day(5))).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_insert_attendance_rejects_same_worker_same_day() {
        let store = InMemoryStore::new();
        store.insert_attendance(attendance("w_001", day(4))).unwrap();

        let mut other_site = attendance("w_001", day(4));
        other_site.worksite_id = "site_b".to_string();
        let result = store.insert_attendance(other_site);

        assert!(matches!(
            result,
            Err(EngineError::DuplicateAttendance { .. })
        ));
        assert_eq!(store.attendance_for_worker("w_001", None).unwrap().len(), 1);
    }

    #[test]
    fn test_attendance_revision_bumps_per_worker_month() {
        let store = InMemoryStore::new();
        assert_eq!(store.attendance_revision("w_001", march()).unwrap(), 0);

        store.insert_attendance(attendance("w_001", day(4))).unwrap();
        store.insert_attendance(attendance("w_002", day(4))).unwrap();

        assert_eq!(store.attendance_revision("w_001", march()).unwrap(), 1);
        assert_eq!(
            store
                .attendance_revision("w_001", march().next())
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_attendance_for_worker_filters_by_month() {
        let store = InMemoryStore::new();
        store.insert_attendance(attendance("w_001", day(31))).unwrap();
        store
            .insert_attendance(attendance(
                "w_001",
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            ))
            .unwrap();

        assert_eq!(
            store
                .attendance_for_worker("w_001", Some(march()))
                .unwrap()
                .len(),
            1
        );
        assert_eq!(store.attendance_for_worker("w_001", None).unwrap().len(), 2);
    }

    #[test]
    fn test_list_attendance_paginates_with_total_count() {
        let store = InMemoryStore::new();
        for d in 1..=5 {
            store.insert_attendance(attendance("w_001", day(d))).unwrap();
        }

        let page = store
            .list_attendance(&AttendanceFilter::default(), 2, 2)
            .unwrap();
        assert_eq!(page.count, 5);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].date, day(3));
    }

    #[test]
    fn test_payments_are_append_only_with_sequence_ids() {
        let store = InMemoryStore::new();
        let payment = NewPayment {
            worker_id: "w_001".to_string(),
            month: march(),
            payment_type: PaymentType::Advance,
            amount: Decimal::new(1000, 0),
            payment_date: day(5),
            note: String::new(),
        };
        let first = store.append_payment(payment.clone()).unwrap();
        let second = store.append_payment(payment).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.payments_for_worker("w_001").unwrap().len(), 2);
        assert!(store.payments_for_worker("w_002").unwrap().is_empty());
    }

    #[test]
    fn test_upsert_creates_then_overwrites() {
        let store = InMemoryStore::new();
        let created = store.upsert_summary(summary("w_001", 500), 1, None).unwrap();
        assert_eq!(created.version, 1);

        let updated = store
            .upsert_summary(summary("w_001", 900), 2, Some(1))
            .unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(updated.attendance_revision, 2);

        assert_eq!(store.list_summaries(Some(march())).unwrap().len(), 1);
        assert_eq!(
            store
                .get_summary("w_001", march())
                .unwrap()
                .unwrap()
                .summary
                .total_amount,
            Decimal::new(900, 0)
        );
    }

    #[test]
    fn test_upsert_with_stale_version_conflicts_and_writes_nothing() {
        let store = InMemoryStore::new();
        store.upsert_summary(summary("w_001", 500), 1, None).unwrap();

        let blind_insert = store.upsert_summary(summary("w_001", 700), 1, None);
        assert!(matches!(
            blind_insert,
            Err(EngineError::StorageConflict { .. })
        ));

        let stale = store.upsert_summary(summary("w_001", 700), 1, Some(7));
        assert!(matches!(stale, Err(EngineError::StorageConflict { .. })));

        let row = store.get_summary("w_001", march()).unwrap().unwrap();
        assert_eq!(row.summary.total_amount, Decimal::new(500, 0));
        assert_eq!(row.version, 1);
    }

    #[test]
    fn test_set_paid_status_bumps_version() {
        let store = InMemoryStore::new();
        store.upsert_summary(summary("w_001", 500), 1, None).unwrap();

        let paid = store
            .set_paid_status("w_001", march(), PaidStatus::Paid)
            .unwrap();
        assert_eq!(paid.paid_status, PaidStatus::Paid);
        assert_eq!(
            store.get_summary("w_001", march()).unwrap().unwrap().version,
            2
        );
    }

    #[test]
    fn test_set_paid_status_without_summary_is_not_found() {
        let store = InMemoryStore::new();
        let result = store.set_paid_status("w_001", march(), PaidStatus::Paid);
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn test_summaries_for_worker_oldest_first() {
        let store = InMemoryStore::new();
        let mut april = summary("w_001", 100);
        april.month = march().next();
        store.upsert_summary(april, 1, None).unwrap();
        store.upsert_summary(summary("w_001", 200), 1, None).unwrap();
        store.upsert_summary(summary("w_002", 300), 1, None).unwrap();

        let months: Vec<PayrollMonth> = store
            .summaries_for_worker("w_001")
            .unwrap()
            .into_iter()
            .map(|s| s.month)
            .collect();
        assert_eq!(months, vec![march(), march().next()]);
    }
}
