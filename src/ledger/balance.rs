//! Ledger and balance carry-forward.
//!
//! Every balance shown anywhere is computed here, from attendance snapshots
//! and the payment log, at query time. Nothing in this module writes.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use super::earnings::summarize_attendance;
use super::money;
use super::workers::require_worker;
use crate::error::EngineResult;
use crate::models::{
    AttendanceRecord, Ledger, MonthlyBalance, MonthlyEarnings, PayrollMonth, SalaryPayment,
    WorkerHistory,
};
use crate::store::PayrollStore;

#[derive(Debug, Clone, Copy, Default)]
struct MonthTotals {
    earned: Decimal,
    paid: Decimal,
}

/// Earned and paid totals for every month with activity, each bucketed by
/// its own date.
fn monthly_totals(
    attendance: &[AttendanceRecord],
    payments: &[SalaryPayment],
) -> EngineResult<BTreeMap<PayrollMonth, MonthTotals>> {
    let mut totals: BTreeMap<PayrollMonth, MonthTotals> = BTreeMap::new();
    for record in attendance {
        let entry = totals.entry(PayrollMonth::of(record.date)).or_default();
        entry.earned = money::add(entry.earned, record.amount_earned, "earned salary")?;
    }
    for payment in payments {
        let entry = totals.entry(payment.month).or_default();
        entry.paid = money::add(entry.paid, payment.amount, "total paid")?;
    }
    Ok(totals)
}

/// Closing balance of a month: `opening + earned - paid`.
fn closing(opening: Decimal, earned: Decimal, paid: Decimal) -> EngineResult<Decimal> {
    money::sub(
        money::add(opening, earned, "closing balance")?,
        paid,
        "closing balance",
    )
}

/// Earnings for the ledger month, served from the stored summary when it was
/// built from the current attendance revision.
fn ledger_earnings(
    store: &dyn PayrollStore,
    worker_id: &str,
    month: PayrollMonth,
    attendance: &[AttendanceRecord],
) -> EngineResult<MonthlyEarnings> {
    let revision = store.attendance_revision(worker_id, month)?;
    if let Some(row) = store.get_summary(worker_id, month)? {
        if row.attendance_revision == revision {
            return Ok(MonthlyEarnings {
                worker_id: worker_id.to_string(),
                month,
                full_days: row.summary.total_full_days,
                half_days: row.summary.total_half_days,
                earned_salary: row.summary.total_amount,
            });
        }
        debug!(
            worker_id,
            month = %month,
            summary_revision = row.attendance_revision,
            revision,
            "Stale payroll summary, computing from attendance"
        );
    }
    summarize_attendance(worker_id, month, attendance)
}

/// Builds a worker's ledger for one month.
///
/// - `earned_salary`: attendance earned in `month`
/// - `total_paid`: payments dated in `month`
/// - `opening_balance`: earned minus paid over every earlier month
/// - `closing_balance`: `opening_balance + earned_salary - total_paid`
///
/// A worker with payments but no attendance still gets a ledger, with
/// `earned_salary` of zero.
///
/// # Errors
///
/// Returns a validation error when `worker_id` does not reference a worker.
///
/// # Example
///
/// ```
/// use payroll_ledger::ledger::{NewWorker, create_worker, get_ledger};
/// use payroll_ledger::models::Worker;
/// use payroll_ledger::store::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// create_worker(&store, NewWorker {
///     worker: Worker {
///         id: "w_001".to_string(),
///         name: "Ramesh".to_string(),
///         phone: String::new(),
///         village: String::new(),
///     },
///     full_day_rate: None,
///     half_day_rate: None,
/// }).unwrap();
///
/// let ledger = get_ledger(&store, "w_001", "2024-03".parse().unwrap()).unwrap();
/// assert!(ledger.closing_balance.is_zero());
/// ```
pub fn get_ledger(
    store: &dyn PayrollStore,
    worker_id: &str,
    month: PayrollMonth,
) -> EngineResult<Ledger> {
    require_worker(store, worker_id)?;

    let attendance = store.attendance_for_worker(worker_id, None)?;
    let all_payments = store.payments_for_worker(worker_id)?;

    let earnings = ledger_earnings(store, worker_id, month, &attendance)?;

    let totals = monthly_totals(&attendance, &all_payments)?;
    let opening_balance = totals
        .range(..month)
        .try_fold(Decimal::ZERO, |balance, (_, t)| closing(balance, t.earned, t.paid))?;

    let mut payments: Vec<SalaryPayment> = all_payments
        .into_iter()
        .filter(|p| p.month == month)
        .collect();
    payments.sort_by(|a, b| a.payment_date.cmp(&b.payment_date).then(a.id.cmp(&b.id)));

    let total_paid = money::total(payments.iter().map(|p| p.amount), "total paid")?;
    let closing_balance = closing(opening_balance, earnings.earned_salary, total_paid)?;

    debug!(
        worker_id,
        month = %month,
        opening_balance = %opening_balance,
        earned_salary = %earnings.earned_salary,
        total_paid = %total_paid,
        closing_balance = %closing_balance,
        "Ledger computed"
    );

    Ok(Ledger {
        worker_id: worker_id.to_string(),
        month,
        earned_salary: earnings.earned_salary,
        total_paid,
        opening_balance,
        closing_balance,
        full_days: earnings.full_days,
        half_days: earnings.half_days,
        payments,
    })
}

/// Collects a worker's generated summaries and the running balance of every
/// month with attendance or payments, oldest first.
///
/// Months without activity are skipped; each listed month opens with the
/// closing balance of the one before it.
pub fn worker_history(store: &dyn PayrollStore, worker_id: &str) -> EngineResult<WorkerHistory> {
    require_worker(store, worker_id)?;

    let attendance = store.attendance_for_worker(worker_id, None)?;
    let payments = store.payments_for_worker(worker_id)?;

    let mut running = Decimal::ZERO;
    let mut months = Vec::new();
    for (month, totals) in monthly_totals(&attendance, &payments)? {
        let opening_balance = running;
        running = closing(opening_balance, totals.earned, totals.paid)?;
        months.push(MonthlyBalance {
            month,
            earned_salary: totals.earned,
            total_paid: totals.paid,
            opening_balance,
            closing_balance: running,
        });
    }

    Ok(WorkerHistory {
        worker_id: worker_id.to_string(),
        monthly_payroll: store.summaries_for_worker(worker_id)?,
        months,
    })
}
