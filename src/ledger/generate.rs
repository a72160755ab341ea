//! Idempotent monthly payroll generation.
//!
//! Summaries are upserted with compare-and-swap on the row version, so two
//! generators racing on the same `(worker_id, month)` never produce two rows
//! and never interleave fields of one row.

use std::collections::{BTreeSet, HashMap};

use tracing::{info, warn};

use super::earnings::summarize_attendance;
use crate::error::{EngineError, EngineResult};
use crate::models::{MonthlyPayrollSummary, PaidStatus, PayrollMonth};
use crate::store::PayrollStore;

/// Upsert attempts per worker before a conflict is surfaced.
pub const DEFAULT_MAX_UPSERT_ATTEMPTS: u32 = 3;

/// Generates (or regenerates) the summary of every worker with attendance in
/// `month`, ordered by worker id.
///
/// Running it twice with no attendance written in between yields identical
/// rows. An existing row keeps its `paid_status`. A month with no attendance
/// yields an empty list.
///
/// # Errors
///
/// Returns `StorageConflict` when a worker's row kept changing underneath
/// for `max_attempts` attempts. Rows already written for other workers stay
/// written; each row is all-or-nothing.
pub fn generate_payroll(
    store: &dyn PayrollStore,
    month: PayrollMonth,
    max_attempts: u32,
) -> EngineResult<Vec<MonthlyPayrollSummary>> {
    let worker_ids: BTreeSet<String> = store
        .attendance_in_month(month)?
        .into_iter()
        .map(|r| r.worker_id)
        .collect();

    let mut summaries = Vec::with_capacity(worker_ids.len());
    for worker_id in &worker_ids {
        summaries.push(upsert_summary(store, worker_id, month, max_attempts)?);
    }

    info!(
        month = %month,
        workers = summaries.len(),
        "Payroll generated"
    );
    Ok(summaries)
}

fn upsert_summary(
    store: &dyn PayrollStore,
    worker_id: &str,
    month: PayrollMonth,
    max_attempts: u32,
) -> EngineResult<MonthlyPayrollSummary> {
    let max_attempts = max_attempts.max(1);

    for attempt in 1..=max_attempts {
        let existing = store.get_summary(worker_id, month)?;
        // Read the revision before the records: a concurrent insert then
        // leaves the row marked stale instead of wrongly fresh.
        let revision = store.attendance_revision(worker_id, month)?;
        let records = store.attendance_for_worker(worker_id, Some(month))?;
        let earnings = summarize_attendance(worker_id, month, &records)?;

        let summary = MonthlyPayrollSummary {
            worker_id: worker_id.to_string(),
            month,
            total_full_days: earnings.full_days,
            total_half_days: earnings.half_days,
            total_amount: earnings.earned_salary,
            paid_status: existing
                .as_ref()
                .map_or(PaidStatus::Unpaid, |row| row.summary.paid_status),
        };

        match store.upsert_summary(summary, revision, existing.map(|row| row.version)) {
            Ok(row) => return Ok(row.summary),
            Err(EngineError::StorageConflict { .. }) => {
                warn!(
                    worker_id,
                    month = %month,
                    attempt,
                    max_attempts,
                    "Payroll summary changed concurrently, retrying"
                );
            }
            Err(err) => return Err(err),
        }
    }

    Err(EngineError::StorageConflict {
        worker_id: worker_id.to_string(),
        month: month.to_string(),
        attempts: max_attempts,
    })
}

/// Lists summaries, optionally for one month, keeping only workers whose id
/// or name contains `search` (case-insensitive).
pub fn list_payroll(
    store: &dyn PayrollStore,
    month: Option<PayrollMonth>,
    search: Option<&str>,
) -> EngineResult<Vec<MonthlyPayrollSummary>> {
    let summaries = store.list_summaries(month)?;

    let needle = match search.map(str::trim).filter(|s| !s.is_empty()) {
        Some(needle) => needle.to_lowercase(),
        None => return Ok(summaries),
    };

    let names: HashMap<String, String> = store
        .list_workers()?
        .into_iter()
        .map(|w| (w.id, w.name.to_lowercase()))
        .collect();

    Ok(summaries
        .into_iter()
        .filter(|s| {
            s.worker_id.to_lowercase().contains(&needle)
                || names
                    .get(&s.worker_id)
                    .is_some_and(|name| name.contains(&needle))
        })
        .collect())
}

/// Flags a generated month as settled.
pub fn mark_payroll_paid(
    store: &dyn PayrollStore,
    worker_id: &str,
    month: PayrollMonth,
) -> EngineResult<MonthlyPayrollSummary> {
    let summary = store.set_paid_status(worker_id, month, PaidStatus::Paid)?;
    info!(worker_id, month = %month, "Payroll marked paid");
    Ok(summary)
}

/// Clears the settled flag of a generated month.
pub fn mark_payroll_unpaid(
    store: &dyn PayrollStore,
    worker_id: &str,
    month: PayrollMonth,
) -> EngineResult<MonthlyPayrollSummary> {
    let summary = store.set_paid_status(worker_id, month, PaidStatus::Unpaid)?;
    info!(worker_id, month = %month, "Payroll marked unpaid");
    Ok(summary)
}
