//! Daily attendance marking.
//!
//! The amount a day earns is resolved from the worker's rate card at marking
//! time and stored on the record; later rate changes never alter it.

use chrono::NaiveDate;
use tracing::{debug, info};

use super::workers::require_worker;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus};
use crate::store::{AttendanceFilter, NewAttendance, Page, PayrollStore};

/// A request to mark one worker for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkAttendance {
    /// The worker.
    pub worker_id: String,
    /// Where the worker was on that day.
    pub worksite_id: String,
    /// The working day.
    pub date: NaiveDate,
    /// Attendance status.
    pub status: AttendanceStatus,
}

/// Marks attendance and snapshots the amount earned.
///
/// # Errors
///
/// - `Validation` when the worker does not exist or `worksite_id` is blank
/// - `NotFound` when the worker has no rate card
/// - `DuplicateAttendance` when the worker is already marked on that date,
///   at any worksite
pub fn mark_attendance(
    store: &dyn PayrollStore,
    request: MarkAttendance,
) -> EngineResult<AttendanceRecord> {
    require_worker(store, &request.worker_id)?;
    if request.worksite_id.trim().is_empty() {
        return Err(EngineError::validation("worksite_id", "must not be blank"));
    }

    let rate = store
        .get_rate(&request.worker_id)?
        .ok_or_else(|| EngineError::not_found("rate card", request.worker_id.clone()))?;
    let amount_earned = rate.amount_for(request.status);

    let record = store.insert_attendance(NewAttendance {
        worker_id: request.worker_id,
        worksite_id: request.worksite_id,
        date: request.date,
        status: request.status,
        amount_earned,
    })?;

    info!(
        worker_id = %record.worker_id,
        worksite_id = %record.worksite_id,
        date = %record.date,
        status = ?record.status,
        amount_earned = %record.amount_earned,
        "Attendance marked"
    );
    Ok(record)
}

/// Lists attendance one page at a time. `page` is 1-based.
pub fn list_attendance(
    store: &dyn PayrollStore,
    filter: &AttendanceFilter,
    page: usize,
    page_size: usize,
) -> EngineResult<Page<AttendanceRecord>> {
    if page == 0 {
        return Err(EngineError::validation("page", "must be at least 1"));
    }
    if page_size == 0 {
        return Err(EngineError::validation("page_size", "must be at least 1"));
    }

    let offset = (page - 1).saturating_mul(page_size);
    let result = store.list_attendance(filter, offset, page_size)?;
    debug!(
        page,
        page_size,
        count = result.count,
        returned = result.results.len(),
        "Attendance listed"
    );
    Ok(result)
}
