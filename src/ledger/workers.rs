//! Worker and rate card management.

use rust_decimal::Decimal;
use tracing::info;

use super::money::check_amount;
use crate::error::{EngineError, EngineResult};
use crate::models::{SalaryRate, Worker};
use crate::store::PayrollStore;

/// A worker to create, with an optional initial rate card.
///
/// Both rates must be given together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorker {
    /// The worker record.
    pub worker: Worker,
    /// Initial full-day rate.
    pub full_day_rate: Option<Decimal>,
    /// Initial half-day rate.
    pub half_day_rate: Option<Decimal>,
}

/// Creates a worker and, when both rates are supplied, its rate card.
///
/// # Errors
///
/// Returns a validation error when the id or name is blank, when only one
/// of the two rates is given, when a rate is negative, or when the id is
/// already taken.
pub fn create_worker(store: &dyn PayrollStore, new_worker: NewWorker) -> EngineResult<Worker> {
    let NewWorker {
        worker,
        full_day_rate,
        half_day_rate,
    } = new_worker;

    if worker.id.trim().is_empty() {
        return Err(EngineError::validation("id", "must not be blank"));
    }
    if worker.name.trim().is_empty() {
        return Err(EngineError::validation("name", "must not be blank"));
    }

    let rate = match (full_day_rate, half_day_rate) {
        (Some(full_day_rate), Some(half_day_rate)) => {
            let rate = SalaryRate {
                worker_id: worker.id.clone(),
                full_day_rate,
                half_day_rate,
            };
            validate_rate(&rate)?;
            Some(rate)
        }
        (None, None) => None,
        (Some(_), None) => {
            return Err(EngineError::validation(
                "half_day_rate",
                "required when full_day_rate is given",
            ));
        }
        (None, Some(_)) => {
            return Err(EngineError::validation(
                "full_day_rate",
                "required when half_day_rate is given",
            ));
        }
    };

    let worker = store.insert_worker(worker)?;
    if let Some(rate) = rate {
        store.set_rate(rate)?;
    }

    info!(worker_id = %worker.id, "Worker created");
    Ok(worker)
}

/// Looks up a worker, failing with a validation error on the `worker_id`
/// field when it does not exist.
pub fn require_worker(store: &dyn PayrollStore, worker_id: &str) -> EngineResult<Worker> {
    store.get_worker(worker_id)?.ok_or_else(|| {
        EngineError::validation("worker_id", format!("unknown worker '{}'", worker_id))
    })
}

/// Looks up a worker and its current rate card.
pub fn get_worker_with_rate(
    store: &dyn PayrollStore,
    worker_id: &str,
) -> EngineResult<(Worker, Option<SalaryRate>)> {
    let worker = store
        .get_worker(worker_id)?
        .ok_or_else(|| EngineError::not_found("worker", worker_id))?;
    let rate = store.get_rate(worker_id)?;
    Ok((worker, rate))
}

fn validate_rate(rate: &SalaryRate) -> EngineResult<()> {
    rate.validate()?;
    check_amount("full_day_rate", rate.full_day_rate)?;
    check_amount("half_day_rate", rate.half_day_rate)
}

/// Replaces a worker's rate card. Existing attendance keeps its amounts.
pub fn set_rate(store: &dyn PayrollStore, rate: SalaryRate) -> EngineResult<SalaryRate> {
    require_worker(store, &rate.worker_id)?;
    validate_rate(&rate)?;
    store.set_rate(rate.clone())?;

    info!(
        worker_id = %rate.worker_id,
        full_day_rate = %rate.full_day_rate,
        half_day_rate = %rate.half_day_rate,
        "Rate card updated"
    );
    Ok(rate)
}
