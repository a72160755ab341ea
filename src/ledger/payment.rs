//! Append-only salary payment log.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::money::{self, check_amount};
use super::workers::require_worker;
use crate::error::{EngineError, EngineResult};
use crate::models::{PaymentType, PayrollMonth, SalaryPayment};
use crate::store::{NewPayment, PayrollStore};

/// A payment as entered by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentEntry {
    /// The worker paid.
    pub worker_id: String,
    /// Month the caller believes the payment belongs to. Payments are always
    /// bucketed by `payment_date`; a differing value is ignored.
    pub month: Option<PayrollMonth>,
    /// Kind of payment.
    pub payment_type: PaymentType,
    /// Amount paid; must be positive.
    pub amount: Decimal,
    /// Day paid.
    pub payment_date: NaiveDate,
    /// Remark.
    pub note: String,
}

/// Records a payment. Existing payments are never touched and no balance
/// is stored; ledgers derive balances from the log at query time.
///
/// A rate card is not required.
///
/// # Errors
///
/// Returns a validation error (and writes nothing) when the amount is not
/// positive, exceeds [`MAX_AMOUNT`](super::MAX_AMOUNT), would overflow the
/// worker's running totals, or the worker does not exist.
pub fn record_payment(store: &dyn PayrollStore, entry: PaymentEntry) -> EngineResult<SalaryPayment> {
    if entry.amount <= Decimal::ZERO {
        return Err(EngineError::validation(
            "amount",
            format!("must be greater than zero, got {}", entry.amount),
        ));
    }
    check_amount("amount", entry.amount)?;
    require_worker(store, &entry.worker_id)?;

    let paid_so_far = store
        .payments_for_worker(&entry.worker_id)?
        .into_iter()
        .map(|p| p.amount);
    money::total(
        paid_so_far.chain(std::iter::once(entry.amount)),
        "worker's running total paid",
    )?;

    let month = PayrollMonth::of(entry.payment_date);
    if let Some(requested) = entry.month.filter(|m| *m != month) {
        warn!(
            worker_id = %entry.worker_id,
            requested_month = %requested,
            payment_date = %entry.payment_date,
            month = %month,
            "Payment month differs from payment date, bucketing by payment date"
        );
    }

    let payment = store.append_payment(NewPayment {
        worker_id: entry.worker_id,
        month,
        payment_type: entry.payment_type,
        amount: entry.amount,
        payment_date: entry.payment_date,
        note: entry.note.trim().to_string(),
    })?;

    info!(
        payment_id = payment.id,
        worker_id = %payment.worker_id,
        month = %payment.month,
        payment_type = ?payment.payment_type,
        amount = %payment.amount,
        "Salary payment recorded"
    );
    Ok(payment)
}
