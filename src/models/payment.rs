//! Salary payment model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayrollMonth;

/// The kind of salary payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentType {
    /// Paid ahead of month end.
    Advance,
    /// Month-end settlement.
    Final,
    /// Correction entered by an administrator.
    Adjustment,
}

/// An entry in the append-only payment log.
///
/// Payments are bucketed by the month of their own `payment_date`,
/// independently of any attendance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryPayment {
    /// Store-assigned sequence number.
    pub id: u64,
    /// The worker who was paid.
    pub worker_id: String,
    /// Month the payment counts against.
    pub month: PayrollMonth,
    /// Kind of payment.
    pub payment_type: PaymentType,
    /// Amount paid; always positive.
    pub amount: Decimal,
    /// Day the money changed hands.
    pub payment_date: NaiveDate,
    /// Free-form remark (e.g. "medical").
    #[serde(default)]
    pub note: String,
}
