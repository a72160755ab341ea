//! Ledger result models.
//!
//! These types are computed on every query and never persisted. All balance
//! arithmetic that fills them lives in [`crate::ledger`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MonthlyPayrollSummary, PayrollMonth, SalaryPayment};

/// Earnings derived from one worker's attendance in one month.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::{MonthlyEarnings, PayrollMonth};
/// use rust_decimal::Decimal;
///
/// let earnings = MonthlyEarnings {
///     worker_id: "w_001".to_string(),
///     month: PayrollMonth::new(2024, 3).unwrap(),
///     full_days: 18,
///     half_days: 4,
///     earned_salary: Decimal::new(10000, 0),
/// };
/// assert_eq!(earnings.days_present(), 22);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyEarnings {
    /// The worker.
    pub worker_id: String,
    /// The month.
    pub month: PayrollMonth,
    /// Number of FULL days.
    pub full_days: u32,
    /// Number of HALF days.
    pub half_days: u32,
    /// Sum of attendance amount snapshots.
    pub earned_salary: Decimal,
}

impl MonthlyEarnings {
    /// Days with any attendance (full or half).
    pub fn days_present(&self) -> u32 {
        self.full_days + self.half_days
    }
}

/// One worker's ledger for one month.
///
/// Sign convention: a positive `closing_balance` is owed to the worker, a
/// negative one has been paid in advance and is recovered from future
/// earnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// The worker.
    pub worker_id: String,
    /// The month.
    pub month: PayrollMonth,
    /// Earned from attendance in this month.
    pub earned_salary: Decimal,
    /// Paid out in this month.
    pub total_paid: Decimal,
    /// Balance carried in from every earlier month.
    pub opening_balance: Decimal,
    /// `opening_balance + earned_salary - total_paid`.
    pub closing_balance: Decimal,
    /// FULL days in this month.
    pub full_days: u32,
    /// HALF days in this month.
    pub half_days: u32,
    /// Payments in this month, oldest first.
    pub payments: Vec<SalaryPayment>,
}

/// Earned and paid totals of one month with the running balance around it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBalance {
    /// The month.
    pub month: PayrollMonth,
    /// Earned from attendance in this month.
    pub earned_salary: Decimal,
    /// Paid out in this month.
    pub total_paid: Decimal,
    /// Balance before this month.
    pub opening_balance: Decimal,
    /// Balance after this month.
    pub closing_balance: Decimal,
}

/// Everything known about a worker's pay over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerHistory {
    /// The worker.
    pub worker_id: String,
    /// Generated payroll summaries, oldest month first.
    pub monthly_payroll: Vec<MonthlyPayrollSummary>,
    /// Running balance for every month with attendance or payments.
    pub months: Vec<MonthlyBalance>,
}
