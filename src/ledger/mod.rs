//! Payroll ledger engine.
//!
//! This module contains every operation that reads or writes payroll data:
//! worker and rate card management, attendance marking with rate snapshots,
//! monthly earnings, idempotent payroll generation, the append-only payment
//! log, and the balance arithmetic behind ledgers and worker histories.
//!
//! All functions take the store as `&dyn PayrollStore` and are synchronous;
//! each one completes in a bounded number of store calls.

mod attendance;
mod balance;
mod earnings;
mod generate;
mod money;
mod payment;
mod workers;

pub use attendance::{MarkAttendance, list_attendance, mark_attendance};
pub use balance::{get_ledger, worker_history};
pub use earnings::{compute_monthly_earnings, summarize_attendance};
pub use generate::{
    DEFAULT_MAX_UPSERT_ATTEMPTS, generate_payroll, list_payroll, mark_payroll_paid,
    mark_payroll_unpaid,
};
pub use money::MAX_AMOUNT;
pub use payment::{PaymentEntry, record_payment};
pub use workers::{NewWorker, create_worker, get_worker_with_rate, require_worker, set_rate};
