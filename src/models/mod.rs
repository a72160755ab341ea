//! Core data models for the payroll ledger service.
//!
//! This module contains all the domain models used throughout the service.

mod attendance;
mod ledger;
mod month;
mod payment;
mod payroll_summary;
mod worker;

pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use ledger::{Ledger, MonthlyBalance, MonthlyEarnings, WorkerHistory};
pub use month::PayrollMonth;
pub use payment::{PaymentType, SalaryPayment};
pub use payroll_summary::{MonthlyPayrollSummary, PaidStatus};
pub use worker::{SalaryRate, Worker};
