//! Payroll ledger service for construction crews.
//!
//! This crate records daily attendance with a snapshot of the amount each
//! day earns, generates monthly payroll summaries, keeps an append-only log
//! of salary payments, and derives per-worker ledgers whose balances carry
//! forward from month to month.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod store;
