//! HTTP API module for the payroll ledger service.
//!
//! This module exposes worker management, attendance marking, payroll
//! generation, payments, and ledgers as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CreateWorkerRequest, GeneratePayrollRequest, MarkAttendanceRequest, PaymentRequest,
    SetRateRequest,
};
pub use response::{ApiError, GeneratePayrollResponse, WorkerResponse};
pub use state::AppState;
