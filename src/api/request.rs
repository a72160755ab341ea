//! Request types for the payroll API.
//!
//! Month and date values arrive as plain strings and are parsed after
//! extraction, so a malformed month or date is reported as a validation
//! error naming its field rather than as malformed JSON.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::ledger::{MarkAttendance, NewWorker, PaymentEntry};
use crate::models::{AttendanceStatus, PaymentType, PayrollMonth, SalaryRate, Worker};

/// Body of `POST /workers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkerRequest {
    /// Unique identifier for the worker.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Home village.
    #[serde(default)]
    pub village: String,
    /// Initial full-day rate.
    #[serde(default)]
    pub full_day_rate: Option<Decimal>,
    /// Initial half-day rate.
    #[serde(default)]
    pub half_day_rate: Option<Decimal>,
}

impl From<CreateWorkerRequest> for NewWorker {
    fn from(req: CreateWorkerRequest) -> Self {
        NewWorker {
            worker: Worker {
                id: req.id.trim().to_string(),
                name: req.name.trim().to_string(),
                phone: req.phone.trim().to_string(),
                village: req.village.trim().to_string(),
            },
            full_day_rate: req.full_day_rate,
            half_day_rate: req.half_day_rate,
        }
    }
}

/// Body of `PUT /workers/:worker_id/rates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRateRequest {
    /// Amount earned for a full day.
    pub full_day_rate: Decimal,
    /// Amount earned for a half day.
    pub half_day_rate: Decimal,
}

impl SetRateRequest {
    /// Binds the rates to a worker.
    pub fn into_rate(self, worker_id: String) -> SalaryRate {
        SalaryRate {
            worker_id,
            full_day_rate: self.full_day_rate,
            half_day_rate: self.half_day_rate,
        }
    }
}

/// Body of `POST /attendance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    /// The worker.
    pub worker_id: String,
    /// The worksite.
    pub worksite_id: String,
    /// The working day, as `YYYY-MM-DD`.
    pub date: String,
    /// `FULL`, `HALF` or `ABSENT`.
    pub status: AttendanceStatus,
}

impl TryFrom<MarkAttendanceRequest> for MarkAttendance {
    type Error = EngineError;

    fn try_from(req: MarkAttendanceRequest) -> EngineResult<Self> {
        Ok(MarkAttendance {
            date: parse_date("date", &req.date)?,
            worker_id: req.worker_id,
            worksite_id: req.worksite_id,
            status: req.status,
        })
    }
}

/// Body of `POST /payroll/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePayrollRequest {
    /// Month to generate, as `YYYY-MM`.
    pub month: String,
}

/// Body of `POST /payroll/pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// The worker paid.
    pub worker_id: String,
    /// Optional `YYYY-MM`; payments are bucketed by `payment_date`.
    #[serde(default)]
    pub month: Option<String>,
    /// `ADVANCE`, `FINAL` or `ADJUSTMENT`.
    pub payment_type: PaymentType,
    /// Amount paid, as a number or a decimal string.
    pub amount: Decimal,
    /// Day paid, as `YYYY-MM-DD`.
    pub payment_date: String,
    /// Remark.
    #[serde(default)]
    pub note: String,
}

impl TryFrom<PaymentRequest> for PaymentEntry {
    type Error = EngineError;

    fn try_from(req: PaymentRequest) -> EngineResult<Self> {
        Ok(PaymentEntry {
            worker_id: req.worker_id,
            month: parse_optional_month(req.month.as_deref())?,
            payment_type: req.payment_type,
            amount: req.amount,
            payment_date: parse_date("payment_date", &req.payment_date)?,
            note: req.note,
        })
    }
}

/// Query of `GET /attendance`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceQuery {
    /// Exact day, as `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Worker id.
    pub worker: Option<String>,
    /// Worksite id.
    pub worksite: Option<String>,
    /// 1-based page number.
    pub page: Option<usize>,
}

/// Query of `GET /payroll`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayrollQuery {
    /// Month, as `YYYY-MM`.
    pub month: Option<String>,
    /// Case-insensitive match on worker id or name.
    pub worker: Option<String>,
}

/// Query of the per-worker month endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthQuery {
    /// Month, as `YYYY-MM`.
    pub month: Option<String>,
}

impl MonthQuery {
    /// The month, which must be present and well-formed.
    pub fn required(&self) -> EngineResult<PayrollMonth> {
        match self.month.as_deref() {
            Some(month) => month.parse(),
            None => Err(EngineError::validation("month", "is required")),
        }
    }
}

/// Parses a month that may be omitted or blank.
pub fn parse_optional_month(month: Option<&str>) -> EngineResult<Option<PayrollMonth>> {
    match month.map(str::trim).filter(|m| !m.is_empty()) {
        Some(month) => month.parse().map(Some),
        None => Ok(None),
    }
}

/// Parses a `YYYY-MM-DD` calendar date; impossible days such as
/// `2024-02-30` are rejected.
pub fn parse_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        EngineError::validation(
            field,
            format!("expected a calendar date as YYYY-MM-DD, got '{}'", value),
        )
    })
}

/// Parses an optional `YYYY-MM-DD` filter.
pub fn parse_optional_date(date: Option<&str>) -> EngineResult<Option<NaiveDate>> {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(date) => parse_date("date", date).map(Some),
        None => Ok(None),
    }
}
