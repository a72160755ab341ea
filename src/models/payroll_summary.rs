//! Monthly payroll summary model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PayrollMonth;

/// Whether the month has been settled, as flagged by an administrator.
///
/// This flag is informational; balances are always derived from the
/// payment log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaidStatus {
    /// Not yet settled.
    #[default]
    Unpaid,
    /// Settled.
    Paid,
}

/// Attendance aggregated for one worker in one month.
///
/// This is a regenerable cache keyed by `(worker_id, month)`; regenerating
/// overwrites the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayrollSummary {
    /// The worker the summary belongs to.
    pub worker_id: String,
    /// The summarized month.
    pub month: PayrollMonth,
    /// Number of FULL days.
    pub total_full_days: u32,
    /// Number of HALF days.
    pub total_half_days: u32,
    /// Sum of the attendance amount snapshots.
    pub total_amount: Decimal,
    /// Settlement flag.
    #[serde(default)]
    pub paid_status: PaidStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paid_status_defaults_to_unpaid() {
        assert_eq!(PaidStatus::default(), PaidStatus::Unpaid);
    }

    #[test]
    fn test_deserialize_summary_without_status() {
        let json = r#"{
            "worker_id": "w_001",
            "month": "2024-03",
            "total_full_days": 18,
            "total_half_days": 4,
            "total_amount": "10000"
        }"#;
        let summary: MonthlyPayrollSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_full_days, 18);
        assert_eq!(summary.total_amount, Decimal::new(10000, 0));
        assert_eq!(summary.paid_status, PaidStatus::Unpaid);
    }

    #[test]
    fn test_serialize_paid_status() {
        assert_eq!(serde_json::to_string(&PaidStatus::Paid).unwrap(), "\"PAID\"");
        assert_eq!(
            serde_json::to_string(&PaidStatus::Unpaid).unwrap(),
            "\"UNPAID\""
        );
    }
}
