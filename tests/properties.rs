//! Property tests for ledger arithmetic and payroll generation.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_ledger::error::EngineError;
use payroll_ledger::ledger::{
    MarkAttendance, NewWorker, PaymentEntry, create_worker, generate_payroll, get_ledger,
    mark_attendance, record_payment, worker_history,
};
use payroll_ledger::models::{AttendanceStatus, PaymentType, PayrollMonth, Worker};
use payroll_ledger::store::{InMemoryStore, PayrollStore};

const WORKER: &str = "w_001";

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn status_from(code: u8) -> AttendanceStatus {
    match code % 3 {
        0 => AttendanceStatus::Full,
        1 => AttendanceStatus::Half,
        _ => AttendanceStatus::Absent,
    }
}

/// Attendance as `(day offset, status code)` and payments as
/// `(day offset, amount in cents)`, all within the first half of 2024.
fn arb_activity() -> impl Strategy<Value = (Vec<(u64, u8)>, Vec<(u64, i64)>)> {
    (
        prop::collection::vec((0u64..182, 0u8..3), 0..40),
        prop::collection::vec((0u64..182, 1i64..100_000), 0..10),
    )
}

fn build_store(attendance: &[(u64, u8)], payments: &[(u64, i64)]) -> InMemoryStore {
    let store = InMemoryStore::new();
    create_worker(
        &store,
        NewWorker {
            worker: Worker {
                id: WORKER.to_string(),
                name: "Ramesh".to_string(),
                phone: String::new(),
                village: String::new(),
            },
            full_day_rate: Some(Decimal::new(500, 0)),
            half_day_rate: Some(Decimal::new(250, 0)),
        },
    )
    .unwrap();

    for (offset, code) in attendance {
        let result = mark_attendance(
            &store,
            MarkAttendance {
                worker_id: WORKER.to_string(),
                worksite_id: "site_a".to_string(),
                date: base_date().checked_add_days(Days::new(*offset)).unwrap(),
                status: status_from(*code),
            },
        );
        // Repeated offsets collide on the same day
        assert!(matches!(
            result,
            Ok(_) | Err(EngineError::DuplicateAttendance { .. })
        ));
    }

    for (offset, cents) in payments {
        record_payment(
            &store,
            PaymentEntry {
                worker_id: WORKER.to_string(),
                month: None,
                payment_type: PaymentType::Advance,
                amount: Decimal::new(*cents, 2),
                payment_date: base_date().checked_add_days(Days::new(*offset)).unwrap(),
                note: String::new(),
            },
        )
        .unwrap();
    }

    store
}

fn months() -> Vec<PayrollMonth> {
    let mut month = PayrollMonth::new(2023, 12).unwrap();
    let mut all = Vec::new();
    while month <= PayrollMonth::new(2024, 7).unwrap() {
        all.push(month);
        month = month.next();
    }
    all
}

proptest! {
    #[test]
    fn prop_closing_is_opening_plus_earned_minus_paid((attendance, payments) in arb_activity()) {
        let store = build_store(&attendance, &payments);
        for month in months() {
            let ledger = get_ledger(&store, WORKER, month).unwrap();
            prop_assert_eq!(
                ledger.closing_balance,
                ledger.opening_balance + ledger.earned_salary - ledger.total_paid
            );
        }
    }

    #[test]
    fn prop_opening_of_next_month_is_closing_of_this_month((attendance, payments) in arb_activity()) {
        let store = build_store(&attendance, &payments);
        for month in months() {
            let this = get_ledger(&store, WORKER, month).unwrap();
            let next = get_ledger(&store, WORKER, month.next()).unwrap();
            prop_assert_eq!(next.opening_balance, this.closing_balance);
        }
    }

    #[test]
    fn prop_generate_twice_is_identical((attendance, payments) in arb_activity()) {
        let store = build_store(&attendance, &payments);
        for month in months() {
            let first = generate_payroll(&store, month, 3).unwrap();
            let second = generate_payroll(&store, month, 3).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(store.list_summaries(Some(month)).unwrap(), second);
        }
    }

    #[test]
    fn prop_generated_summaries_do_not_change_ledgers((attendance, payments) in arb_activity()) {
        let store = build_store(&attendance, &payments);
        let before: Vec<_> = months()
            .into_iter()
            .map(|m| get_ledger(&store, WORKER, m).unwrap())
            .collect();
        for month in months() {
            generate_payroll(&store, month, 3).unwrap();
        }
        let after: Vec<_> = months()
            .into_iter()
            .map(|m| get_ledger(&store, WORKER, m).unwrap())
            .collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn prop_history_agrees_with_ledgers((attendance, payments) in arb_activity()) {
        let store = build_store(&attendance, &payments);
        let history = worker_history(&store, WORKER).unwrap();
        for row in &history.months {
            let ledger = get_ledger(&store, WORKER, row.month).unwrap();
            prop_assert_eq!(ledger.opening_balance, row.opening_balance);
            prop_assert_eq!(ledger.closing_balance, row.closing_balance);
        }
    }

    #[test]
    fn prop_non_positive_payment_writes_nothing(cents in -100_000i64..=0) {
        let store = build_store(&[], &[]);
        let result = record_payment(
            &store,
            PaymentEntry {
                worker_id: WORKER.to_string(),
                month: None,
                payment_type: PaymentType::Adjustment,
                amount: Decimal::new(cents, 2),
                payment_date: base_date(),
                note: String::new(),
            },
        );
        let is_validation_error = matches!(result, Err(EngineError::Validation { .. }));
        prop_assert!(is_validation_error);
        prop_assert!(store.payments_for_worker(WORKER).unwrap().is_empty());
    }
}
