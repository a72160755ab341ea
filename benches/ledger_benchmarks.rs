//! Performance benchmarks for the payroll ledger.
//!
//! - Ledger lookup as history grows from 1 to 24 months
//! - Payroll generation for a 100-worker month
//! - Ledger lookup through the HTTP router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Datelike, Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_ledger::api::{AppState, create_router};
use payroll_ledger::config::{ConfigLoader, Settings};
use payroll_ledger::ledger::{
    MarkAttendance, NewWorker, PaymentEntry, create_worker, generate_payroll, get_ledger,
    mark_attendance, record_payment,
};
use payroll_ledger::models::{AttendanceStatus, PaymentType, PayrollMonth, Worker};
use payroll_ledger::store::InMemoryStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn worker_id(i: usize) -> String {
    format!("w_{:03}", i)
}

/// A store with `workers` workers, each marked every day of `months` months
/// starting January 2023 and paid one advance per month.
fn populated_store(workers: usize, months: u32) -> InMemoryStore {
    let store = InMemoryStore::new();
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

    for i in 0..workers {
        create_worker(
            &store,
            NewWorker {
                worker: Worker {
                    id: worker_id(i),
                    name: format!("Worker {}", i),
                    phone: String::new(),
                    village: String::new(),
                },
                full_day_rate: Some(Decimal::new(500, 0)),
                half_day_rate: Some(Decimal::new(250, 0)),
            },
        )
        .unwrap();

        let mut month = PayrollMonth::of(start);
        for _ in 0..months {
            let mut day = month.first_day();
            while month.contains_date(day) {
                mark_attendance(
                    &store,
                    MarkAttendance {
                        worker_id: worker_id(i),
                        worksite_id: "site_a".to_string(),
                        date: day,
                        status: if day.day0() % 5 == 0 {
                            AttendanceStatus::Half
                        } else {
                            AttendanceStatus::Full
                        },
                    },
                )
                .unwrap();
                day = day.checked_add_days(Days::new(1)).unwrap();
            }
            record_payment(
                &store,
                PaymentEntry {
                    worker_id: worker_id(i),
                    month: None,
                    payment_type: PaymentType::Advance,
                    amount: Decimal::new(5000, 0),
                    payment_date: month.first_day(),
                    note: String::new(),
                },
            )
            .unwrap();
            month = month.next();
        }
    }

    store
}

fn bench_ledger_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("ledger_history_months");

    for months in [1u32, 6, 12, 24].iter() {
        let store = populated_store(1, *months);
        let last = (0..months - 1).fold(PayrollMonth::new(2023, 1).unwrap(), |m, _| m.next());

        group.throughput(Throughput::Elements(*months as u64));
        group.bench_with_input(BenchmarkId::new("months", months), months, |b, _| {
            b.iter(|| black_box(get_ledger(&store, "w_000", last).unwrap()))
        });
    }

    group.finish();
}

fn bench_generate_100_workers(c: &mut Criterion) {
    let store = populated_store(100, 1);
    let month = PayrollMonth::new(2023, 1).unwrap();

    let mut group = c.benchmark_group("payroll_generation");
    group.throughput(Throughput::Elements(100));
    group.sample_size(20);

    group.bench_function("generate_100_workers", |b| {
        b.iter(|| black_box(generate_payroll(&store, month, 3).unwrap()))
    });

    group.finish();
}

fn bench_http_ledger(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let config = ConfigLoader::from_parts(Settings::default(), Vec::new());
    let router = create_router(AppState::new(config, populated_store(1, 12)));

    c.bench_function("http_ledger", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri("/payroll/ledger/w_000?month=2023-12")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_ledger_scaling,
    bench_generate_100_workers,
    bench_http_ledger,
);
criterion_main!(benches);
