//! Performance benchmarks for the payroll engine.
//!
//! Targets:
//! - Single employee, direct call: < 50μs mean
//! - Single employee over HTTP: < 1ms mean
//! - Batch of 100 employees over HTTP: < 20ms mean
//! - Payroll run of 1000 employees, direct call: < 100ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{SalaryInputs, calculate_employee_salary, run_payroll};
use payroll_engine::config::{ConfigLoader, PayrollRules};
use payroll_engine::models::PayMonth;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const STATUSES: [&str; 7] = [
    "present",
    "present",
    "work_from_home",
    "present",
    "checked_out",
    "weekoff",
    "weekoff",
];

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/payroll").expect("Failed to load config");
    AppState::new(config)
}

fn june() -> PayMonth {
    "2025-06".parse().expect("valid month")
}

fn employee_email(index: usize) -> String {
    format!("employee{:04}@example.com", index)
}

/// Creates the JSON collections for `employee_count` employees with a full
/// month of attendance and one approved bonus each.
fn create_payroll_data(employee_count: usize) -> serde_json::Value {
    let mut policies = Vec::with_capacity(employee_count);
    let mut attendance = Vec::with_capacity(employee_count * 30);
    let mut adjustments = Vec::with_capacity(employee_count);

    for i in 0..employee_count {
        let email = employee_email(i);
        policies.push(serde_json::json!({
            "employee_email": email,
            "is_active": true,
            "basic_salary": 25000 + (i % 50) * 500,
            "hra": 10000,
            "travelling_allowance": 1600,
            "employee_pf_percentage": 12,
            "employer_pf_percentage": 12,
            "employee_esi_fixed": 250,
            "labour_welfare_employee": 25,
            "late_penalty_per_minute": 2
        }));
        for day in 1..=30usize {
            attendance.push(serde_json::json!({
                "employee_email": email,
                "date": format!("2025-06-{:02}", day),
                "status": STATUSES[(day + i) % STATUSES.len()],
                "is_late": (day + i) % 11 == 0
            }));
        }
        adjustments.push(serde_json::json!({
            "employee_email": email,
            "month": "2025-06",
            "adjustment_type": "bonus",
            "amount": 1000,
            "status": "approved"
        }));
    }

    serde_json::json!({
        "month": "2025-06",
        "policies": policies,
        "attendance": attendance,
        "adjustments": adjustments,
        "salary_records": []
    })
}

fn create_inputs(employee_count: usize) -> SalaryInputs {
    let data = create_payroll_data(employee_count);
    let request: payroll_engine::api::BatchCalculationRequest =
        serde_json::from_value(data).expect("valid request");
    let (_, inputs) = request.into_domain().expect("valid inputs");
    inputs
}

/// Benchmark: One employee computed directly.
///
/// Target: < 50μs mean
fn bench_single_employee(c: &mut Criterion) {
    let inputs = create_inputs(1);
    let rules = PayrollRules::default();
    let email = employee_email(0);

    c.bench_function("single_employee", |b| {
        b.iter(|| {
            black_box(calculate_employee_salary(
                black_box(&inputs),
                &email,
                june(),
                &rules,
            ))
        })
    });
}

/// Benchmark: One employee over HTTP.
///
/// Target: < 1ms mean
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let mut request = create_payroll_data(1);
    request["employee_email"] = serde_json::json!(employee_email(0));
    let body = request.to_string();

    c.bench_function("single_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Batch of 100 employees over HTTP.
///
/// Target: < 20ms mean
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = create_payroll_data(100).to_string();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(100));
    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/calculate/batch")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
    group.finish();
}

/// Benchmark: Payroll runs of growing size, computed directly.
///
/// Target: < 100ms mean for 1000 employees
fn bench_scaling(c: &mut Criterion) {
    let rules = PayrollRules::default();
    let mut group = c.benchmark_group("scaling");
    group.sample_size(20);

    for employee_count in [10, 100, 1000].iter() {
        let inputs = create_inputs(*employee_count);

        group.throughput(Throughput::Elements(*employee_count as u64));
        group.bench_with_input(
            BenchmarkId::new("employees", employee_count),
            employee_count,
            |b, _| b.iter(|| black_box(run_payroll(black_box(&inputs), june(), &rules))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_employee,
    bench_single_request,
    bench_batch_100,
    bench_scaling,
);
criterion_main!(benches);
