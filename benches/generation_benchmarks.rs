//! Performance benchmarks for the Payslip Engine.
//!
//! This suite tracks the cost of each generation stage and of the full
//! document pipeline:
//! - Totals computation: < 10μs mean
//! - Verification code encoding: < 1ms mean
//! - Single document over HTTP: < 20ms mean
//! - Batch of 100 documents: < 1s mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{TimeZone, Utc};
use payslip_engine::api::{AppState, create_router};
use payslip_engine::calculation::compute_totals;
use payslip_engine::config::{ConfigLoader, RenderConfig};
use payslip_engine::layout::{PayslipContent, layout_payslip};
use payslip_engine::models::{CompanyInfo, PayrollInput, PayslipRecord};
use payslip_engine::pipeline::PayslipGenerator;
use payslip_engine::render::serialize;
use payslip_engine::verification::{encode, verification_url};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Loads the bundled configuration.
fn create_test_config() -> RenderConfig {
    ConfigLoader::load("./config/payslip.yaml")
        .expect("Failed to load config")
        .into_config()
}

fn create_company_json() -> serde_json::Value {
    serde_json::json!({
        "company_name": "Acme Ltd",
        "company_address": "1 Main Street, Springfield",
        "currency": "USD"
    })
}

/// Creates a payslip record with `item_count` allowances and deductions each.
fn create_payslip_json(employee_index: usize, item_count: usize) -> serde_json::Value {
    let allowances: serde_json::Map<String, serde_json::Value> = (0..item_count)
        .map(|i| (format!("allowance_{i:02}"), serde_json::json!(100 + i)))
        .collect();
    let deductions: serde_json::Map<String, serde_json::Value> = (0..item_count)
        .map(|i| (format!("deduction_{i:02}"), serde_json::json!(10 + i)))
        .collect();

    serde_json::json!({
        "id": "8c1f5a52-7e8e-4a53-9a3c-2f1e0d9b6a11",
        "basic_salary": "4250.00",
        "overtime_hours": "6.5",
        "overtime_rate": "32.75",
        "allowances": allowances,
        "bonuses": { "performance": "500" },
        "deductions": deductions,
        "tax_percentage": "17.5",
        "payment_date": "2025-01-31",
        "employee": {
            "employee_id": format!("EMP-{employee_index:04}"),
            "name": "Ada Obi",
            "email": "ada@example.com",
            "phone": "+1 555 0100",
            "department": "Finance",
            "designation": "Analyst",
            "bank_name": "First Bank",
            "bank_account": "0123456789"
        }
    })
}

fn create_record(item_count: usize) -> PayslipRecord {
    serde_json::from_value(create_payslip_json(1, item_count)).expect("Failed to create record")
}

fn create_company() -> CompanyInfo {
    serde_json::from_value(create_company_json()).expect("Failed to create company")
}

fn create_render_body(employee_index: usize) -> String {
    serde_json::json!({
        "payslip": create_payslip_json(employee_index, 3),
        "company": create_company_json()
    })
    .to_string()
}

/// Benchmark: Totals computation for a typical record.
///
/// Target: < 10μs mean
fn bench_compute_totals(c: &mut Criterion) {
    let record = create_record(3);
    let input = PayrollInput::from_record(&record);

    c.bench_function("compute_totals", |b| {
        b.iter(|| black_box(compute_totals(black_box(&input))))
    });
}

/// Benchmark: Encoding the verification URL into a bitmap.
///
/// Target: < 1ms mean
fn bench_encode_verification(c: &mut Criterion) {
    let config = create_test_config();
    let record = create_record(3);
    let url = verification_url(&config.base_origin, &record.id);

    c.bench_function("encode_verification", |b| {
        b.iter(|| black_box(encode(black_box(&url), &config.verification).unwrap()))
    });
}

/// Benchmark: Layout and PDF serialization of a prepared page.
///
/// Target: < 5ms mean
fn bench_layout_and_serialize(c: &mut Criterion) {
    let config = create_test_config();
    let record = create_record(3);
    let company = create_company();
    let input = PayrollInput::from_record(&record);
    let totals = compute_totals(&input);
    let url = verification_url(&config.base_origin, &record.id);
    let bitmap = encode(&url, &config.verification).unwrap();
    let generated_at = Utc.with_ymd_and_hms(2025, 1, 31, 9, 0, 0).unwrap();
    let content = PayslipContent {
        input: &input,
        totals: &totals,
        employee: &record.employee,
        company: &company,
    };

    c.bench_function("layout_payslip", |b| {
        b.iter(|| {
            black_box(layout_payslip(
                &content,
                bitmap.clone(),
                &config.document,
                generated_at,
            ))
        })
    });

    let layout = layout_payslip(&content, bitmap.clone(), &config.document, generated_at);
    c.bench_function("serialize_pdf", |b| {
        b.iter(|| black_box(serialize(black_box(&layout)).unwrap()))
    });
}

/// Benchmark: Full document generation, scaling with line item count.
fn bench_document_scaling(c: &mut Criterion) {
    let generator = PayslipGenerator::new(create_test_config());
    let company = create_company();
    let generated_at = Utc.with_ymd_and_hms(2025, 1, 31, 9, 0, 0).unwrap();

    let mut group = c.benchmark_group("document_scaling");

    for item_count in [0, 5, 10, 20] {
        let record = create_record(item_count);
        group.throughput(Throughput::Elements(item_count as u64));
        group.bench_with_input(
            BenchmarkId::new("line_items", item_count),
            &record,
            |b, record| {
                b.iter(|| {
                    black_box(
                        generator
                            .generate_document_at(record, &company, generated_at)
                            .unwrap(),
                    )
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: Single document rendered over HTTP.
///
/// Target: < 20ms mean
fn bench_render_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(PayslipGenerator::new(create_test_config())));
    let body = create_render_body(1);

    c.bench_function("render_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payslips/render")
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

/// Benchmark: Batch of 100 documents rendered over HTTP.
///
/// Target: < 1s mean
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(PayslipGenerator::new(create_test_config())));

    // Vary employee IDs so every document differs.
    let bodies: Vec<String> = (0..100).map(create_render_body).collect();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(100));
    group.sample_size(10);

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut responses = Vec::with_capacity(100);
            for body in &bodies {
                let router = router.clone();
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/payslips/render")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                responses.push(response);
            }
            black_box(responses)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_totals,
    bench_encode_verification,
    bench_layout_and_serialize,
    bench_document_scaling,
    bench_render_endpoint,
    bench_batch_100,
);
criterion_main!(benches);
