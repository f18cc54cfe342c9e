//! Performance benchmarks for bulk generation and the list projection.
//!
//! This benchmark suite verifies that payroll operations stay fast at
//! realistic roster sizes:
//! - Bulk generation for 100 employees: < 5ms mean
//! - Bulk generation for 1000 employees: < 50ms mean
//! - Re-run over an already generated period (pure skip pass): < 10ms mean
//! - Sorted, paginated list over 1000 records: < 10ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use payroll_engine::engine::BulkGenerator;
use payroll_engine::models::{Employee, Period};
use payroll_engine::providers::{StaticDirectory, StaticStructures};
use payroll_engine::query::{ListFilter, ListSort, PageRequest, RecordQuery, SortField, SortOrder};
use payroll_engine::store::InMemoryStore;

const SESSION: &str = "2025-2026";

/// Builds a roster of the given size with a structure entry per employee.
fn build_roster(employee_count: usize) -> (Arc<StaticDirectory>, Arc<StaticStructures>) {
    let mut employees = Vec::with_capacity(employee_count);
    let mut structures = StaticStructures::new();
    for n in 0..employee_count {
        employees.push(Employee {
            employee_id: format!("emp_{n:04}"),
            employee_name: format!("Employee {n:04}"),
            designation: "TEACHER".to_string(),
            registration_number: format!("REG-{n:04}"),
        });
        structures = structures.with_salary(format!("emp_{n:04}"), Decimal::from(40000));
    }
    let directory = StaticDirectory::new().with_session(SESSION, employees);
    (Arc::new(directory), Arc::new(structures))
}

fn generator_over_fresh_store(
    directory: &Arc<StaticDirectory>,
    structures: &Arc<StaticStructures>,
) -> BulkGenerator {
    BulkGenerator::new(
        Arc::new(InMemoryStore::new()),
        directory.clone(),
        structures.clone(),
    )
}

/// Benchmark: one generation pass over an empty store, by roster size.
fn bench_generation(c: &mut Criterion) {
    let period = Period::new(1, 2026).unwrap();

    let mut group = c.benchmark_group("bulk_generation");
    for employee_count in [100_usize, 1000].iter() {
        let (directory, structures) = build_roster(*employee_count);
        group.throughput(Throughput::Elements(*employee_count as u64));

        group.bench_function(BenchmarkId::from_parameter(employee_count), |b| {
            b.iter_batched(
                || generator_over_fresh_store(&directory, &structures),
                |generator| {
                    let outcome = generator.generate_for_period(period, SESSION).unwrap();
                    black_box(outcome)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

/// Benchmark: re-running generation over a fully generated period.
///
/// Every employee is skipped, so this isolates the set-difference pass.
fn bench_generation_skip_pass(c: &mut Criterion) {
    let period = Period::new(1, 2026).unwrap();
    let (directory, structures) = build_roster(1000);
    let generator = generator_over_fresh_store(&directory, &structures);
    generator.generate_for_period(period, SESSION).unwrap();

    c.bench_function("bulk_generation_skip_pass_1000", |b| {
        b.iter(|| {
            let outcome = generator.generate_for_period(period, SESSION).unwrap();
            black_box(outcome)
        })
    });
}

/// Benchmark: sorted, paginated list projection over 1000 records.
fn bench_list_projection(c: &mut Criterion) {
    let period = Period::new(1, 2026).unwrap();
    let (directory, structures) = build_roster(1000);
    let store = Arc::new(InMemoryStore::new());
    let generator = BulkGenerator::new(store.clone(), directory.clone(), structures);
    generator.generate_for_period(period, SESSION).unwrap();

    let query = RecordQuery::new(store, directory);
    let sort = ListSort {
        field: SortField::EmployeeName,
        order: SortOrder::Asc,
    };
    let page = PageRequest {
        page: 5,
        page_size: 50,
    };

    c.bench_function("list_projection_1000", |b| {
        b.iter(|| {
            let result = query
                .list(&ListFilter::default(), sort, page)
                .unwrap();
            black_box(result)
        })
    });
}

criterion_group!(
    benches,
    bench_generation,
    bench_generation_skip_pass,
    bench_list_projection
);
criterion_main!(benches);
