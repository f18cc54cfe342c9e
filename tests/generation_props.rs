//! Property tests for bulk generation idempotence.
//!
//! For any roster size, period, and pre-existing subset of records, a second
//! generation pass creates nothing, and the store always converges on exactly
//! one record per eligible employee.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::engine::{BulkGenerator, LifecycleEngine};
use payroll_engine::models::{Employee, NewSalaryRecord, Period};
use payroll_engine::providers::{StaticDirectory, StaticStructures};
use payroll_engine::store::{InMemoryStore, RecordFilter, SalaryRecordStore};

const SESSION: &str = "2025-2026";

fn fixture(employee_count: usize) -> (BulkGenerator, LifecycleEngine, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let mut employees = Vec::new();
    let mut structures = StaticStructures::new();
    for n in 0..employee_count {
        employees.push(Employee {
            employee_id: format!("emp_{n:03}"),
            employee_name: format!("Employee {n:03}"),
            designation: "TEACHER".to_string(),
            registration_number: format!("REG-{n:03}"),
        });
        structures = structures.with_salary(format!("emp_{n:03}"), Decimal::from(40000));
    }
    let directory = StaticDirectory::new().with_session(SESSION, employees);
    let generator = BulkGenerator::new(
        store.clone(),
        Arc::new(directory),
        Arc::new(structures),
    );
    let engine = LifecycleEngine::new(store.clone());
    (generator, engine, store)
}

proptest! {
    #[test]
    fn second_pass_generates_nothing(
        employee_count in 1usize..40,
        month in 1u32..=12,
        year in 2000i32..2100,
    ) {
        let (generator, _, store) = fixture(employee_count);
        let period = Period::new(month, year).unwrap();

        let first = generator.generate_for_period(period, SESSION).unwrap();
        prop_assert_eq!(first.generated, employee_count);

        let second = generator.generate_for_period(period, SESSION).unwrap();
        prop_assert_eq!(second.generated, 0);
        prop_assert_eq!(second.skipped, employee_count);
        prop_assert_eq!(
            store.find(&RecordFilter::for_period(period, SESSION)).len(),
            employee_count
        );
    }

    #[test]
    fn generation_completes_a_partially_filled_period(
        employee_count in 1usize..40,
        pre_seed in prop::collection::btree_set(0usize..40, 0..40),
        month in 1u32..=12,
        year in 2000i32..2100,
    ) {
        let (generator, engine, store) = fixture(employee_count);
        let period = Period::new(month, year).unwrap();

        // Pre-create records for an arbitrary subset of the roster.
        let seeded: Vec<usize> = pre_seed
            .into_iter()
            .filter(|n| *n < employee_count)
            .collect();
        for n in &seeded {
            engine
                .create(NewSalaryRecord {
                    employee_id: format!("emp_{n:03}"),
                    session_id: SESSION.to_string(),
                    period,
                    base_amount: Decimal::from(35000),
                    allowances: Decimal::ZERO,
                    bonus: Decimal::ZERO,
                    deductions: Decimal::ZERO,
                    status: None,
                    payment_date: None,
                })
                .unwrap();
        }

        let outcome = generator.generate_for_period(period, SESSION).unwrap();
        prop_assert_eq!(outcome.generated, employee_count - seeded.len());
        prop_assert_eq!(outcome.skipped, seeded.len());
        prop_assert_eq!(outcome.generated + outcome.skipped, employee_count);
        prop_assert_eq!(
            store.find(&RecordFilter::for_period(period, SESSION)).len(),
            employee_count
        );
    }
}
