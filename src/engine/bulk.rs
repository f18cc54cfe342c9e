//! Idempotent monthly bulk generation.
//!
//! Computes the set of active employees lacking a record for a period and
//! creates `PENDING` records for each, with the employee's configured base
//! salary and zeroed allowances, bonus and deductions. Safe to re-run and
//! safe to race: a duplicate-key conflict from a concurrent generator (or a
//! manual create) is demoted to a skip, never an error.

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::LifecycleEngine;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{NewSalaryRecord, Period};
use crate::providers::{EmployeeDirectory, SalaryStructureProvider};
use crate::store::{RecordFilter, SalaryRecordStore};

/// Outcome of one bulk generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Records newly created by this pass.
    pub generated: usize,
    /// Employees skipped: already holding a record for the period, lost a
    /// creation race, or lacking a configured salary structure.
    pub skipped: usize,
}

/// Creates missing `PENDING` records for a whole period in one pass.
#[derive(Clone)]
pub struct BulkGenerator {
    store: Arc<dyn SalaryRecordStore>,
    directory: Arc<dyn EmployeeDirectory>,
    structures: Arc<dyn SalaryStructureProvider>,
    engine: LifecycleEngine,
}

impl BulkGenerator {
    /// Creates a generator over the given store and collaborators.
    pub fn new(
        store: Arc<dyn SalaryRecordStore>,
        directory: Arc<dyn EmployeeDirectory>,
        structures: Arc<dyn SalaryStructureProvider>,
    ) -> Self {
        let engine = LifecycleEngine::new(store.clone());
        Self {
            store,
            directory,
            structures,
            engine,
        }
    }

    /// Generates `PENDING` records for every active employee lacking one in
    /// the period.
    ///
    /// One set-difference pass, linear in the employee count. Per-employee
    /// creates are independent atomic writes: a failure on one employee is
    /// logged and counted, never fatal to the rest, which is what makes two
    /// concurrent invocations converge on exactly one record per employee.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Validation`] for a malformed period or empty
    /// session id, before any store access.
    pub fn generate_for_period(
        &self,
        period: Period,
        session_id: &str,
    ) -> PayrollResult<GenerationOutcome> {
        period.validate()?;
        if session_id.is_empty() {
            return Err(PayrollError::Validation {
                field: "session_id".to_string(),
                message: "session id must not be empty".to_string(),
            });
        }

        let existing: HashSet<String> = self
            .store
            .find(&RecordFilter::for_period(period, session_id))
            .into_iter()
            .map(|record| record.employee_id)
            .collect();

        let mut outcome = GenerationOutcome::default();
        for employee in self.directory.list_active(session_id) {
            if existing.contains(&employee.employee_id) {
                outcome.skipped += 1;
                continue;
            }
            let Some(base) = self.structures.base_salary_for(&employee.employee_id) else {
                warn!(
                    employee_id = %employee.employee_id,
                    %period,
                    "no salary structure configured, skipping"
                );
                outcome.skipped += 1;
                continue;
            };
            match self.engine.create(NewSalaryRecord {
                employee_id: employee.employee_id.clone(),
                session_id: session_id.to_string(),
                period,
                base_amount: base,
                allowances: Decimal::ZERO,
                bonus: Decimal::ZERO,
                deductions: Decimal::ZERO,
                status: None,
                payment_date: None,
            }) {
                Ok(_) => outcome.generated += 1,
                // Lost the race against a concurrent generator or a manual
                // create: the record exists, which is all we wanted.
                Err(PayrollError::DuplicateRecord { .. }) => outcome.skipped += 1,
                Err(error) => {
                    warn!(
                        employee_id = %employee.employee_id,
                        %period,
                        %error,
                        "generation failed for employee, skipping"
                    );
                    outcome.skipped += 1;
                }
            }
        }

        info!(
            %period,
            session_id,
            generated = outcome.generated,
            skipped = outcome.skipped,
            "bulk generation finished"
        );
        Ok(outcome)
    }
}
