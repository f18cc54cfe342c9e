//! Single-record state machine: create, amend, pay, delete.
//!
//! The lifecycle is `PENDING <-> PARTIAL -> PAID`, with `PAID` terminal; the
//! only way out of any status is a hard delete, after which the employee
//! reappears in the missing-employees projection for that period. The engine
//! never infers `PARTIAL` from amounts; it only accepts it as an explicit
//! status on create or amend.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{NewSalaryRecord, PayStatus, RecordId, SalaryAmendment, SalaryRecord};
use crate::store::SalaryRecordStore;

/// Outcome of a bulk payment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkPayOutcome {
    /// Records transitioned to `PAID`.
    pub paid: usize,
    /// Records skipped because they were missing or already `PAID`.
    pub skipped: usize,
}

/// State machine for individual salary records.
///
/// All writes go through the store's uniqueness guard; each operation is a
/// single-record atomic write with no multi-row transaction.
#[derive(Clone)]
pub struct LifecycleEngine {
    store: Arc<dyn SalaryRecordStore>,
}

impl LifecycleEngine {
    /// Creates an engine backed by the given store.
    pub fn new(store: Arc<dyn SalaryRecordStore>) -> Self {
        Self { store }
    }

    /// Creates a salary record.
    ///
    /// The record starts `PENDING` unless the command declares an explicit
    /// `PARTIAL` status.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::Validation`] for malformed input and
    /// [`PayrollError::DuplicateRecord`] if a record already exists for the
    /// `(employee, period, session)` tuple.
    pub fn create(&self, command: NewSalaryRecord) -> PayrollResult<SalaryRecord> {
        let record = SalaryRecord::create_pending(command)?;
        let record = self.store.insert(record)?;
        info!(
            record_id = %record.id,
            employee_id = %record.employee_id,
            period = %record.period,
            "salary record created"
        );
        Ok(record)
    }

    /// Amends a record's amount fields and/or flips it between `PENDING`
    /// and `PARTIAL`.
    ///
    /// A `PAID` record is immutable here; corrections require deleting and
    /// recreating the record.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::NotFound`] for an unknown id,
    /// [`PayrollError::Validation`] for a bad amount, and
    /// [`PayrollError::InvalidTransition`] when the record is already `PAID`
    /// or the amendment tries to set `PAID` directly.
    pub fn amend(&self, id: RecordId, amendment: SalaryAmendment) -> PayrollResult<SalaryRecord> {
        amendment.validate()?;
        let mut record = self.store.get(id).ok_or(PayrollError::NotFound { id })?;
        if record.status == PayStatus::Paid {
            return Err(PayrollError::InvalidTransition {
                id,
                status: record.status,
                message: "a PAID record cannot be amended".to_string(),
            });
        }
        if let Some(status) = amendment.status {
            if status == PayStatus::Paid {
                return Err(PayrollError::InvalidTransition {
                    id,
                    status: record.status,
                    message: "status PAID is reachable only through pay".to_string(),
                });
            }
            record.status = status;
        }
        if let Some(amount) = amendment.base_amount {
            record.base_amount = amount;
        }
        if let Some(amount) = amendment.allowances {
            record.allowances = amount;
        }
        if let Some(amount) = amendment.bonus {
            record.bonus = amount;
        }
        if let Some(amount) = amendment.deductions {
            record.deductions = amount;
        }
        if let Some(date) = amendment.payment_date {
            record.payment_date = Some(date);
        }
        // A payment date only makes sense on a settled or partially settled
        // record.
        if record.status == PayStatus::Pending {
            record.payment_date = None;
        }
        self.store.update(&record)?;
        info!(record_id = %record.id, "salary record amended");
        Ok(record)
    }

    /// Transitions a record to `PAID`, stamping the payment date.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::NotFound`] for an unknown id and
    /// [`PayrollError::InvalidTransition`] if the record is already `PAID`.
    pub fn pay(&self, id: RecordId, payment_date: NaiveDate) -> PayrollResult<SalaryRecord> {
        let mut record = self.store.get(id).ok_or(PayrollError::NotFound { id })?;
        if record.status == PayStatus::Paid {
            return Err(PayrollError::InvalidTransition {
                id,
                status: record.status,
                message: "record is already PAID".to_string(),
            });
        }
        record.status = PayStatus::Paid;
        record.payment_date = Some(payment_date);
        self.store.update(&record)?;
        info!(
            record_id = %record.id,
            employee_id = %record.employee_id,
            period = %record.period,
            %payment_date,
            "salary record paid"
        );
        Ok(record)
    }

    /// Removes a record unconditionally, from any status.
    ///
    /// Deletion is hard: afterwards the employee counts as missing for the
    /// record's period again, and the tuple may be reused.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::NotFound`] for an unknown id.
    pub fn delete(&self, id: RecordId) -> PayrollResult<()> {
        let record = self.store.remove(id)?;
        info!(
            record_id = %record.id,
            employee_id = %record.employee_id,
            period = %record.period,
            "salary record deleted"
        );
        Ok(())
    }

    /// Pays a batch of records as independent per-record transitions.
    ///
    /// Records that are missing or already `PAID` are counted as skipped and
    /// never block the rest of the batch.
    pub fn pay_many(&self, ids: &[RecordId], payment_date: NaiveDate) -> BulkPayOutcome {
        let mut outcome = BulkPayOutcome::default();
        for &id in ids {
            match self.pay(id, payment_date) {
                Ok(_) => outcome.paid += 1,
                Err(error) => {
                    warn!(record_id = %id, %error, "bulk pay skipped record");
                    outcome.skipped += 1;
                }
            }
        }
        outcome
    }

    /// Deletes every existing record in the batch, ignoring unknown ids.
    ///
    /// Returns the number of records actually removed.
    pub fn delete_many(&self, ids: &[RecordId]) -> usize {
        ids.iter().filter(|&&id| self.delete(id).is_ok()).count()
    }
}
