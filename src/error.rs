//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur in the salary record lifecycle.

use thiserror::Error;

use crate::models::{PayStatus, Period, RecordId};

/// The main error type for the payroll engine.
///
/// Validation, not-found and invalid-transition errors always propagate to
/// the caller unmodified; the only locally-recovered case is the duplicate
/// conflict inside bulk generation, which is demoted to a skip count.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
/// use payroll_engine::models::Period;
///
/// let error = PayrollError::DuplicateRecord {
///     employee_id: "emp_001".to_string(),
///     period: Period::new(3, 2025).unwrap(),
///     session_id: "2025-2026".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Salary record already exists for employee 'emp_001' in 2025-03 (session '2025-2026')"
/// );
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Malformed input (bad period, negative or fractional amount, empty id),
    /// rejected before any store access.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A create collided with the one-record-per-(employee, period, session)
    /// uniqueness invariant.
    #[error(
        "Salary record already exists for employee '{employee_id}' in {period} (session '{session_id}')"
    )]
    DuplicateRecord {
        /// The employee the colliding record belongs to.
        employee_id: String,
        /// The payroll cycle of the colliding record.
        period: Period,
        /// The session of the colliding record.
        session_id: String,
    },

    /// An operation referenced a record id that does not exist.
    #[error("Salary record not found: {id}")]
    NotFound {
        /// The unknown record id.
        id: RecordId,
    },

    /// An operation is not valid from the record's current status.
    #[error("Invalid transition for salary record {id} in status {status}: {message}")]
    InvalidTransition {
        /// The record the transition was attempted on.
        id: RecordId,
        /// The record's current status.
        status: PayStatus,
        /// A description of the rejected transition.
        message: String,
    },

    /// Roster configuration file was not found at the specified path.
    #[error("Roster file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Roster configuration file could not be parsed.
    #[error("Failed to parse roster file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
