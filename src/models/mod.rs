//! Core data models for the payroll engine.
//!
//! This module contains the salary record entity and its lifecycle states,
//! the payroll period, and the employee projection consumed from the
//! external directory.

mod employee;
mod period;
mod salary_record;

pub use employee::Employee;
pub use period::{Period, validate_year};
pub use salary_record::{
    NewSalaryRecord, PayStatus, RecordId, SalaryAmendment, SalaryRecord, validate_amount,
};
