//! Employee projection model.
//!
//! Employees are owned by the wider administration system; this core only
//! reads their identity and display fields through the
//! [`EmployeeDirectory`](crate::providers::EmployeeDirectory) collaborator.

use serde::{Deserialize, Serialize};

/// Read-only view of an employee as supplied by the employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Stable identifier, referenced by salary records.
    pub employee_id: String,
    /// Display name, used by the list projection's name sort and search.
    pub employee_name: String,
    /// Job designation (e.g., "TEACHER", "CLERK").
    pub designation: String,
    /// School-assigned registration number.
    pub registration_number: String,
}
