//! Consumed collaborator interfaces.
//!
//! The payroll core does not own employees, salary structures, or sessions;
//! it reads them through the traits in this module. The wider administration
//! system supplies real implementations; [`StaticDirectory`],
//! [`StaticStructures`] and [`FixedSession`] are in-memory implementations
//! used by tests, benchmarks and the YAML roster loader.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::Employee;

/// Source of the active employee set for a session.
pub trait EmployeeDirectory: Send + Sync {
    /// Returns the active employees for the given session, in directory order.
    fn list_active(&self, session_id: &str) -> Vec<Employee>;
}

/// Source of each employee's configured base salary.
pub trait SalaryStructureProvider: Send + Sync {
    /// Returns the configured base salary for the employee, if one exists.
    fn base_salary_for(&self, employee_id: &str) -> Option<Decimal>;
}

/// Resolves the currently active academic/fiscal session.
///
/// The core itself threads explicit `session_id` parameters through every
/// call; this trait exists for the API edge, where a request may omit the
/// session and mean "the active one".
pub trait SessionProvider: Send + Sync {
    /// Returns the id of the active session, if one is configured.
    fn active_session(&self) -> Option<String>;
}

/// In-memory employee directory keyed by session id.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    sessions: HashMap<String, Vec<Employee>>,
}

impl StaticDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the active employees for a session, replacing any previous
    /// roster for that session.
    pub fn with_session(mut self, session_id: impl Into<String>, employees: Vec<Employee>) -> Self {
        self.sessions.insert(session_id.into(), employees);
        self
    }
}

impl EmployeeDirectory for StaticDirectory {
    fn list_active(&self, session_id: &str) -> Vec<Employee> {
        self.sessions.get(session_id).cloned().unwrap_or_default()
    }
}

/// In-memory salary structure table keyed by employee id.
#[derive(Debug, Clone, Default)]
pub struct StaticStructures {
    base_salaries: HashMap<String, Decimal>,
}

impl StaticStructures {
    /// Creates an empty structure table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configured base salary for an employee.
    pub fn with_salary(mut self, employee_id: impl Into<String>, base: Decimal) -> Self {
        self.base_salaries.insert(employee_id.into(), base);
        self
    }
}

impl SalaryStructureProvider for StaticStructures {
    fn base_salary_for(&self, employee_id: &str) -> Option<Decimal> {
        self.base_salaries.get(employee_id).copied()
    }
}

/// Session provider that always resolves to one fixed session.
#[derive(Debug, Clone)]
pub struct FixedSession(pub String);

impl SessionProvider for FixedSession {
    fn active_session(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
