//! Roster configuration loading.
//!
//! This module provides the [`RosterLoader`] type for loading employee
//! rosters and salary structures from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{PayrollError, PayrollResult};
use crate::models::{Employee, validate_amount};
use crate::providers::{EmployeeDirectory, SalaryStructureProvider, SessionProvider};

use super::types::{RosterConfig, StructuresConfig};

/// Loads a roster directory and serves it as the three provider traits.
///
/// # Directory Structure
///
/// ```text
/// config/payroll/
/// ├── employees.yaml         # Sessions and their active employees
/// └── salary_structures.yaml # Per-employee base salaries
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::RosterLoader;
/// use payroll_engine::providers::{EmployeeDirectory, SessionProvider};
///
/// let loader = RosterLoader::load("./config/payroll").unwrap();
/// let session = loader.active_session().unwrap();
/// for employee in loader.list_active(&session) {
///     println!("{}: {}", employee.employee_id, employee.employee_name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RosterLoader {
    roster: RosterConfig,
    structures: StructuresConfig,
}

impl RosterLoader {
    /// Loads the roster from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns [`PayrollError::ConfigNotFound`] if either file is missing,
    /// [`PayrollError::ConfigParse`] for invalid YAML, and
    /// [`PayrollError::Validation`] if a configured base salary is negative
    /// or fractional.
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let roster: RosterConfig = Self::load_yaml(&path.join("employees.yaml"))?;
        let structures: StructuresConfig = Self::load_yaml(&path.join("salary_structures.yaml"))?;

        for (employee_id, base) in &structures.base_salaries {
            validate_amount(&format!("base_salaries.{employee_id}"), *base)?;
        }

        Ok(Self { roster, structures })
    }

    /// Returns the configured session ids.
    pub fn sessions(&self) -> Vec<&str> {
        self.roster.sessions.keys().map(String::as_str).collect()
    }

    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PayrollResult<T> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: display.clone(),
        })?;
        serde_yaml::from_str(&contents).map_err(|err| PayrollError::ConfigParse {
            path: display,
            message: err.to_string(),
        })
    }
}

impl EmployeeDirectory for RosterLoader {
    fn list_active(&self, session_id: &str) -> Vec<Employee> {
        self.roster
            .sessions
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }
}

impl SalaryStructureProvider for RosterLoader {
    fn base_salary_for(&self, employee_id: &str) -> Option<Decimal> {
        self.structures.base_salaries.get(employee_id).copied()
    }
}

impl SessionProvider for RosterLoader {
    fn active_session(&self) -> Option<String> {
        self.roster.active_session.clone()
    }
}
