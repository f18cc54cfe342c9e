//! Roster configuration types.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML roster files that back the provider traits in deployments without a
//! live directory service.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::Employee;

/// `employees.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// The session the loader resolves as active.
    pub active_session: Option<String>,
    /// Map of session id to that session's active employees.
    pub sessions: HashMap<String, Vec<Employee>>,
}

/// `salary_structures.yaml` file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct StructuresConfig {
    /// Map of employee id to configured base salary, in whole currency
    /// units.
    pub base_salaries: HashMap<String, Decimal>,
}
