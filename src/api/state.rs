//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::engine::{AnnualAggregator, BulkGenerator, LifecycleEngine};
use crate::providers::{EmployeeDirectory, SalaryStructureProvider, SessionProvider};
use crate::query::RecordQuery;
use crate::store::SalaryRecordStore;

/// Shared application state.
///
/// Owns one instance of each payroll component, all wired to the same store
/// and collaborators. Cloning is cheap; everything inside is `Arc`-shared.
#[derive(Clone)]
pub struct AppState {
    engine: LifecycleEngine,
    generator: BulkGenerator,
    query: RecordQuery,
    aggregator: AnnualAggregator,
    sessions: Arc<dyn SessionProvider>,
}

impl AppState {
    /// Wires the payroll components over one store and one set of
    /// collaborators.
    pub fn new(
        store: Arc<dyn SalaryRecordStore>,
        directory: Arc<dyn EmployeeDirectory>,
        structures: Arc<dyn SalaryStructureProvider>,
        sessions: Arc<dyn SessionProvider>,
    ) -> Self {
        Self {
            engine: LifecycleEngine::new(store.clone()),
            generator: BulkGenerator::new(store.clone(), directory.clone(), structures),
            query: RecordQuery::new(store.clone(), directory),
            aggregator: AnnualAggregator::new(store),
            sessions,
        }
    }

    /// The single-record lifecycle engine.
    pub fn engine(&self) -> &LifecycleEngine {
        &self.engine
    }

    /// The bulk generator.
    pub fn generator(&self) -> &BulkGenerator {
        &self.generator
    }

    /// The read-side query layer.
    pub fn query(&self) -> &RecordQuery {
        &self.query
    }

    /// The annual aggregator.
    pub fn aggregator(&self) -> &AnnualAggregator {
        &self.aggregator
    }

    /// The active-session resolver used when requests omit a session id.
    pub fn sessions(&self) -> &dyn SessionProvider {
        self.sessions.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
