//! Salary record operations.
//!
//! This module contains the components that act on the record store: the
//! per-record state machine ([`LifecycleEngine`]), idempotent monthly bulk
//! generation ([`BulkGenerator`]), and the yearly roll-up
//! ([`AnnualAggregator`]).

mod annual;
mod bulk;
mod lifecycle;

pub use annual::{AnnualAggregator, AnnualSummary, AnnualTotals};
pub use bulk::{BulkGenerator, GenerationOutcome};
pub use lifecycle::{BulkPayOutcome, LifecycleEngine};
