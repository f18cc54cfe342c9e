//! Payroll record lifecycle engine for school administration.
//!
//! This crate implements the salary subsystem of a school-administration
//! system: creating monthly salary records, transitioning them through
//! `PENDING`/`PARTIAL`/`PAID`, idempotently bulk-generating a whole period,
//! and aggregating per-employee yearly summaries. Presentation concerns
//! (forms, slips rendering, currency formatting) live outside this crate.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod providers;
pub mod query;
pub mod store;
