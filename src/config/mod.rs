//! Roster configuration for the payroll engine.
//!
//! Deployments without a live directory service back the provider traits
//! with YAML roster files loaded by [`RosterLoader`].

mod loader;
mod types;

pub use loader::RosterLoader;
pub use types::{RosterConfig, StructuresConfig};
