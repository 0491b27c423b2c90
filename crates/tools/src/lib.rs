//! Developer tooling: read-only world inspection.
//!
//! # Invariants
//! - Tools never mutate the world they inspect.

pub mod inspector;

pub use inspector::{NodeInfo, WorldInspector, WorldSummary};
