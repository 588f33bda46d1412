//! Near-Earth object impact and deflection engine.
//!
//! The member crates do the work; this package re-exports them under one roof so front-ends
//! (the `neo` CLI, notebooks, services) depend on a single crate.

pub mod epoch;

pub use neo_assess as assess;
pub use neo_assess::{config, deflection, frames, orbits, physics};
pub use neo_core as primitives;
pub use neo_export as export;

/// Engine version stamped into exported reports.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
