//! Orbit utilities: Kepler propagation, state-to-element inversion, and trajectory sampling.
//!
//! Everything here is two-body, heliocentric ecliptic J2000. No perturbations are modelled.

pub mod bodies;
pub mod elements;
pub mod inverse;
pub mod kepler;
pub mod sampler;
pub mod state;

pub use bodies::EARTH_J2000;
pub use elements::{KeplerElements, period_days_from_a};
pub use inverse::{Degeneracy, ElementConversion, state_to_elements};
pub use kepler::{KeplerSolution, propagate, solve_kepler};
pub use sampler::{EpochGrid, OrbitSampleRequest, OrbitSamples, sample_orbit};
pub use state::{Frame, StateVector};

use thiserror::Error;

/// Errors raised while building or converting orbital elements.
#[derive(Debug, Error, PartialEq)]
pub enum OrbitError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("domain error: {0}")]
    DomainError(String),
}
