//! Assessments built on a single catalog object at a single epoch.

pub mod damage;
pub mod dashboard;
pub mod deflect;
pub mod impact_point;
pub mod profile;
pub mod state;

use neo_config::{ConfigError, ObjectRecord};
use neo_core::vector::Vector3;
use neo_deflection::DeflectionError;
use neo_frames::{FrameError, earth_state};
use neo_orbits::{KeplerElements, OrbitError, StateVector, propagate};
use neo_physics::PhysicsError;

/// Top-level assessment error.
#[derive(Debug, thiserror::Error)]
pub enum AssessError {
    #[error("catalog record rejected: {0}")]
    Config(#[from] ConfigError),
    #[error("orbit computation failed: {0}")]
    Orbit(#[from] OrbitError),
    #[error("impact physics failed: {0}")]
    Physics(#[from] PhysicsError),
    #[error("deflection failed: {0}")]
    Deflection(#[from] DeflectionError),
    #[error("frame transform failed: {0}")]
    Frame(#[from] FrameError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Heliocentric states of the object and Earth at one epoch.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Encounter {
    pub elements: KeplerElements,
    pub object: StateVector,
    pub earth: StateVector,
}

impl Encounter {
    pub(crate) fn at(record: &ObjectRecord, jd: f64) -> Result<Self, AssessError> {
        let elements = record.elements.to_elements()?;
        Ok(Self {
            elements,
            object: propagate(&elements, jd),
            earth: earth_state(jd),
        })
    }

    pub(crate) fn object_velocity_km_s(&self) -> Vector3 {
        self.object.velocity_km_s()
    }
}

fn require_positive_opt(name: &str, value: Option<f64>) -> Result<Option<f64>, AssessError> {
    match value {
        Some(v) if !(v.is_finite() && v > 0.0) => Err(AssessError::InvalidInput(format!(
            "{name} must be positive (got {v})"
        ))),
        other => Ok(other),
    }
}
