//! Kinetic-impactor deflection: velocity change from a collision or a preset-direction impulse,
//! and its linearised effect on semi-major axis and period.

pub mod effects;
pub mod kinetic;

pub use effects::{LINEAR_REGIME_LIMIT, OrbitEffect, PERIOD_RESPONSE_FACTOR, orbit_effect};
pub use kinetic::{
    DeflectionMode, DeflectionRequest, DeflectionResult, ImpulseVector, PresetDirection,
    PresetMeta, TargetState, deflect, implied_closing_speed, kinetic_impulse,
};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DeflectionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unknown preset direction '{0}'")]
    UnknownDirection(String),
}
