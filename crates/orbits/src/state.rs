//! Frame-tagged Cartesian state vectors.

use neo_core::units::au_day_to_km_s;
use neo_core::vector::{self, Vector3};
use serde::Serialize;

/// Reference frame a state vector is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Frame {
    #[serde(rename = "heliocentric_ecliptic_J2000")]
    HeliocentricEclipticJ2000,
    #[serde(rename = "geocentric_ecliptic_J2000")]
    GeocentricEclipticJ2000,
}

impl Frame {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frame::HeliocentricEclipticJ2000 => "heliocentric_ecliptic_J2000",
            Frame::GeocentricEclipticJ2000 => "geocentric_ecliptic_J2000",
        }
    }
}

/// Position (AU) and velocity (AU/day) at an epoch, tagged with its frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateVector {
    pub position_au: Vector3,
    pub velocity_au_day: Vector3,
    pub frame: Frame,
    pub epoch_jd: f64,
}

impl StateVector {
    /// Velocity converted to km/s.
    pub fn velocity_km_s(&self) -> Vector3 {
        vector::scale(&self.velocity_au_day, au_day_to_km_s(1.0))
    }

    /// Distance from the frame origin (AU).
    pub fn distance_au(&self) -> f64 {
        vector::norm(&self.position_au)
    }

    /// Speed in km/s.
    pub fn speed_km_s(&self) -> f64 {
        vector::norm(&self.velocity_km_s())
    }
}
