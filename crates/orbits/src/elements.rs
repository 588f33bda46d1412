//! Classical heliocentric orbital elements.

use std::f64::consts::TAU;

use neo_core::constants::GAUSS_K;
use serde::{Deserialize, Serialize};

use crate::OrbitError;

/// Keplerian elements of a bound heliocentric orbit (ecliptic J2000).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeplerElements {
    /// Semi-major axis (AU)
    pub a_au: f64,
    /// Eccentricity, in [0, 1)
    pub e: f64,
    /// Inclination (deg)
    pub i_deg: f64,
    /// Longitude of the ascending node Ω (deg)
    pub raan_deg: f64,
    /// Argument of periapsis ω (deg)
    pub arg_periapsis_deg: f64,
    /// Mean anomaly at epoch M0 (deg)
    pub mean_anomaly_deg: f64,
    /// Epoch of M0 (Julian date)
    pub epoch_jd: f64,
}

impl KeplerElements {
    /// Build a validated element set. Rejects non-positive `a` and `e` outside [0, 1).
    pub fn new(
        a_au: f64,
        e: f64,
        i_deg: f64,
        raan_deg: f64,
        arg_periapsis_deg: f64,
        mean_anomaly_deg: f64,
        epoch_jd: f64,
    ) -> Result<Self, OrbitError> {
        let elements = Self {
            a_au,
            e,
            i_deg,
            raan_deg,
            arg_periapsis_deg,
            mean_anomaly_deg,
            epoch_jd,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Check the bound-orbit invariants.
    pub fn validate(&self) -> Result<(), OrbitError> {
        if !(self.a_au.is_finite() && self.a_au > 0.0) {
            return Err(OrbitError::InvalidInput(format!(
                "semi-major axis must be positive (got {} AU)",
                self.a_au
            )));
        }
        if !(0.0..1.0).contains(&self.e) {
            return Err(OrbitError::InvalidInput(format!(
                "eccentricity must lie in [0, 1) for a bound orbit (got {})",
                self.e
            )));
        }
        Ok(())
    }

    /// Mean motion (rad/day).
    pub fn mean_motion_rad_day(&self) -> f64 {
        GAUSS_K / self.a_au.powf(1.5)
    }

    /// Orbital period (days).
    pub fn period_days(&self) -> f64 {
        period_days_from_a(self.a_au)
    }
}

/// Kepler's third law with the Gaussian constant: period (days) for semi-major axis `a_au`.
pub fn period_days_from_a(a_au: f64) -> f64 {
    TAU / (GAUSS_K / a_au.powf(1.5))
}
