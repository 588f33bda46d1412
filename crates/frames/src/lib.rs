//! Frame transforms (heliocentric, geocentric, Earth-fixed, geodetic) and ground-impact geometry.
//!
//! The Earth model is a sphere rotating at the IAU-1982 GMST rate. Precession, nutation, polar
//! motion, and the ellipsoid are ignored.

pub mod earth_fixed;
pub mod geocentric;
pub mod impact;

pub use earth_fixed::{
    GeodeticPoint, ecef_to_geodetic, eci_to_ecef, ecliptic_to_equatorial, gmst_rad,
};
pub use geocentric::{earth_state, geocentric_to_heliocentric, heliocentric_to_geocentric};
pub use impact::{
    ClosestApproach, GroundImpact, ImpactHit, ImpactMiss, IntersectionOutcome, MissReason,
    aim_at_center, predict_ground_impact, ray_sphere_intersection,
};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("state is in {actual}, expected {expected}")]
    WrongFrame {
        expected: &'static str,
        actual: &'static str,
    },
}
