//! Earth rotation and spherical geodetic coordinates.

use neo_core::angle::{normalize_deg, normalize_longitude_deg};
use neo_core::constants::{J2000_JD, OBLIQUITY_J2000_DEG};
use neo_core::time::centuries_since_j2000;
use neo_core::vector::{self, Vector3};
use serde::Serialize;

/// Latitude/longitude on a spherical Earth plus height above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeodeticPoint {
    /// In [-90, 90]
    pub lat_deg: f64,
    /// In (-180, 180]
    pub lon_deg: f64,
    pub alt_km: f64,
}

/// Greenwich mean sidereal time (rad, in [0, 2π)) from the IAU-1982 polynomial.
pub fn gmst_rad(jd: f64) -> f64 {
    let t = centuries_since_j2000(jd);
    let deg = 280.460_618_37 + 360.985_647_366_29 * (jd - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_deg(deg).to_radians()
}

/// Tilt an ecliptic J2000 vector onto the mean equator (rotation about +x by ε).
pub fn ecliptic_to_equatorial(r_ecl: &Vector3) -> Vector3 {
    let (s, c) = OBLIQUITY_J2000_DEG.to_radians().sin_cos();
    [r_ecl[0], c * r_ecl[1] - s * r_ecl[2], s * r_ecl[1] + c * r_ecl[2]]
}

/// Rotate an equatorial inertial vector into the Earth-fixed frame at `jd`.
pub fn eci_to_ecef(r_eci: &Vector3, jd: f64) -> Vector3 {
    let (s, c) = gmst_rad(jd).sin_cos();
    [
        c * r_eci[0] + s * r_eci[1],
        -s * r_eci[0] + c * r_eci[1],
        r_eci[2],
    ]
}

/// Project an Earth-fixed position (km) onto a sphere of radius `earth_radius_km`.
pub fn ecef_to_geodetic(r_ecef_km: &Vector3, earth_radius_km: f64) -> GeodeticPoint {
    let [x, y, z] = *r_ecef_km;
    GeodeticPoint {
        lat_deg: z.atan2(x.hypot(y)).to_degrees(),
        lon_deg: normalize_longitude_deg(y.atan2(x).to_degrees()),
        alt_km: vector::norm(r_ecef_km) - earth_radius_km,
    }
}
