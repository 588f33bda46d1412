//! Core units, constants, and shared primitives for the NEO impact engine workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Kilometres per astronomical unit.
    pub const AU_KM: f64 = 149_597_870.7;
    /// Metres per astronomical unit.
    pub const AU_M: f64 = 1.495_978_707e11;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Heliocentric gravitational parameter (m³/s²).
    pub const MU_SUN_M3_S2: f64 = 1.327_124_400_18e20;
    /// Gaussian gravitational constant, AU^(3/2)/day (√μ_sun in AU-day units).
    pub const GAUSS_K: f64 = 0.017_202_098_95;
    /// Joules per megaton of TNT.
    pub const JOULES_PER_MEGATON: f64 = 4.184e15;
    /// Mean spherical Earth radius (km).
    pub const EARTH_RADIUS_KM: f64 = 6_371.0;
    /// Mean obliquity of the ecliptic at J2000 (deg).
    pub const OBLIQUITY_J2000_DEG: f64 = 23.439_291_1;
    /// Julian date of the J2000 epoch.
    pub const J2000_JD: f64 = 2_451_545.0;
    /// Days per Julian century.
    pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
    /// AU/day expressed in km/s (≈ 1731.456 km/s).
    pub const AU_PER_DAY_TO_KM_S: f64 = AU_KM / SECONDS_PER_DAY;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{AU_KM, AU_PER_DAY_TO_KM_S};

    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert metres per second to kilometres per second.
    #[inline]
    pub fn ms_to_kms(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert kilometres per second to metres per second.
    #[inline]
    pub fn kms_to_ms(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert astronomical units to kilometres.
    #[inline]
    pub fn au_to_km(v: f64) -> f64 {
        v * AU_KM
    }

    /// Convert kilometres to astronomical units.
    #[inline]
    pub fn km_to_au(v: f64) -> f64 {
        v / AU_KM
    }

    /// Convert AU/day to km/s.
    #[inline]
    pub fn au_day_to_km_s(v: f64) -> f64 {
        v * AU_PER_DAY_TO_KM_S
    }

    /// Convert km/s to AU/day.
    #[inline]
    pub fn km_s_to_au_day(v: f64) -> f64 {
        v / AU_PER_DAY_TO_KM_S
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::{DAYS_PER_JULIAN_CENTURY, J2000_JD, SECONDS_PER_DAY};

    /// Julian date of the Unix epoch (1970-01-01T00:00:00 UTC).
    pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

    /// Convert days to seconds.
    #[inline]
    pub fn days_to_seconds(days: f64) -> f64 {
        days * SECONDS_PER_DAY
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }

    /// Julian date corresponding to a count of seconds since the Unix epoch.
    #[inline]
    pub fn jd_from_unix_seconds(seconds: f64) -> f64 {
        UNIX_EPOCH_JD + seconds_to_days(seconds)
    }

    /// Julian centuries elapsed since J2000.
    #[inline]
    pub fn centuries_since_j2000(jd: f64) -> f64 {
        (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY
    }
}

/// Angle helpers. All public angles in the workspace are degrees unless the name says otherwise.
pub mod angle {
    /// Normalize an angle in degrees to [0, 360).
    #[inline]
    pub fn normalize_deg(deg: f64) -> f64 {
        let wrapped = deg.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360 for tiny negative inputs
        if wrapped >= 360.0 { 0.0 } else { wrapped }
    }

    /// Convert radians to degrees normalized to [0, 360).
    #[inline]
    pub fn normalize_rad_to_deg(rad: f64) -> f64 {
        normalize_deg(rad.to_degrees())
    }

    /// Normalize a longitude in degrees to (-180, 180].
    #[inline]
    pub fn normalize_longitude_deg(deg: f64) -> f64 {
        let wrapped = normalize_deg(deg);
        if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector; units depend on context (AU, km, km/s, AU/day).
    pub type Vector3 = [f64; 3];

    /// The zero vector.
    pub const ZERO: Vector3 = [0.0, 0.0, 0.0];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Cross product `a × b`.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Unit vector along `v`. The unit of the zero vector is the zero vector.
    #[inline]
    pub fn unit(v: &Vector3) -> Vector3 {
        let n = norm(v);
        if n > 0.0 { scale(v, 1.0 / n) } else { ZERO }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use approx::assert_relative_eq;

        #[test]
        fn cross_follows_right_hand_rule() {
            let z = cross(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]);
            assert_eq!(z, [0.0, 0.0, 1.0]);
            let minus_z = cross(&[0.0, 1.0, 0.0], &[1.0, 0.0, 0.0]);
            assert_eq!(minus_z, [0.0, 0.0, -1.0]);
        }

        #[test]
        fn unit_of_zero_is_zero() {
            assert_eq!(unit(&ZERO), ZERO);
        }

        #[test]
        fn unit_has_length_one() {
            let u = unit(&[3.0, -4.0, 12.0]);
            assert_relative_eq!(norm(&u), 1.0, epsilon = 1e-15);
            assert_relative_eq!(u[0], 3.0 / 13.0, epsilon = 1e-15);
        }

        #[test]
        fn add_sub_scale_compose() {
            let a = [1.0, 2.0, 3.0];
            let b = [0.5, -1.0, 4.0];
            assert_eq!(sub(&add(&a, &b), &b), a);
            assert_eq!(scale(&a, 2.0), [2.0, 4.0, 6.0]);
            assert_relative_eq!(dot(&a, &b), 0.5 - 2.0 + 12.0);
        }
    }
}
