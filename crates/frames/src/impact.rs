//! Straight-line ground-impact prediction.
//!
//! The path is `r(t) = r0 + v t` in the geocentric ecliptic J2000 frame; gravity focusing, drag,
//! and fragmentation are ignored. The crossing point is tilted onto the mean equator and turned by
//! GMST before it is projected to latitude and longitude. Use a start epoch near closest approach
//! for meaningful results.

use log::debug;
use neo_core::time::seconds_to_days;
use neo_core::vector::{self, Vector3};
use serde::Serialize;

use crate::FrameError;
use crate::earth_fixed::{GeodeticPoint, ecef_to_geodetic, eci_to_ecef, ecliptic_to_equatorial};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissReason {
    /// Discriminant < 0; the line never meets the sphere.
    NoIntersection,
    /// Both roots are negative; the line met the sphere before `t = 0`.
    IntersectionInPast,
}

impl MissReason {
    pub fn describe(&self) -> &'static str {
        match self {
            MissReason::NoIntersection => "No intersection (discriminant < 0)",
            MissReason::IntersectionInPast => "Intersection in past",
        }
    }
}

/// Vertex of the range parabola.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClosestApproach {
    pub t_star_s: f64,
    pub range_min_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum IntersectionOutcome {
    /// Smallest non-negative root (s).
    Hit { time_s: f64 },
    Miss {
        reason: MissReason,
        closest: ClosestApproach,
    },
}

/// Solve `|r0 + v t| = radius` for the first non-negative `t`.
///
/// Equivalent to the quadratic `|v|² t² + 2 (r0·v) t + |r0|² − R² = 0`, but the discriminant is
/// formed as `R² − d²` from the closest-approach distance `d` so that it does not cancel when
/// `|r0| ≫ R`.
pub fn ray_sphere_intersection(
    r0_km: &Vector3,
    v_km_s: &Vector3,
    radius_km: f64,
) -> Result<IntersectionOutcome, FrameError> {
    let speed_sq = vector::dot(v_km_s, v_km_s);
    if !(speed_sq > 0.0) {
        return Err(FrameError::InvalidInput(
            "velocity must be non-zero to intersect a sphere".to_string(),
        ));
    }
    if !(radius_km.is_finite() && radius_km > 0.0) {
        return Err(FrameError::InvalidInput(format!(
            "sphere radius must be positive (got {radius_km} km)"
        )));
    }

    // Vertex of the range parabola, t* = -b / 2a.
    let t_star = -vector::dot(r0_km, v_km_s) / speed_sq;
    let range_min = vector::norm(&vector::add(r0_km, &vector::scale(v_km_s, t_star)));
    let closest = ClosestApproach {
        t_star_s: t_star,
        range_min_km: range_min,
    };

    let chord_sq = radius_km * radius_km - range_min * range_min;
    if chord_sq < 0.0 {
        return Ok(IntersectionOutcome::Miss {
            reason: MissReason::NoIntersection,
            closest,
        });
    }
    let half_chord_s = chord_sq.sqrt() / speed_sq.sqrt();
    let (t1, t2) = (t_star - half_chord_s, t_star + half_chord_s);
    match [t1, t2].into_iter().filter(|t| *t >= 0.0).reduce(f64::min) {
        Some(time_s) => Ok(IntersectionOutcome::Hit { time_s }),
        None => Ok(IntersectionOutcome::Miss {
            reason: MissReason::IntersectionInPast,
            closest,
        }),
    }
}

/// Point `v` at the frame origin. Keeps `|v|` unless a positive `speed_override_km_s` is given.
pub fn aim_at_center(
    r0_km: &Vector3,
    v_km_s: &Vector3,
    speed_override_km_s: Option<f64>,
) -> Result<Vector3, FrameError> {
    if vector::norm(r0_km) <= 0.0 {
        return Err(FrameError::InvalidInput(
            "cannot aim at the centre from the centre".to_string(),
        ));
    }
    let speed = match speed_override_km_s {
        Some(s) if s > 0.0 => s,
        _ => vector::norm(v_km_s),
    };
    Ok(vector::scale(&vector::unit(&vector::scale(r0_km, -1.0)), speed))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactHit {
    pub time_to_impact_s: f64,
    pub jd_impact: f64,
    /// Equatorial inertial (mean equator and equinox of J2000).
    pub r_eci_km: Vector3,
    pub v_eci_km_s: Vector3,
    pub r_ecef_km: Vector3,
    pub point: GeodeticPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactMiss {
    pub reason: MissReason,
    pub t_star_s: f64,
    pub jd_star: f64,
    pub range_min_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GroundImpact {
    Hit(ImpactHit),
    Miss(ImpactMiss),
}

/// Intersect the straight-line path (geocentric ecliptic, km and km/s) with a sphere of
/// `earth_radius_km + entry_alt_km` and, on a hit, convert the crossing point to geodetic
/// coordinates at the impact epoch.
pub fn predict_ground_impact(
    r0_km: &Vector3,
    v_km_s: &Vector3,
    jd0: f64,
    earth_radius_km: f64,
    entry_alt_km: f64,
) -> Result<GroundImpact, FrameError> {
    let hit_radius = earth_radius_km + entry_alt_km;
    match ray_sphere_intersection(r0_km, v_km_s, hit_radius)? {
        IntersectionOutcome::Hit { time_s } => {
            let jd_impact = jd0 + seconds_to_days(time_s);
            let r_eci = ecliptic_to_equatorial(&vector::add(r0_km, &vector::scale(v_km_s, time_s)));
            let r_ecef = eci_to_ecef(&r_eci, jd_impact);
            debug!("impact after {time_s:.1} s at JD {jd_impact:.6}");
            Ok(GroundImpact::Hit(ImpactHit {
                time_to_impact_s: time_s,
                jd_impact,
                r_eci_km: r_eci,
                v_eci_km_s: ecliptic_to_equatorial(v_km_s),
                r_ecef_km: r_ecef,
                point: ecef_to_geodetic(&r_ecef, earth_radius_km),
            }))
        }
        IntersectionOutcome::Miss { reason, closest } => {
            debug!(
                "no impact ({}); closest approach {:.1} km",
                reason.describe(),
                closest.range_min_km
            );
            Ok(GroundImpact::Miss(ImpactMiss {
                reason,
                t_star_s: closest.t_star_s,
                jd_star: jd0 + seconds_to_days(closest.t_star_s),
                range_min_km: closest.range_min_km,
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use neo_core::constants::EARTH_RADIUS_KM;

    const R: f64 = EARTH_RADIUS_KM;

    #[test]
    fn head_on_path_hits_after_distance_over_speed() {
        let out = ray_sphere_intersection(&[10_000.0, 0.0, 0.0], &[-10.0, 0.0, 0.0], R).unwrap();
        match out {
            IntersectionOutcome::Hit { time_s } => {
                assert_abs_diff_eq!(time_s, (10_000.0 - R) / 10.0, epsilon = 1e-9)
            }
            other => panic!("expected hit, got {other:?}"),
        }
    }

    #[test]
    fn offset_path_misses_with_closest_approach() {
        let out = ray_sphere_intersection(&[10_000.0, 7_000.0, 0.0], &[-10.0, 0.0, 0.0], R).unwrap();
        match out {
            IntersectionOutcome::Miss { reason, closest } => {
                assert_eq!(reason, MissReason::NoIntersection);
                assert_abs_diff_eq!(closest.t_star_s, 1_000.0, epsilon = 1e-9);
                assert_abs_diff_eq!(closest.range_min_km, 7_000.0, epsilon = 1e-9);
            }
            other => panic!("expected miss, got {other:?}"),
        }
    }

    #[test]
    fn receding_path_is_in_the_past() {
        let out = ray_sphere_intersection(&[10_000.0, 0.0, 0.0], &[10.0, 0.0, 0.0], R).unwrap();
        match out {
            IntersectionOutcome::Miss { reason, closest } => {
                assert_eq!(reason, MissReason::IntersectionInPast);
                assert!(closest.t_star_s < 0.0);
            }
            other => panic!("expected miss, got {other:?}"),
        }
    }

    #[test]
    fn zero_velocity_is_rejected() {
        assert!(ray_sphere_intersection(&[10_000.0, 0.0, 0.0], &[0.0; 3], R).is_err());
    }

    #[test]
    fn aim_preserves_or_overrides_speed() {
        let r0 = [0.0, 20_000.0, 0.0];
        let v = aim_at_center(&r0, &[3.0, 4.0, 0.0], None).unwrap();
        assert_abs_diff_eq!(v[1], -5.0, epsilon = 1e-12);
        let v = aim_at_center(&r0, &[3.0, 4.0, 0.0], Some(12.0)).unwrap();
        assert_abs_diff_eq!(vector::norm(&v), 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v[1], -12.0, epsilon = 1e-12);
    }

    #[test]
    fn ecliptic_north_approach_lands_off_the_pole() {
        let jd = 2_460_000.5;
        let out = predict_ground_impact(&[0.0, 0.0, 50_000.0], &[0.0, 0.0, -20.0], jd, R, 0.0).unwrap();
        match out {
            GroundImpact::Hit(hit) => {
                let tilt = neo_core::constants::OBLIQUITY_J2000_DEG;
                assert_abs_diff_eq!(hit.point.lat_deg, 90.0 - tilt, epsilon = 1e-9);
                assert_abs_diff_eq!(hit.r_eci_km[2], R * tilt.to_radians().cos(), epsilon = 1e-6);
            }
            GroundImpact::Miss(m) => panic!("expected hit, got {m:?}"),
        }
    }

    #[test]
    fn aimed_path_always_hits() {
        let r0 = [300_000.0, -150_000.0, 80_000.0];
        let v = aim_at_center(&r0, &[1.0, 2.0, 3.0], Some(15.0)).unwrap();
        let out = predict_ground_impact(&r0, &v, 2_460_000.5, R, 100.0).unwrap();
        match out {
            GroundImpact::Hit(hit) => {
                assert_abs_diff_eq!(vector::norm(&hit.r_eci_km), R + 100.0, epsilon = 1e-6);
                assert_abs_diff_eq!(hit.point.alt_km, 100.0, epsilon = 1e-6);
                assert!(hit.jd_impact > 2_460_000.5);
                assert!((-90.0..=90.0).contains(&hit.point.lat_deg));
            }
            GroundImpact::Miss(m) => panic!("expected hit, got {m:?}"),
        }
    }
}
