//! Kepler's equation and two-body propagation from elements to Cartesian state.

use std::f64::consts::{PI, TAU};

use log::warn;
use neo_core::constants::GAUSS_K;
use neo_core::vector::Vector3;

use crate::elements::KeplerElements;
use crate::state::{Frame, StateVector};

/// Hard cap on Newton-Raphson iterations.
pub const MAX_KEPLER_ITERATIONS: usize = 20;
/// Step size below which the solver stops.
pub const KEPLER_TOLERANCE: f64 = 1e-12;

/// Outcome of a Kepler-equation solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly (rad)
    pub eccentric_anomaly: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Solve `M = E - e sin E` for `E` by Newton-Raphson.
///
/// Starts from `E = M` for e < 0.8 and `E = π` otherwise. When the iteration budget runs out
/// the last iterate is returned with `converged == false`; that is not an error.
pub fn solve_kepler(mean_anomaly: f64, e: f64) -> KeplerSolution {
    let mut ecc = if e < 0.8 { mean_anomaly } else { PI };
    for iteration in 1..=MAX_KEPLER_ITERATIONS {
        let step = -(ecc - e * ecc.sin() - mean_anomaly) / (1.0 - e * ecc.cos());
        ecc += step;
        if step.abs() < KEPLER_TOLERANCE {
            return KeplerSolution {
                eccentric_anomaly: ecc,
                iterations: iteration,
                converged: true,
            };
        }
    }
    warn!(
        "Kepler solver hit {MAX_KEPLER_ITERATIONS} iterations (M = {mean_anomaly}, e = {e}); using last iterate"
    );
    KeplerSolution {
        eccentric_anomaly: ecc,
        iterations: MAX_KEPLER_ITERATIONS,
        converged: false,
    }
}

/// Propagate `elements` to `t_jd`, returning heliocentric ecliptic J2000 position (AU) and
/// velocity (AU/day).
pub fn propagate(elements: &KeplerElements, t_jd: f64) -> StateVector {
    let a = elements.a_au;
    let e = elements.e;
    let n = elements.mean_motion_rad_day();
    // Reduce to [0, 2π) so the π starting guess for high eccentricities stays in range.
    let mean_anomaly =
        (elements.mean_anomaly_deg.to_radians() + n * (t_jd - elements.epoch_jd)).rem_euclid(TAU);

    let ecc = solve_kepler(mean_anomaly, e).eccentric_anomaly;

    let nu = 2.0
        * f64::atan2(
            (1.0 + e).sqrt() * (ecc / 2.0).sin(),
            (1.0 - e).sqrt() * (ecc / 2.0).cos(),
        );
    let r = a * (1.0 - e * ecc.cos());

    let (sin_nu, cos_nu) = nu.sin_cos();
    let position_orb = [r * cos_nu, r * sin_nu, 0.0];

    // Two-body rates with μ = k²: ṙ = k e sin ν / √p, ν̇ = k √p / r².
    let p = a * (1.0 - e * e);
    let r_dot = GAUSS_K / p.sqrt() * e * sin_nu;
    let f_dot = GAUSS_K * p.sqrt() / (r * r);
    let velocity_orb = [
        r_dot * cos_nu - r * f_dot * sin_nu,
        r_dot * sin_nu + r * f_dot * cos_nu,
        0.0,
    ];

    let omega = elements.arg_periapsis_deg.to_radians();
    let inc = elements.i_deg.to_radians();
    let raan = elements.raan_deg.to_radians();

    StateVector {
        position_au: orbital_to_ecliptic(&position_orb, omega, inc, raan),
        velocity_au_day: orbital_to_ecliptic(&velocity_orb, omega, inc, raan),
        frame: Frame::HeliocentricEclipticJ2000,
        epoch_jd: t_jd,
    }
}

/// Rotate an in-plane vector by ω about Z, then i about X, then Ω about Z.
fn orbital_to_ecliptic(v: &Vector3, omega: f64, inc: f64, raan: f64) -> Vector3 {
    rotate_z(&rotate_x(&rotate_z(v, omega), inc), raan)
}

fn rotate_z(v: &Vector3, angle: f64) -> Vector3 {
    let (s, c) = angle.sin_cos();
    [c * v[0] - s * v[1], s * v[0] + c * v[1], v[2]]
}

fn rotate_x(v: &Vector3, angle: f64) -> Vector3 {
    let (s, c) = angle.sin_cos();
    [v[0], c * v[1] - s * v[2], s * v[1] + c * v[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use neo_core::constants::J2000_JD;
    use neo_core::vector::norm;

    fn circular_one_au() -> KeplerElements {
        KeplerElements::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0, J2000_JD).unwrap()
    }

    #[test]
    fn solver_satisfies_keplers_equation() {
        for &e in &[0.0, 0.1, 0.5, 0.79, 0.8, 0.9] {
            for k in 0..12 {
                let m = 0.1 + k as f64 * 0.5;
                let sol = solve_kepler(m, e);
                assert!(sol.converged, "e = {e}, M = {m}");
                let residual = sol.eccentric_anomaly - e * sol.eccentric_anomaly.sin() - m;
                assert_abs_diff_eq!(residual, 0.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn circular_orbit_quarter_period_lands_on_y_axis() {
        let el = circular_one_au();
        let quarter = el.period_days() / 4.0;
        let state = propagate(&el, J2000_JD + quarter);
        assert_abs_diff_eq!(state.position_au[0], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(state.position_au[1], 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(state.position_au[2], 0.0, epsilon = 1e-12);
        assert_eq!(state.frame, Frame::HeliocentricEclipticJ2000);
    }

    #[test]
    fn circular_speed_matches_gauss_constant() {
        let state = propagate(&circular_one_au(), J2000_JD + 17.0);
        assert_abs_diff_eq!(norm(&state.velocity_au_day), GAUSS_K, epsilon = 1e-14);
        // ~29.78 km/s
        assert_abs_diff_eq!(state.speed_km_s(), 29.78, epsilon = 0.01);
    }

    #[test]
    fn periapsis_and_apoapsis_radii() {
        let el = KeplerElements::new(2.0, 0.5, 0.0, 0.0, 0.0, 0.0, J2000_JD).unwrap();
        let at_peri = propagate(&el, J2000_JD);
        assert_abs_diff_eq!(at_peri.distance_au(), 1.0, epsilon = 1e-12);
        let at_apo = propagate(&el, J2000_JD + el.period_days() / 2.0);
        assert_abs_diff_eq!(at_apo.distance_au(), 3.0, epsilon = 1e-9);
    }

    #[test]
    fn speed_follows_vis_viva() {
        let el = KeplerElements::new(2.5, 0.6, 12.0, 40.0, 75.0, 0.0, J2000_JD).unwrap();
        for days in [0.0, 100.0, 731.0, 1500.0] {
            let state = propagate(&el, J2000_JD + days);
            let r = state.distance_au();
            let expected = GAUSS_K * (2.0 / r - 1.0 / el.a_au).sqrt();
            assert_abs_diff_eq!(norm(&state.velocity_au_day), expected, epsilon = 1e-13);
        }
    }

    #[test]
    fn inclination_tilts_out_of_ecliptic() {
        let el = KeplerElements::new(1.0, 0.0, 90.0, 0.0, 0.0, 0.0, J2000_JD).unwrap();
        let state = propagate(&el, J2000_JD + el.period_days() / 4.0);
        assert_abs_diff_eq!(state.position_au[2], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn propagation_is_deterministic() {
        let el = KeplerElements::new(1.458, 0.2227, 10.83, 304.3, 178.9, 310.5, J2000_JD).unwrap();
        assert_eq!(propagate(&el, 2_460_000.5), propagate(&el, 2_460_000.5));
    }
}
