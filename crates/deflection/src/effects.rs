//! Linearised orbit change from a small velocity impulse.
//!
//! Uses the circular-orbit perturbation `Δa/a = 2 Δv_t / v_c`, where `Δv_t` is the component of
//! Δv along the heliocentric velocity and `v_c = sqrt(μ/a)`. Only valid while `|Δv| ≪ v_c`.

use log::warn;
use neo_core::constants::{AU_M, MU_SUN_M3_S2};
use neo_core::units::kms_to_ms;
use neo_core::vector::{self, Vector3};
use neo_orbits::period_days_from_a;
use serde::Serialize;

use crate::DeflectionError;

/// Multiplier from `Δa/a` to the reported `ΔP/P`. Kepler's third law alone gives 1.5.
pub const PERIOD_RESPONSE_FACTOR: f64 = 3.0;

/// `|Δv| / v_c` above which the first-order estimate is flagged.
pub const LINEAR_REGIME_LIMIT: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitEffect {
    /// Δv projected on the heliocentric velocity direction (m/s)
    pub tangential_dv_m_s: f64,
    /// Circular speed at `a` (m/s)
    pub circular_speed_m_s: f64,
    pub a_old_au: f64,
    pub a_new_au: f64,
    pub delta_a_frac: f64,
    pub period_old_days: f64,
    pub period_new_days: f64,
    pub delta_p_frac: f64,
    /// False when `|Δv| / v_c` exceeds [`LINEAR_REGIME_LIMIT`].
    pub within_linear_regime: bool,
}

/// First-order change in `a` and `P` for an impulse `delta_v_km_s` applied to a body moving at
/// `velocity_helio_km_s`. `period_days` overrides the Kepler-law period when the catalog has one.
pub fn orbit_effect(
    delta_v_km_s: &Vector3,
    velocity_helio_km_s: &Vector3,
    a_au: f64,
    period_days: Option<f64>,
) -> Result<OrbitEffect, DeflectionError> {
    if !(a_au.is_finite() && a_au > 0.0) {
        return Err(DeflectionError::InvalidInput(format!(
            "semi-major axis must be positive (got {a_au} AU)"
        )));
    }
    let period_old = match period_days {
        Some(p) if p.is_finite() && p > 0.0 => p,
        _ => period_days_from_a(a_au),
    };

    let v_hat = vector::unit(velocity_helio_km_s);
    let tangential = kms_to_ms(vector::dot(delta_v_km_s, &v_hat));
    let v_c = (MU_SUN_M3_S2 / (a_au * AU_M)).sqrt();
    let delta_a_frac = 2.0 * tangential / v_c;
    let delta_p_frac = PERIOD_RESPONSE_FACTOR * delta_a_frac;

    let ratio = kms_to_ms(vector::norm(delta_v_km_s)) / v_c;
    let within_linear_regime = ratio <= LINEAR_REGIME_LIMIT;
    if !within_linear_regime {
        warn!(
            "|dv|/v_c = {ratio:.3e} exceeds {LINEAR_REGIME_LIMIT}; first-order orbit change is unreliable"
        );
    }

    Ok(OrbitEffect {
        tangential_dv_m_s: tangential,
        circular_speed_m_s: v_c,
        a_old_au: a_au,
        a_new_au: a_au * (1.0 + delta_a_frac),
        delta_a_frac,
        period_old_days: period_old,
        period_new_days: period_old * (1.0 + delta_p_frac),
        delta_p_frac,
        within_linear_regime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_cm_per_second_along_track_at_one_au() {
        let dv = [0.0, 1e-5, 0.0];
        let out = orbit_effect(&dv, &[0.0, 29.78, 0.0], 1.0, None).unwrap();
        assert_relative_eq!(out.circular_speed_m_s, 29_784.69, max_relative = 1e-6);
        assert_relative_eq!(out.delta_a_frac, 6.714_858_8e-7, max_relative = 1e-6);
        assert_relative_eq!(out.delta_p_frac, 3.0 * out.delta_a_frac);
        assert!(out.a_new_au > out.a_old_au);
        assert!(out.within_linear_regime);
    }

    #[test]
    fn radial_push_does_not_change_a_to_first_order() {
        let out = orbit_effect(&[1e-4, 0.0, 0.0], &[0.0, 29.78, 0.0], 1.0, None).unwrap();
        assert_eq!(out.delta_a_frac, 0.0);
        assert_eq!(out.period_new_days, out.period_old_days);
    }

    #[test]
    fn catalog_period_takes_precedence() {
        let out = orbit_effect(&[0.0, -1e-5, 0.0], &[0.0, 20.0, 0.0], 1.458, Some(643.0)).unwrap();
        assert_eq!(out.period_old_days, 643.0);
        assert!(out.period_new_days < 643.0);
    }

    #[test]
    fn large_impulse_is_flagged() {
        let out = orbit_effect(&[0.0, 1.0, 0.0], &[0.0, 29.78, 0.0], 1.0, None).unwrap();
        assert!(!out.within_linear_regime);
    }

    #[test]
    fn rejects_non_positive_semi_major_axis() {
        assert!(orbit_effect(&[0.0; 3], &[0.0, 1.0, 0.0], 0.0, None).is_err());
    }
}
