//! Airburst-oriented damage radii scaled by the cube root of yield.
//!
//! `R = C · Y^(1/3)` with `Y` in megatons TNT and `C` in km for light, moderate, and severe
//! damage; the crater estimate uses the same scaling with its own coefficient.

use neo_core::constants::JOULES_PER_MEGATON;
use serde::{Deserialize, Serialize};

use crate::{PhysicsError, require_positive};

/// Scaling coefficients (km per Mt^(1/3)). Missing keys in a settings file take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConstants {
    pub light_km: f64,
    pub moderate_km: f64,
    pub severe_km: f64,
    pub crater_coeff_km: f64,
}

impl Default for DamageConstants {
    fn default() -> Self {
        Self {
            light_km: 16.0,
            moderate_km: 6.0,
            severe_km: 2.2,
            crater_coeff_km: 0.405,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageRadii {
    pub light_km: f64,
    pub moderate_km: f64,
    pub severe_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageAssessment {
    pub energy_j: f64,
    pub yield_megatons: f64,
    pub radii_km: DamageRadii,
    pub crater_diameter_km: f64,
}

/// Damage radii and crater diameter for `mass_kg` arriving at `velocity_m_s`.
pub fn damage_radii(
    mass_kg: f64,
    velocity_m_s: f64,
    constants: &DamageConstants,
) -> Result<DamageAssessment, PhysicsError> {
    require_positive("mass", mass_kg)?;
    require_positive("velocity", velocity_m_s)?;

    let energy_j = 0.5 * mass_kg * velocity_m_s * velocity_m_s;
    let yield_megatons = energy_j / JOULES_PER_MEGATON;
    let y_cbrt = yield_megatons.cbrt();

    Ok(DamageAssessment {
        energy_j,
        yield_megatons,
        radii_km: DamageRadii {
            light_km: constants.light_km * y_cbrt,
            moderate_km: constants.moderate_km * y_cbrt,
            severe_km: constants.severe_km * y_cbrt,
        },
        crater_diameter_km: constants.crater_coeff_km * y_cbrt,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_megaton_uses_the_bare_constants() {
        // v chosen so that 0.5 m v^2 = 4.184e15 J with m = 1e7 kg
        let v = (2.0 * JOULES_PER_MEGATON / 1e7).sqrt();
        let out = damage_radii(1e7, v, &DamageConstants::default()).unwrap();
        assert_relative_eq!(out.yield_megatons, 1.0, max_relative = 1e-12);
        assert_relative_eq!(out.radii_km.light_km, 16.0, max_relative = 1e-12);
        assert_relative_eq!(out.radii_km.moderate_km, 6.0, max_relative = 1e-12);
        assert_relative_eq!(out.radii_km.severe_km, 2.2, max_relative = 1e-12);
        assert_relative_eq!(out.crater_diameter_km, 0.405, max_relative = 1e-12);
    }

    #[test]
    fn radii_are_ordered_and_scale_with_cube_root() {
        let c = DamageConstants::default();
        let small = damage_radii(1e9, 20_000.0, &c).unwrap();
        let large = damage_radii(8e9, 20_000.0, &c).unwrap();
        assert!(small.radii_km.light_km > small.radii_km.moderate_km);
        assert!(small.radii_km.moderate_km > small.radii_km.severe_km);
        assert_relative_eq!(large.radii_km.light_km / small.radii_km.light_km, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn custom_constants_are_honoured() {
        let c = DamageConstants {
            light_km: 1.0,
            moderate_km: 1.0,
            severe_km: 1.0,
            crater_coeff_km: 1.0,
        };
        let out = damage_radii(1e10, 15_000.0, &c).unwrap();
        assert_relative_eq!(out.radii_km.light_km, out.yield_megatons.cbrt());
    }

    #[test]
    fn rejects_non_positive_mass_or_speed() {
        let c = DamageConstants::default();
        assert!(damage_radii(0.0, 1.0, &c).is_err());
        assert!(damage_radii(1.0, -5.0, &c).is_err());
    }
}
