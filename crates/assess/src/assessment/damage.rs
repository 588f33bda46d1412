//! Damage radii for a catalogued object.

use neo_config::{EngineSettings, ObjectRecord};
use neo_core::units::kms_to_ms;
use neo_physics::{DamageAssessment, DamageConstants, damage_radii};
use serde::Serialize;

use super::profile::{VelocitySource, build_impact_profile, resolve_velocity};
use super::AssessError;

/// Per-call replacements for the settings' damage constants. Non-positive values are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageOverrides {
    pub light_km: Option<f64>,
    pub moderate_km: Option<f64>,
    pub severe_km: Option<f64>,
    pub crater_coeff_km: Option<f64>,
}

impl DamageOverrides {
    pub fn apply(&self, settings: &EngineSettings) -> DamageConstants {
        let pick = |value: Option<f64>, fallback: f64| value.filter(|v| *v > 0.0).unwrap_or(fallback);
        let base = &settings.damage;
        DamageConstants {
            light_km: pick(self.light_km, base.light_km),
            moderate_km: pick(self.moderate_km, base.moderate_km),
            severe_km: pick(self.severe_km, base.severe_km),
            crater_coeff_km: pick(self.crater_coeff_km, base.crater_coeff_km),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageRequest {
    /// Used when positive; otherwise the profile mass.
    pub mass_override_kg: Option<f64>,
    pub velocity_override_km_s: Option<f64>,
    pub constants: DamageOverrides,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MassSource {
    Override,
    Profile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DamageReport {
    pub object: String,
    pub mass_kg: f64,
    pub mass_source: MassSource,
    pub velocity_km_s: f64,
    pub velocity_source: VelocitySource,
    pub constants_km: DamageConstants,
    pub results: DamageAssessment,
}

pub fn assess_damage(
    record: &ObjectRecord,
    request: &DamageRequest,
    settings: &EngineSettings,
) -> Result<DamageReport, AssessError> {
    let (velocity, velocity_source) =
        resolve_velocity(record, request.velocity_override_km_s, settings)?;
    let (mass, mass_source) = match request.mass_override_kg.filter(|m| *m > 0.0) {
        Some(m) => (m, MassSource::Override),
        None => {
            let profile =
                build_impact_profile(record, request.velocity_override_km_s, settings)?;
            (profile.physical.mass_kg, MassSource::Profile)
        }
    };
    let constants = request.constants.apply(settings);
    Ok(DamageReport {
        object: record.name.clone(),
        mass_kg: mass,
        mass_source,
        velocity_km_s: velocity,
        velocity_source,
        constants_km: constants,
        results: damage_radii(mass, kms_to_ms(velocity), &constants)?,
    })
}
