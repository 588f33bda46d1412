//! Kinetic-impactor deflection at an epoch, with energy context.

use neo_config::{EngineSettings, ObjectRecord};
use neo_core::vector;
use neo_deflection::{DeflectionMode, DeflectionRequest, DeflectionResult, TargetState, deflect};
use neo_orbits::Frame;
use neo_physics::impact_energy;
use serde::Serialize;

use super::profile::{build_impact_profile, resolve_velocity};
use super::state::ReportFrame;
use super::{AssessError, Encounter, require_positive_opt};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeflectionSpec {
    pub mode: DeflectionMode,
    /// Momentum-enhancement factor
    pub beta: f64,
    /// Replaces the profile mass when given.
    pub asteroid_mass_kg: Option<f64>,
    /// Speed used for the "before" energy; defaults to the profile velocity chain.
    pub baseline_velocity_km_s: Option<f64>,
    /// Frame of the target velocity that vector-mode impactor velocities are given in.
    pub frame: ReportFrame,
}

impl Default for DeflectionSpec {
    fn default() -> Self {
        Self {
            mode: DeflectionMode::None,
            beta: 1.0,
            asteroid_mass_kg: None,
            baseline_velocity_km_s: None,
            frame: ReportFrame::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeflectionReport {
    pub object: String,
    pub frame: Frame,
    pub jd: f64,
    pub mode: &'static str,
    pub asteroid_mass_kg: f64,
    pub beta: f64,
    pub pre_speed_km_s: f64,
    pub post_speed_km_s: f64,
    pub energy_before_mt_tnt: f64,
    pub energy_after_mt_tnt: f64,
    pub result: DeflectionResult,
}

pub(crate) fn mode_label(mode: &DeflectionMode) -> &'static str {
    match mode {
        DeflectionMode::Vector { .. } => "vector",
        DeflectionMode::Preset { .. } => "preset",
        DeflectionMode::None => "none",
    }
}

/// Everything a deflection needs once the object has been propagated to the epoch.
pub(crate) struct Applied {
    pub encounter: Encounter,
    pub frame: Frame,
    pub asteroid_mass_kg: f64,
    pub baseline_velocity_km_s: f64,
    pub result: DeflectionResult,
}

pub(crate) fn apply_deflection(
    record: &ObjectRecord,
    jd: f64,
    spec: &DeflectionSpec,
    settings: &EngineSettings,
) -> Result<Applied, AssessError> {
    let (baseline_velocity_km_s, _) =
        resolve_velocity(record, spec.baseline_velocity_km_s, settings)?;
    let asteroid_mass_kg = match require_positive_opt("asteroid mass", spec.asteroid_mass_kg)? {
        Some(m) => m,
        None => {
            build_impact_profile(record, spec.baseline_velocity_km_s, settings)?
                .physical
                .mass_kg
        }
    };

    let encounter = Encounter::at(record, jd)?;
    let framed = spec.frame.select(&encounter.object)?;
    let target = TargetState {
        position_helio_au: encounter.object.position_au,
        velocity_helio_km_s: encounter.object_velocity_km_s(),
        velocity_frame_km_s: framed.velocity_km_s(),
        semi_major_axis_au: encounter.elements.a_au,
        period_days: record.elements.per,
    };
    let result = deflect(
        &target,
        &DeflectionRequest {
            mode: spec.mode,
            asteroid_mass_kg,
            beta: spec.beta,
        },
    )?;

    Ok(Applied {
        encounter,
        frame: framed.frame,
        asteroid_mass_kg,
        baseline_velocity_km_s,
        result,
    })
}

/// Δv, post-impact velocity, first-order orbit change, and before/after energies.
pub fn analyze_deflection(
    record: &ObjectRecord,
    jd: f64,
    spec: &DeflectionSpec,
    settings: &EngineSettings,
) -> Result<DeflectionReport, AssessError> {
    let applied = apply_deflection(record, jd, spec, settings)?;
    let post_speed = vector::norm(&applied.result.post_velocity_km_s);
    let before = impact_energy(applied.asteroid_mass_kg, applied.baseline_velocity_km_s)?;
    let after = impact_energy(applied.asteroid_mass_kg, post_speed)?;

    Ok(DeflectionReport {
        object: record.name.clone(),
        frame: applied.frame,
        jd,
        mode: mode_label(&spec.mode),
        asteroid_mass_kg: applied.asteroid_mass_kg,
        beta: spec.beta,
        pre_speed_km_s: vector::norm(&applied.result.pre_velocity_km_s),
        post_speed_km_s: post_speed,
        energy_before_mt_tnt: before.megatons_tnt,
        energy_after_mt_tnt: after.megatons_tnt,
        result: applied.result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::fixtures::eros;
    use approx::assert_relative_eq;
    use neo_deflection::PresetDirection;

    const JD: f64 = 2_460_200.5;

    #[test]
    fn retrograde_push_shrinks_the_orbit() {
        let spec = DeflectionSpec {
            mode: DeflectionMode::Preset {
                direction: PresetDirection::Retrograde,
                delta_v_m_s: 0.05,
                impactor_mass_kg: Some(600.0),
            },
            asteroid_mass_kg: Some(5e10),
            ..Default::default()
        };
        let report = analyze_deflection(&eros(), JD, &spec, &EngineSettings::default()).unwrap();
        assert_eq!(report.mode, "preset");
        assert_eq!(report.frame, Frame::GeocentricEclipticJ2000);
        assert_relative_eq!(report.result.delta_v_mag_m_s, 0.05, max_relative = 1e-12);
        assert!(report.result.delta_a_frac() < 0.0);
        assert_eq!(report.result.orbit_effect.period_old_days, 643.1);
        assert!(report.result.orbit_effect.period_new_days < 643.1);
    }

    #[test]
    fn vector_mode_uses_the_requested_frame() {
        let helio_state = Encounter::at(&eros(), JD).unwrap();
        let v_met = helio_state.object_velocity_km_s();
        let spec = DeflectionSpec {
            mode: DeflectionMode::Vector {
                impactor_velocity_km_s: vector::add(&v_met, &[0.0, 0.0, 10.0]),
                impactor_mass_kg: 500.0,
            },
            beta: 2.0,
            asteroid_mass_kg: Some(1e10),
            frame: ReportFrame::Helio,
            ..Default::default()
        };
        let report = analyze_deflection(&eros(), JD, &spec, &EngineSettings::default()).unwrap();
        // 2 * 500/1e10 * 10 km/s = 1e-6 km/s
        assert_relative_eq!(report.result.delta_v_km_s[2], 1e-6, max_relative = 1e-9);
        assert_relative_eq!(report.result.delta_v_mag_m_s, 1e-3, max_relative = 1e-9);
    }

    #[test]
    fn no_impulse_keeps_speed_and_energy_baseline() {
        let spec = DeflectionSpec {
            baseline_velocity_km_s: Some(12.0),
            ..Default::default()
        };
        let report = analyze_deflection(&eros(), JD, &spec, &EngineSettings::default()).unwrap();
        assert_eq!(report.mode, "none");
        assert_eq!(report.pre_speed_km_s, report.post_speed_km_s);
        let expected = impact_energy(report.asteroid_mass_kg, 12.0).unwrap();
        assert_eq!(report.energy_before_mt_tnt, expected.megatons_tnt);
    }
}
