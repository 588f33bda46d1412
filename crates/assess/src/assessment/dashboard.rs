//! Pre/post-deflection orbits, re-derived from the state at the impact epoch and sampled for
//! plotting.

use log::debug;
use neo_config::{EngineSettings, ObjectRecord};
use neo_core::vector::{self, Vector3};
use neo_deflection::DeflectionResult;
use neo_orbits::{
    Degeneracy, KeplerElements, OrbitSampleRequest, OrbitSamples, sample_orbit, state_to_elements,
};
use neo_physics::impact_energy;
use serde::Serialize;

use super::deflect::{DeflectionSpec, apply_deflection, mode_label};
use super::AssessError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashboardRequest {
    pub deflection: DeflectionSpec,
    /// Defaults to the settings' sample count.
    pub samples: Option<usize>,
    /// Defaults to the pre-deflection period.
    pub window_days: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitBundle {
    pub elements: KeplerElements,
    pub degeneracies: Vec<Degeneracy>,
    pub period_days: f64,
    pub positions: OrbitSamples,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyContext {
    pub mass_kg: f64,
    pub energy_old_mt_tnt: f64,
    pub energy_new_mt_tnt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub object: String,
    pub epoch_jd: f64,
    pub mode: &'static str,
    pub samples: usize,
    pub window_days: f64,
    pub deflection: DeflectionResult,
    pub pre_orbit: OrbitBundle,
    pub post_orbit: OrbitBundle,
    pub energy_context: EnergyContext,
}

fn bundle(
    position_au: &Vector3,
    velocity_km_s: &Vector3,
    epoch_jd: f64,
    request: &OrbitSampleRequest,
) -> Result<OrbitBundle, AssessError> {
    let conversion = state_to_elements(position_au, velocity_km_s, epoch_jd)?;
    Ok(OrbitBundle {
        period_days: conversion.elements.period_days(),
        positions: sample_orbit(&conversion.elements, request),
        elements: conversion.elements,
        degeneracies: conversion.degeneracies,
    })
}

/// Apply the deflection at `jd` and sample both resulting orbits in both frames.
pub fn deflection_dashboard(
    record: &ObjectRecord,
    jd: f64,
    request: &DashboardRequest,
    settings: &EngineSettings,
) -> Result<DashboardReport, AssessError> {
    let applied = apply_deflection(record, jd, &request.deflection, settings)?;
    let position = applied.encounter.object.position_au;
    let v_pre = applied.encounter.object_velocity_km_s();
    let v_post = applied.result.post_velocity_helio_km_s;

    let pre_elements = state_to_elements(&position, &v_pre, jd)?.elements;
    let window_days = match request.window_days {
        Some(w) if w.is_finite() && w > 0.0 => w,
        Some(w) => {
            return Err(AssessError::InvalidInput(format!(
                "window must be positive (got {w} days)"
            )));
        }
        None => pre_elements.period_days(),
    };
    let sample_request = OrbitSampleRequest {
        start_jd: jd,
        window_days,
        samples: request.samples.unwrap_or(settings.sample_count),
        include_helio: true,
        include_geo: true,
    };

    let pre_orbit = bundle(&position, &v_pre, jd, &sample_request)?;
    let post_orbit = bundle(&position, &v_post, jd, &sample_request)?;
    debug!(
        "{}: period {:.3} -> {:.3} days over a {window_days:.1}-day window",
        record.name, pre_orbit.period_days, post_orbit.period_days
    );

    let energy_old = impact_energy(applied.asteroid_mass_kg, applied.baseline_velocity_km_s)?;
    let energy_new = impact_energy(applied.asteroid_mass_kg, vector::norm(&v_post))?;

    Ok(DashboardReport {
        object: record.name.clone(),
        epoch_jd: jd,
        mode: mode_label(&request.deflection.mode),
        samples: pre_orbit.positions.t_jd.len(),
        window_days,
        deflection: applied.result,
        pre_orbit,
        post_orbit,
        energy_context: EnergyContext {
            mass_kg: applied.asteroid_mass_kg,
            energy_old_mt_tnt: energy_old.megatons_tnt,
            energy_new_mt_tnt: energy_new.megatons_tnt,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::fixtures::eros;
    use approx::assert_relative_eq;
    use neo_deflection::{DeflectionMode, PresetDirection};

    const JD: f64 = 2_460_200.5;

    #[test]
    fn without_deflection_both_orbits_match_the_catalog() {
        let report =
            deflection_dashboard(&eros(), JD, &DashboardRequest::default(), &EngineSettings::default())
                .unwrap();
        assert_eq!(report.mode, "none");
        assert_eq!(report.samples, 240);
        assert_eq!(report.pre_orbit, report.post_orbit);
        assert_relative_eq!(report.pre_orbit.elements.a_au, 1.458, max_relative = 1e-6);
        assert_relative_eq!(report.pre_orbit.elements.e, 0.2227, max_relative = 1e-5);
        assert_relative_eq!(report.window_days, report.pre_orbit.period_days);
        let positions = &report.pre_orbit.positions;
        assert_eq!(positions.helio_au.as_ref().unwrap().len(), 240);
        assert_eq!(positions.geo_au.as_ref().unwrap().len(), 240);
    }

    #[test]
    fn undeflected_samples_follow_the_catalog_orbit() {
        let record = eros();
        let catalog = record.elements.to_elements().unwrap();
        let request = DashboardRequest {
            samples: Some(24),
            ..Default::default()
        };
        let report = deflection_dashboard(&record, JD, &request, &EngineSettings::default()).unwrap();
        let positions = &report.pre_orbit.positions;
        let helio = positions.helio_au.as_ref().unwrap();
        assert_relative_eq!(report.pre_orbit.elements.i_deg, 10.83, epsilon = 1e-6);
        assert_relative_eq!(report.pre_orbit.elements.raan_deg, 304.3, epsilon = 1e-6);
        assert_relative_eq!(report.pre_orbit.elements.arg_periapsis_deg, 178.9, epsilon = 1e-5);
        for (t, sampled) in positions.t_jd.iter().zip(helio) {
            let expected = neo_orbits::propagate(&catalog, *t).position_au;
            // Residual is the Gaussian-constant vs. SI μ mismatch over one period.
            for k in 0..3 {
                assert!(
                    (sampled[k] - expected[k]).abs() < 1e-7,
                    "JD {t}: {sampled:?} vs {expected:?}"
                );
            }
        }
    }

    #[test]
    fn prograde_push_lengthens_the_period() {
        let request = DashboardRequest {
            deflection: DeflectionSpec {
                mode: DeflectionMode::Preset {
                    direction: PresetDirection::Prograde,
                    delta_v_m_s: 1.0,
                    impactor_mass_kg: None,
                },
                asteroid_mass_kg: Some(6.7e15),
                ..Default::default()
            },
            samples: Some(5_000),
            window_days: Some(30.0),
        };
        let report = deflection_dashboard(&eros(), JD, &request, &EngineSettings::default()).unwrap();
        assert_eq!(report.samples, 1_000);
        assert_eq!(report.window_days, 30.0);
        assert!(report.post_orbit.elements.a_au > report.pre_orbit.elements.a_au);
        assert!(report.post_orbit.period_days > report.pre_orbit.period_days);
        assert_eq!(report.pre_orbit.positions.t_jd[0], JD);
        assert_eq!(*report.pre_orbit.positions.t_jd.last().unwrap(), JD + 30.0);
    }

    #[test]
    fn non_positive_window_is_rejected() {
        let request = DashboardRequest {
            window_days: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            deflection_dashboard(&eros(), JD, &request, &EngineSettings::default()),
            Err(AssessError::InvalidInput(_))
        ));
    }
}
