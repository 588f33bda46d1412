//! Where a straight-line geocentric path would meet the ground.

use neo_config::{EngineSettings, ObjectRecord};
use neo_core::constants::AU_KM;
use neo_core::vector;
use neo_frames::{GroundImpact, aim_at_center, heliocentric_to_geocentric, predict_ground_impact};
use serde::Serialize;

use super::{AssessError, Encounter, require_positive_opt};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AimMode {
    /// Use the object's actual geocentric velocity.
    #[default]
    Real,
    /// Redirect the velocity at Earth's centre, optionally at a different speed.
    AimEarth { speed_override_km_s: Option<f64> },
}

impl AimMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AimMode::Real => "real",
            AimMode::AimEarth { .. } => "aim_earth",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImpactPointRequest {
    pub mode: AimMode,
    /// Defaults to the settings' entry altitude.
    pub entry_alt_km: Option<f64>,
    /// Defaults to the settings' Earth radius.
    pub earth_radius_km: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactPointReport {
    pub object: String,
    pub mode: &'static str,
    pub jd_start: f64,
    pub earth_radius_km: f64,
    pub entry_alt_km: f64,
    pub speed_km_s_used: f64,
    pub result: GroundImpact,
}

pub fn impact_point(
    record: &ObjectRecord,
    jd: f64,
    request: &ImpactPointRequest,
    settings: &EngineSettings,
) -> Result<ImpactPointReport, AssessError> {
    let earth_radius_km = require_positive_opt("Earth radius", request.earth_radius_km)?
        .unwrap_or(settings.earth_radius_km);
    let entry_alt_km = match request.entry_alt_km {
        Some(alt) if !(alt.is_finite() && alt >= 0.0) => {
            return Err(AssessError::InvalidInput(format!(
                "entry altitude must be non-negative (got {alt} km)"
            )));
        }
        Some(alt) => alt,
        None => settings.entry_alt_km,
    };

    let encounter = Encounter::at(record, jd)?;
    let geo = heliocentric_to_geocentric(&encounter.object)?;
    let r0_km = vector::scale(&geo.position_au, AU_KM);
    let mut v0_km_s = geo.velocity_km_s();
    if let AimMode::AimEarth { speed_override_km_s } = request.mode {
        v0_km_s = aim_at_center(&r0_km, &v0_km_s, speed_override_km_s)?;
    }

    Ok(ImpactPointReport {
        object: record.name.clone(),
        mode: request.mode.as_str(),
        jd_start: jd,
        earth_radius_km,
        entry_alt_km,
        speed_km_s_used: vector::norm(&v0_km_s),
        result: predict_ground_impact(&r0_km, &v0_km_s, jd, earth_radius_km, entry_alt_km)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::fixtures::eros;
    use approx::assert_abs_diff_eq;

    const JD: f64 = 2_460_200.5;

    #[test]
    fn aimed_path_hits_at_entry_altitude() {
        let request = ImpactPointRequest {
            mode: AimMode::AimEarth {
                speed_override_km_s: Some(20.0),
            },
            entry_alt_km: Some(100.0),
            ..Default::default()
        };
        let report = impact_point(&eros(), JD, &request, &EngineSettings::default()).unwrap();
        assert_eq!(report.mode, "aim_earth");
        assert_abs_diff_eq!(report.speed_km_s_used, 20.0, epsilon = 1e-9);
        match report.result {
            GroundImpact::Hit(hit) => {
                assert_abs_diff_eq!(hit.point.alt_km, 100.0, epsilon = 1e-3);
                assert!(hit.time_to_impact_s > 0.0);
                assert!((-180.0..=180.0).contains(&hit.point.lon_deg));
            }
            GroundImpact::Miss(miss) => panic!("aimed path missed: {miss:?}"),
        }
    }

    #[test]
    fn real_path_far_from_earth_misses() {
        // Eros never comes within Earth radius; the straight line misses or lies in the past.
        let report =
            impact_point(&eros(), JD, &ImpactPointRequest::default(), &EngineSettings::default())
                .unwrap();
        assert_eq!(report.mode, "real");
        match report.result {
            GroundImpact::Miss(miss) => assert!(miss.range_min_km > 0.0),
            GroundImpact::Hit(hit) => panic!("unexpected hit: {hit:?}"),
        }
    }

    #[test]
    fn negative_entry_altitude_is_rejected() {
        let request = ImpactPointRequest {
            entry_alt_km: Some(-1.0),
            ..Default::default()
        };
        assert!(impact_point(&eros(), JD, &request, &EngineSettings::default()).is_err());
    }
}
