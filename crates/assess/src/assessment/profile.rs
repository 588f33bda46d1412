//! Impact profile: size, density, and speed resolved with provenance, then impact energetics.

use log::debug;
use neo_config::{ApproachRecord, EngineSettings, ObjectRecord};
use neo_physics::{DiameterProvenance, DiameterSource, PhysicalProfile, resolve_diameter};
use serde::Serialize;

use super::{AssessError, require_positive_opt};

/// Bulk density assumed for near-Earth orbit classes (kg/m³).
pub const NEAR_EARTH_DENSITY_KG_M3: f64 = 3000.0;
/// Bulk density assumed for everything else (kg/m³).
pub const DEFAULT_DENSITY_KG_M3: f64 = 2000.0;

const NEAR_EARTH_CLASS_PREFIXES: [&str; 3] = ["AMO", "APO", "ATE"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DensitySource {
    Catalog,
    OrbitClassDefault { orbit_class: Option<String> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocitySource {
    Override,
    CloseApproach,
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactProfile {
    pub object: String,
    pub designation: Option<String>,
    pub orbit_class: Option<String>,
    pub physical: PhysicalProfile,
    pub diameter_source: DiameterProvenance,
    pub density_source: DensitySource,
    pub velocity_source: VelocitySource,
    pub approach: Option<ApproachRecord>,
}

/// Catalog density, else a class-based default.
pub fn resolve_density(record: &ObjectRecord) -> (f64, DensitySource) {
    if let Some(rho) = record.physical.density_kg_m3.filter(|rho| *rho > 0.0) {
        return (rho, DensitySource::Catalog);
    }
    let near_earth = record.orbit_class.as_deref().is_some_and(|class| {
        let upper = class.trim().to_ascii_uppercase();
        NEAR_EARTH_CLASS_PREFIXES
            .iter()
            .any(|prefix| upper.starts_with(prefix))
    });
    let rho = if near_earth {
        NEAR_EARTH_DENSITY_KG_M3
    } else {
        DEFAULT_DENSITY_KG_M3
    };
    (
        rho,
        DensitySource::OrbitClassDefault {
            orbit_class: record.orbit_class.clone(),
        },
    )
}

/// Explicit override, else the observed close-approach speed, else the settings default.
pub fn resolve_velocity(
    record: &ObjectRecord,
    velocity_override_km_s: Option<f64>,
    settings: &EngineSettings,
) -> Result<(f64, VelocitySource), AssessError> {
    if let Some(v) = require_positive_opt("velocity override", velocity_override_km_s)? {
        return Ok((v, VelocitySource::Override));
    }
    let observed = record
        .approach
        .as_ref()
        .and_then(|approach| approach.velocity_km_s)
        .filter(|v| *v > 0.0);
    Ok(match observed {
        Some(v) => (v, VelocitySource::CloseApproach),
        None => (settings.default_velocity_km_s, VelocitySource::Default),
    })
}

/// Diameter, density, and speed for `record`, with the resulting energetics.
pub fn build_impact_profile(
    record: &ObjectRecord,
    velocity_override_km_s: Option<f64>,
    settings: &EngineSettings,
) -> Result<ImpactProfile, AssessError> {
    let physical = &record.physical;
    let diameter = resolve_diameter(&[
        DiameterSource::Catalog(physical.diameter_km),
        DiameterSource::MeanEstimate {
            min_km: physical.estimated_diameter_min_km,
            max_km: physical.estimated_diameter_max_km,
        },
        DiameterSource::AbsoluteMagnitude {
            h: physical.absolute_magnitude_h,
            albedo: settings.albedo,
        },
    ])?;
    let (density, density_source) = resolve_density(record);
    let (velocity, velocity_source) = resolve_velocity(record, velocity_override_km_s, settings)?;
    debug!(
        "{}: d = {:.4} km, rho = {density} kg/m3, v = {velocity} km/s ({velocity_source:?})",
        record.name, diameter.diameter_km
    );

    Ok(ImpactProfile {
        object: record.name.clone(),
        designation: record.designation.clone(),
        orbit_class: record.orbit_class.clone(),
        physical: PhysicalProfile::build(diameter.diameter_km, density, velocity)?,
        diameter_source: diameter.provenance,
        density_source,
        velocity_source,
        approach: record.approach.clone(),
    })
}
