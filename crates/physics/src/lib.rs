//! Impact physics: mass, kinetic energy, cratering, seismic equivalence, and damage radii.
//!
//! These are order-of-magnitude estimators for a spherical body striking the ground at the
//! given speed. Entry, ablation, and fragmentation are not modelled.

pub mod damage;
pub mod diameter;

pub use damage::{DamageAssessment, DamageConstants, DamageRadii, damage_radii};
pub use diameter::{DiameterProvenance, DiameterSource, ResolvedDiameter, resolve_diameter};

use std::f64::consts::PI;

use neo_core::constants::JOULES_PER_MEGATON;
use neo_core::units::{kms_to_ms, m_to_km};
use serde::Serialize;
use thiserror::Error;

/// Albedo assumed when converting absolute magnitude to diameter.
pub const DEFAULT_ALBEDO: f64 = 0.14;

#[derive(Debug, Error, PartialEq)]
pub enum PhysicsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("missing element: {0}")]
    MissingElement(String),
    #[error("domain error: {0}")]
    DomainError(String),
}

fn require_positive(name: &str, value: f64) -> Result<(), PhysicsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PhysicsError::InvalidInput(format!(
            "{name} must be positive (got {value})"
        )))
    }
}

/// Kinetic energy of an impact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactEnergy {
    pub joules: f64,
    pub megatons_tnt: f64,
}

/// Mass (kg) of a sphere of the given diameter (km) and bulk density (kg/m³).
pub fn mass_from_diameter(diameter_km: f64, density_kg_m3: f64) -> Result<f64, PhysicsError> {
    require_positive("diameter", diameter_km)?;
    require_positive("density", density_kg_m3)?;
    let radius_m = diameter_km * 500.0;
    Ok(density_kg_m3 * (4.0 / 3.0) * PI * radius_m.powi(3))
}

/// Kinetic energy for `mass_kg` moving at `velocity_km_s`.
pub fn impact_energy(mass_kg: f64, velocity_km_s: f64) -> Result<ImpactEnergy, PhysicsError> {
    require_positive("mass", mass_kg)?;
    require_positive("velocity", velocity_km_s)?;
    let v = kms_to_ms(velocity_km_s);
    let joules = 0.5 * mass_kg * v * v;
    Ok(ImpactEnergy {
        joules,
        megatons_tnt: joules / JOULES_PER_MEGATON,
    })
}

/// Approximate transient crater diameter (m) for an impact energy (J).
pub fn crater_diameter_m(energy_j: f64) -> Result<f64, PhysicsError> {
    require_positive("impact energy", energy_j)?;
    Ok(0.07 * energy_j.powf(0.25))
}

/// Rough moment-magnitude equivalent of an impact energy (J).
pub fn seismic_magnitude(energy_j: f64) -> Result<f64, PhysicsError> {
    if !(energy_j > 0.0) {
        return Err(PhysicsError::DomainError(format!(
            "log10 undefined for impact energy {energy_j} J"
        )));
    }
    Ok((2.0 / 3.0) * (energy_j.log10() - 4.8))
}

/// Diameter (km) from absolute magnitude `h` and geometric albedo.
pub fn diameter_from_absolute_magnitude(h: f64, albedo: f64) -> Result<f64, PhysicsError> {
    if !(albedo > 0.0) {
        return Err(PhysicsError::DomainError(format!(
            "albedo must be positive to take its square root (got {albedo})"
        )));
    }
    Ok(1329.0 / albedo.sqrt() * 10f64.powf(-h / 5.0))
}

/// Impact consequences derived from size, density, and speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhysicalProfile {
    pub diameter_km: f64,
    pub density_kg_m3: f64,
    pub mass_kg: f64,
    pub velocity_km_s: f64,
    pub energy_j: f64,
    pub energy_mt_tnt: f64,
    pub crater_diameter_km: f64,
    pub seismic_mw: f64,
}

impl PhysicalProfile {
    pub fn build(
        diameter_km: f64,
        density_kg_m3: f64,
        velocity_km_s: f64,
    ) -> Result<Self, PhysicsError> {
        let mass_kg = mass_from_diameter(diameter_km, density_kg_m3)?;
        let energy = impact_energy(mass_kg, velocity_km_s)?;
        Ok(Self {
            diameter_km,
            density_kg_m3,
            mass_kg,
            velocity_km_s,
            energy_j: energy.joules,
            energy_mt_tnt: energy.megatons_tnt,
            crater_diameter_km: m_to_km(crater_diameter_m(energy.joules)?),
            seismic_mw: seismic_magnitude(energy.joules)?,
        })
    }
}
