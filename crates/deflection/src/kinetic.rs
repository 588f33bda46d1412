//! Velocity change from a kinetic impact.

use std::fmt;
use std::str::FromStr;

use log::debug;
use neo_core::units::ms_to_kms;
use neo_core::vector::{self, Vector3};
use serde::Serialize;

use crate::DeflectionError;
use crate::effects::{OrbitEffect, orbit_effect};

/// Canonical push directions, defined from the heliocentric state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetDirection {
    Prograde,
    Retrograde,
    RadialOut,
    RadialIn,
    NormalPlus,
    NormalMinus,
}

impl PresetDirection {
    pub const ALL: [PresetDirection; 6] = [
        PresetDirection::Prograde,
        PresetDirection::Retrograde,
        PresetDirection::RadialOut,
        PresetDirection::RadialIn,
        PresetDirection::NormalPlus,
        PresetDirection::NormalMinus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetDirection::Prograde => "prograde",
            PresetDirection::Retrograde => "retrograde",
            PresetDirection::RadialOut => "radial_out",
            PresetDirection::RadialIn => "radial_in",
            PresetDirection::NormalPlus => "normal_plus",
            PresetDirection::NormalMinus => "normal_minus",
        }
    }

    /// Unit vector for this direction given a heliocentric position and velocity.
    pub fn unit_vector(&self, position_helio: &Vector3, velocity_helio: &Vector3) -> Vector3 {
        let v_hat = vector::unit(velocity_helio);
        let r_hat = vector::unit(position_helio);
        let h_hat = vector::unit(&vector::cross(position_helio, velocity_helio));
        match self {
            PresetDirection::Prograde => v_hat,
            PresetDirection::Retrograde => vector::scale(&v_hat, -1.0),
            PresetDirection::RadialOut => r_hat,
            PresetDirection::RadialIn => vector::scale(&r_hat, -1.0),
            PresetDirection::NormalPlus => h_hat,
            PresetDirection::NormalMinus => vector::scale(&h_hat, -1.0),
        }
    }
}

impl fmt::Display for PresetDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetDirection {
    type Err = DeflectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prograde" => Ok(PresetDirection::Prograde),
            "retrograde" => Ok(PresetDirection::Retrograde),
            "radial_out" => Ok(PresetDirection::RadialOut),
            "radial_in" => Ok(PresetDirection::RadialIn),
            "normal_plus" | "normal" => Ok(PresetDirection::NormalPlus),
            "normal_minus" => Ok(PresetDirection::NormalMinus),
            other => Err(DeflectionError::UnknownDirection(other.to_string())),
        }
    }
}

/// Δv and resulting velocity of a vector-mode impact (km/s).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpulseVector {
    pub delta_v_km_s: Vector3,
    pub post_velocity_km_s: Vector3,
}

fn require_positive(name: &str, value: f64) -> Result<(), DeflectionError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DeflectionError::InvalidInput(format!(
            "{name} must be positive (got {value})"
        )))
    }
}

/// Momentum transfer `Δv = β (m_imp / m_ast) (v_int − v_met)`.
pub fn kinetic_impulse(
    impactor_velocity_km_s: &Vector3,
    target_velocity_km_s: &Vector3,
    asteroid_mass_kg: f64,
    impactor_mass_kg: f64,
    beta: f64,
) -> Result<ImpulseVector, DeflectionError> {
    require_positive("asteroid mass", asteroid_mass_kg)?;
    require_positive("impactor mass", impactor_mass_kg)?;
    require_positive("beta", beta)?;
    let closing = vector::sub(impactor_velocity_km_s, target_velocity_km_s);
    let delta_v = vector::scale(&closing, beta * (impactor_mass_kg / asteroid_mass_kg));
    Ok(ImpulseVector {
        delta_v_km_s: delta_v,
        post_velocity_km_s: vector::add(target_velocity_km_s, &delta_v),
    })
}

/// Closing speed (km/s) an impactor would need to deliver `|Δv|`.
pub fn implied_closing_speed(
    delta_v_km_s: f64,
    beta: f64,
    impactor_mass_kg: f64,
    asteroid_mass_kg: f64,
) -> Result<f64, DeflectionError> {
    require_positive("beta", beta)?;
    require_positive("impactor mass", impactor_mass_kg)?;
    require_positive("asteroid mass", asteroid_mass_kg)?;
    Ok(delta_v_km_s / (beta * (impactor_mass_kg / asteroid_mass_kg)))
}

/// The target at the moment of impact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetState {
    pub position_helio_au: Vector3,
    pub velocity_helio_km_s: Vector3,
    /// Velocity in the frame the caller works in (heliocentric or geocentric).
    pub velocity_frame_km_s: Vector3,
    pub semi_major_axis_au: f64,
    /// Catalog period if known; otherwise derived from `a`.
    pub period_days: Option<f64>,
}

/// How Δv is specified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeflectionMode {
    /// Impactor velocity in the caller's frame.
    Vector {
        impactor_velocity_km_s: Vector3,
        impactor_mass_kg: f64,
    },
    /// Push along a canonical direction. An impactor mass only adds the implied closing speed.
    Preset {
        direction: PresetDirection,
        delta_v_m_s: f64,
        impactor_mass_kg: Option<f64>,
    },
    /// No deflection; Δv = 0.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeflectionRequest {
    pub mode: DeflectionMode,
    pub asteroid_mass_kg: f64,
    pub beta: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PresetMeta {
    pub direction: PresetDirection,
    pub direction_unit: Vector3,
    pub delta_v_m_s: f64,
    pub implied_closing_speed_km_s: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeflectionResult {
    pub delta_v_km_s: Vector3,
    pub delta_v_mag_m_s: f64,
    pub pre_velocity_km_s: Vector3,
    pub post_velocity_km_s: Vector3,
    /// Heliocentric velocity after the impulse (Δv is invariant under frame translation).
    pub post_velocity_helio_km_s: Vector3,
    pub preset: Option<PresetMeta>,
    pub orbit_effect: OrbitEffect,
}

impl DeflectionResult {
    pub fn delta_a_frac(&self) -> f64 {
        self.orbit_effect.delta_a_frac
    }

    pub fn delta_p_frac(&self) -> f64 {
        self.orbit_effect.delta_p_frac
    }
}

/// Compute Δv for `request` against `target` and its first-order orbital consequence.
pub fn deflect(
    target: &TargetState,
    request: &DeflectionRequest,
) -> Result<DeflectionResult, DeflectionError> {
    require_positive("asteroid mass", request.asteroid_mass_kg)?;
    require_positive("beta", request.beta)?;

    let (delta_v, preset) = match request.mode {
        DeflectionMode::Vector {
            impactor_velocity_km_s,
            impactor_mass_kg,
        } => {
            let impulse = kinetic_impulse(
                &impactor_velocity_km_s,
                &target.velocity_frame_km_s,
                request.asteroid_mass_kg,
                impactor_mass_kg,
                request.beta,
            )?;
            (impulse.delta_v_km_s, None)
        }
        DeflectionMode::Preset {
            direction,
            delta_v_m_s,
            impactor_mass_kg,
        } => {
            require_positive("preset delta-v", delta_v_m_s)?;
            let magnitude_km_s = ms_to_kms(delta_v_m_s);
            let unit =
                direction.unit_vector(&target.position_helio_au, &target.velocity_helio_km_s);
            let implied = impactor_mass_kg
                .map(|m_imp| {
                    implied_closing_speed(magnitude_km_s, request.beta, m_imp, request.asteroid_mass_kg)
                })
                .transpose()?;
            (
                vector::scale(&unit, magnitude_km_s),
                Some(PresetMeta {
                    direction,
                    direction_unit: unit,
                    delta_v_m_s,
                    implied_closing_speed_km_s: implied,
                }),
            )
        }
        DeflectionMode::None => (vector::ZERO, None),
    };

    let effect = orbit_effect(
        &delta_v,
        &target.velocity_helio_km_s,
        target.semi_major_axis_au,
        target.period_days,
    )?;
    debug!(
        "deflection |dv| = {:.6} m/s, da/a = {:.3e}",
        vector::norm(&delta_v) * 1_000.0,
        effect.delta_a_frac
    );

    Ok(DeflectionResult {
        delta_v_km_s: delta_v,
        delta_v_mag_m_s: vector::norm(&delta_v) * 1_000.0,
        pre_velocity_km_s: target.velocity_frame_km_s,
        post_velocity_km_s: vector::add(&target.velocity_frame_km_s, &delta_v),
        post_velocity_helio_km_s: vector::add(&target.velocity_helio_km_s, &delta_v),
        preset,
        orbit_effect: effect,
    })
}
