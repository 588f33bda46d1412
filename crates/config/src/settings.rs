//! Overridable engine defaults.

use neo_core::constants::EARTH_RADIUS_KM;
use neo_physics::{DEFAULT_ALBEDO, DamageConstants};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Engine-wide defaults. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub damage: DamageConstants,
    /// Geometric albedo assumed for H → diameter
    pub albedo: f64,
    pub default_velocity_km_s: f64,
    pub earth_radius_km: f64,
    pub entry_alt_km: f64,
    pub sample_count: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            damage: DamageConstants::default(),
            albedo: DEFAULT_ALBEDO,
            default_velocity_km_s: 20.0,
            earth_radius_km: EARTH_RADIUS_KM,
            entry_alt_km: 0.0,
            sample_count: 240,
        }
    }
}

impl EngineSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("damage.light_km", self.damage.light_km),
            ("damage.moderate_km", self.damage.moderate_km),
            ("damage.severe_km", self.damage.severe_km),
            ("damage.crater_coeff_km", self.damage.crater_coeff_km),
            ("albedo", self.albedo),
            ("default_velocity_km_s", self.default_velocity_km_s),
            ("earth_radius_km", self.earth_radius_km),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidInput(format!(
                    "{name} must be positive (got {value})"
                )));
            }
        }
        if !(self.entry_alt_km.is_finite() && self.entry_alt_km >= 0.0) {
            return Err(ConfigError::InvalidInput(format!(
                "entry_alt_km must be non-negative (got {})",
                self.entry_alt_km
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_all_defaults() {
        let settings: EngineSettings = toml::from_str("").unwrap();
        assert_eq!(settings, EngineSettings::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn non_positive_albedo_is_rejected() {
        let settings = EngineSettings {
            albedo: 0.0,
            ..Default::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::InvalidInput(_))));
    }
}
