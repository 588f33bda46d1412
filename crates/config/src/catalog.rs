//! Object records as they appear in catalog files.

use neo_core::constants::J2000_JD;
use neo_orbits::KeplerElements;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Orbital elements as published by small-body databases. Everything is optional at parse time
/// so that a missing field surfaces as [`ConfigError::MissingElement`] rather than a parse error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub a: Option<f64>,
    pub e: Option<f64>,
    pub i: Option<f64>,
    pub om: Option<f64>,
    pub w: Option<f64>,
    #[serde(default)]
    pub ma: Option<f64>,
    #[serde(default)]
    pub epoch_jd: Option<f64>,
    /// Orbital period (days)
    #[serde(default)]
    pub per: Option<f64>,
}

impl ElementRecord {
    /// Validated elements. Mean anomaly defaults to 0° and epoch to J2000.
    pub fn to_elements(&self) -> Result<KeplerElements, ConfigError> {
        let a = require(self.a, "a")?;
        let e = require(self.e, "e")?;
        let i = require(self.i, "i")?;
        let om = require(self.om, "om")?;
        let w = require(self.w, "w")?;
        KeplerElements::new(
            a,
            e,
            i,
            om,
            w,
            self.ma.unwrap_or(0.0),
            self.epoch_jd.unwrap_or(J2000_JD),
        )
        .map_err(|err| ConfigError::InvalidInput(err.to_string()))
    }
}

fn require(value: Option<f64>, name: &'static str) -> Result<f64, ConfigError> {
    value.ok_or(ConfigError::MissingElement(name))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhysicalRecord {
    #[serde(default)]
    pub density_kg_m3: Option<f64>,
    #[serde(default)]
    pub diameter_km: Option<f64>,
    #[serde(default)]
    pub absolute_magnitude_h: Option<f64>,
    #[serde(default)]
    pub estimated_diameter_min_km: Option<f64>,
    #[serde(default)]
    pub estimated_diameter_max_km: Option<f64>,
}

/// Observed close approach.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApproachRecord {
    #[serde(default)]
    pub velocity_km_s: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub orbiting_body: Option<String>,
    #[serde(default)]
    pub miss_distance_km: Option<f64>,
    #[serde(default)]
    pub miss_distance_lunar: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub name: String,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub orbit_class: Option<String>,
    pub elements: ElementRecord,
    #[serde(default)]
    pub physical: PhysicalRecord,
    #[serde(default)]
    pub approach: Option<ApproachRecord>,
}

impl ObjectRecord {
    /// Case-insensitive match against the name or designation.
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        self.name.eq_ignore_ascii_case(key)
            || self
                .designation
                .as_deref()
                .is_some_and(|d| d.eq_ignore_ascii_case(key))
    }
}

/// A set of objects with unique names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    objects: Vec<ObjectRecord>,
}

impl Catalog {
    pub fn new(objects: Vec<ObjectRecord>) -> Result<Self, ConfigError> {
        for (idx, object) in objects.iter().enumerate() {
            if object.name.trim().is_empty() {
                return Err(ConfigError::InvalidInput(format!(
                    "catalog entry {idx} has an empty name"
                )));
            }
            if objects[..idx]
                .iter()
                .any(|other| other.name.eq_ignore_ascii_case(&object.name))
            {
                return Err(ConfigError::InvalidInput(format!(
                    "duplicate catalog entry '{}'",
                    object.name
                )));
            }
        }
        Ok(Self { objects })
    }

    pub fn objects(&self) -> &[ObjectRecord] {
        &self.objects
    }

    pub fn find(&self, key: &str) -> Result<&ObjectRecord, ConfigError> {
        self.objects
            .iter()
            .find(|o| o.matches(key))
            .ok_or_else(|| ConfigError::NotFound(key.to_string()))
    }
}
