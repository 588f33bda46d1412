//! Ordered diameter providers: the first source that yields a value wins, and the winner is
//! recorded as provenance.

use log::debug;
use serde::Serialize;

use crate::{PhysicsError, diameter_from_absolute_magnitude, require_positive};

/// One way of obtaining a diameter. Sources whose inputs are absent are skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiameterSource {
    /// Diameter published in the catalog (km).
    Catalog(Option<f64>),
    /// Mean of a min/max size estimate (km).
    MeanEstimate { min_km: Option<f64>, max_km: Option<f64> },
    /// Derived from absolute magnitude with an assumed albedo.
    AbsoluteMagnitude { h: Option<f64>, albedo: f64 },
}

/// Where a resolved diameter came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DiameterProvenance {
    Catalog,
    MeanEstimate,
    AbsoluteMagnitude { h: f64, albedo: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedDiameter {
    pub diameter_km: f64,
    pub provenance: DiameterProvenance,
}

impl DiameterSource {
    /// `Ok(None)` when this source has nothing to offer.
    pub fn estimate(&self) -> Result<Option<ResolvedDiameter>, PhysicsError> {
        let resolved = match *self {
            DiameterSource::Catalog(Some(d)) => {
                require_positive("catalog diameter", d)?;
                Some(ResolvedDiameter {
                    diameter_km: d,
                    provenance: DiameterProvenance::Catalog,
                })
            }
            DiameterSource::MeanEstimate {
                min_km: Some(min),
                max_km: Some(max),
            } => {
                let mean = 0.5 * (min + max);
                require_positive("mean diameter estimate", mean)?;
                Some(ResolvedDiameter {
                    diameter_km: mean,
                    provenance: DiameterProvenance::MeanEstimate,
                })
            }
            DiameterSource::AbsoluteMagnitude { h: Some(h), albedo } => Some(ResolvedDiameter {
                diameter_km: diameter_from_absolute_magnitude(h, albedo)?,
                provenance: DiameterProvenance::AbsoluteMagnitude { h, albedo },
            }),
            _ => None,
        };
        Ok(resolved)
    }
}

/// Evaluate `sources` in order and return the first diameter found.
pub fn resolve_diameter(sources: &[DiameterSource]) -> Result<ResolvedDiameter, PhysicsError> {
    for source in sources {
        if let Some(resolved) = source.estimate()? {
            debug!(
                "diameter {:.4} km from {:?}",
                resolved.diameter_km, resolved.provenance
            );
            return Ok(resolved);
        }
    }
    Err(PhysicsError::MissingElement(
        "diameter (no catalog value, size estimate, or absolute magnitude)".to_string(),
    ))
}
