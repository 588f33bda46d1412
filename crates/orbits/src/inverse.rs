//! Heliocentric state vector → classical elements (the inverse of [`crate::propagate`]).

use log::warn;
use neo_core::angle::normalize_rad_to_deg;
use neo_core::constants::{AU_M, MU_SUN_M3_S2};
use neo_core::units::kms_to_ms;
use neo_core::vector::{self, Vector3};
use serde::Serialize;

use crate::OrbitError;
use crate::elements::KeplerElements;

/// Node-vector magnitude below which the orbit is treated as equatorial.
const NODE_EPSILON: f64 = 1e-12;
/// Eccentricity below which the orbit is treated as circular. Sits above the ~2e-10 noise left by
/// the Gaussian-constant vs. SI μ mismatch on an exactly circular input.
const ECCENTRICITY_EPSILON: f64 = 1e-8;

/// Documented fallbacks applied when an angle is undefined for the given geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Degeneracy {
    /// Node vector vanishes (near-zero inclination); Ω reported as 0.
    EquatorialNode,
    /// Periapsis undefined (equatorial or near-circular orbit); ω reported as 0.
    UndefinedPeriapsis,
}

/// Elements recovered from a state vector, plus any fallback angles used to get them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementConversion {
    pub elements: KeplerElements,
    pub degeneracies: Vec<Degeneracy>,
}

impl ElementConversion {
    pub fn is_degenerate(&self) -> bool {
        !self.degeneracies.is_empty()
    }
}

/// Convert a heliocentric position (AU) and velocity (km/s) at `epoch_jd` into elements.
///
/// Assumes a bound orbit; a non-negative specific energy is rejected. For equatorial or
/// circular geometries Ω and/or ω fall back to 0 and the fallback is listed in
/// [`ElementConversion::degeneracies`]; this is an approximation, not corrected further.
pub fn state_to_elements(
    position_au: &Vector3,
    velocity_km_s: &Vector3,
    epoch_jd: f64,
) -> Result<ElementConversion, OrbitError> {
    let mu = MU_SUN_M3_S2;
    let r_vec = vector::scale(position_au, AU_M);
    let v_vec = vector::scale(velocity_km_s, kms_to_ms(1.0));

    let r = vector::norm(&r_vec);
    if r <= 0.0 {
        return Err(OrbitError::InvalidInput(
            "position vector must be non-zero".to_string(),
        ));
    }
    let v2 = vector::dot(&v_vec, &v_vec);

    let h = vector::cross(&r_vec, &v_vec);
    let h_norm = vector::norm(&h);
    if h_norm <= 0.0 {
        return Err(OrbitError::InvalidInput(
            "rectilinear state has no angular momentum".to_string(),
        ));
    }
    let inclination = (h[2] / h_norm).clamp(-1.0, 1.0).acos();

    let node = vector::cross(&[0.0, 0.0, 1.0], &h);
    let node_norm = vector::norm(&node);

    let e_vec = vector::sub(
        &vector::scale(&vector::cross(&v_vec, &h), 1.0 / mu),
        &vector::scale(&r_vec, 1.0 / r),
    );
    let e = vector::norm(&e_vec);

    let energy = 0.5 * v2 - mu / r;
    if energy >= 0.0 {
        return Err(OrbitError::InvalidInput(format!(
            "state is unbound (specific energy {energy:.3e} J/kg, e = {e:.6})"
        )));
    }
    let a = -mu / (2.0 * energy);
    if e >= 1.0 {
        return Err(OrbitError::InvalidInput(format!(
            "eccentricity {e} is not elliptic"
        )));
    }

    let mut degeneracies = Vec::new();

    // Relative to |h| so the threshold is scale-free in SI units.
    let equatorial = node_norm <= NODE_EPSILON * h_norm;
    let raan = if equatorial {
        degeneracies.push(Degeneracy::EquatorialNode);
        0.0
    } else {
        node[1].atan2(node[0])
    };

    let arg_periapsis = if !equatorial && e > ECCENTRICITY_EPSILON {
        let cos_w = (vector::dot(&node, &e_vec) / (node_norm * e)).clamp(-1.0, 1.0);
        // n × e = |n| e sin ω ĥ
        let sin_w = vector::dot(&vector::cross(&node, &e_vec), &h) / (node_norm * e * h_norm);
        sin_w.atan2(cos_w)
    } else {
        degeneracies.push(Degeneracy::UndefinedPeriapsis);
        0.0
    };

    let ecc_anomaly = (vector::dot(&r_vec, &v_vec) / (mu * a).sqrt()).atan2(1.0 - r / a);
    let mean_anomaly = ecc_anomaly - e * ecc_anomaly.sin();

    if !degeneracies.is_empty() {
        warn!(
            "degenerate geometry at JD {epoch_jd}: {:?} (i = {:.3e} deg, e = {e:.3e}); fallback angles set to 0",
            degeneracies,
            inclination.to_degrees()
        );
    }

    Ok(ElementConversion {
        elements: KeplerElements {
            a_au: a / AU_M,
            e,
            i_deg: normalize_rad_to_deg(inclination),
            raan_deg: normalize_rad_to_deg(raan),
            arg_periapsis_deg: normalize_rad_to_deg(arg_periapsis),
            mean_anomaly_deg: normalize_rad_to_deg(mean_anomaly),
            epoch_jd,
        },
        degeneracies,
    })
}
