//! Position of an object at an epoch, heliocentric or Earth-relative.

use log::debug;
use neo_config::ObjectRecord;
use neo_core::vector::Vector3;
use neo_frames::heliocentric_to_geocentric;
use neo_orbits::{Frame, StateVector};
use serde::Serialize;

use super::{AssessError, Encounter};

/// Which origin a report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFrame {
    Helio,
    #[default]
    Geo,
}

impl ReportFrame {
    pub(crate) fn select(&self, helio: &StateVector) -> Result<StateVector, AssessError> {
        Ok(match self {
            ReportFrame::Helio => *helio,
            ReportFrame::Geo => heliocentric_to_geocentric(helio)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateReport {
    pub object: String,
    pub frame: Frame,
    pub jd: f64,
    pub position_au: Vector3,
    pub distance_au: f64,
    pub velocity_km_s: Vector3,
    /// Earth's heliocentric position; only reported in the geocentric frame.
    pub earth_position_au: Option<Vector3>,
}

pub fn state_query(
    record: &ObjectRecord,
    jd: f64,
    frame: ReportFrame,
) -> Result<StateReport, AssessError> {
    let encounter = Encounter::at(record, jd)?;
    let state = frame.select(&encounter.object)?;
    debug!("{} at JD {jd} in {}", record.name, state.frame.as_str());
    Ok(StateReport {
        object: record.name.clone(),
        frame: state.frame,
        jd,
        position_au: state.position_au,
        distance_au: state.distance_au(),
        velocity_km_s: state.velocity_km_s(),
        earth_position_au: match frame {
            ReportFrame::Geo => Some(encounter.earth.position_au),
            ReportFrame::Helio => None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::fixtures::eros;
    use approx::assert_abs_diff_eq;
    use neo_core::vector;

    #[test]
    fn geo_state_is_helio_minus_earth() {
        let jd = 2_460_400.5;
        let helio = state_query(&eros(), jd, ReportFrame::Helio).unwrap();
        let geo = state_query(&eros(), jd, ReportFrame::Geo).unwrap();
        assert_eq!(helio.frame, Frame::HeliocentricEclipticJ2000);
        assert_eq!(geo.frame, Frame::GeocentricEclipticJ2000);
        assert!(helio.earth_position_au.is_none());

        let earth = geo.earth_position_au.unwrap();
        let rebuilt = vector::add(&geo.position_au, &earth);
        for k in 0..3 {
            assert_abs_diff_eq!(rebuilt[k], helio.position_au[k], epsilon = 1e-12);
        }
        assert_abs_diff_eq!(geo.distance_au, vector::norm(&geo.position_au));
    }

    #[test]
    fn eros_stays_between_perihelion_and_aphelion() {
        let (a, e) = (1.458, 0.2227);
        for k in 0..8 {
            let report = state_query(&eros(), 2_460_000.5 + 80.0 * k as f64, ReportFrame::Helio).unwrap();
            assert!(report.distance_au >= a * (1.0 - e) - 1e-9);
            assert!(report.distance_au <= a * (1.0 + e) + 1e-9);
        }
    }
}
