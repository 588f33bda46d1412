//! Fixed reference bodies.

use neo_core::constants::J2000_JD;

use crate::elements::KeplerElements;

/// Mean J2000 elements for Earth, adequate for visualization and geocentric translation.
pub const EARTH_J2000: KeplerElements = KeplerElements {
    a_au: 1.000_000_11,
    e: 0.016_710_22,
    i_deg: 0.000_05,
    raan_deg: -11.260_64,
    arg_periapsis_deg: 102.947_19,
    mean_anomaly_deg: 100.464_35,
    epoch_jd: J2000_JD,
};
