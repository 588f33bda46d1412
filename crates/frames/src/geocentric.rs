//! Heliocentric ↔ geocentric translation using the mean J2000 Earth orbit.

use neo_core::vector;
use neo_orbits::{EARTH_J2000, Frame, StateVector, propagate};

use crate::FrameError;

/// Earth's heliocentric state at `t_jd`.
pub fn earth_state(t_jd: f64) -> StateVector {
    propagate(&EARTH_J2000, t_jd)
}

/// Subtract Earth's heliocentric state at the same epoch. Axes stay ecliptic J2000.
pub fn heliocentric_to_geocentric(state: &StateVector) -> Result<StateVector, FrameError> {
    expect_frame(state, Frame::HeliocentricEclipticJ2000)?;
    let earth = earth_state(state.epoch_jd);
    Ok(StateVector {
        position_au: vector::sub(&state.position_au, &earth.position_au),
        velocity_au_day: vector::sub(&state.velocity_au_day, &earth.velocity_au_day),
        frame: Frame::GeocentricEclipticJ2000,
        epoch_jd: state.epoch_jd,
    })
}

pub fn geocentric_to_heliocentric(state: &StateVector) -> Result<StateVector, FrameError> {
    expect_frame(state, Frame::GeocentricEclipticJ2000)?;
    let earth = earth_state(state.epoch_jd);
    Ok(StateVector {
        position_au: vector::add(&state.position_au, &earth.position_au),
        velocity_au_day: vector::add(&state.velocity_au_day, &earth.velocity_au_day),
        frame: Frame::HeliocentricEclipticJ2000,
        epoch_jd: state.epoch_jd,
    })
}

fn expect_frame(state: &StateVector, expected: Frame) -> Result<(), FrameError> {
    if state.frame == expected {
        Ok(())
    } else {
        Err(FrameError::WrongFrame {
            expected: expected.as_str(),
            actual: state.frame.as_str(),
        })
    }
}
