//! Evenly spaced trajectory sampling for plotting.

use neo_core::vector::{self, Vector3};
use serde::Serialize;

use crate::bodies::EARTH_J2000;
use crate::elements::KeplerElements;
use crate::kepler::propagate;

pub const MIN_SAMPLES: usize = 2;
pub const MAX_SAMPLES: usize = 1_000;

/// What to sample and which frames to emit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitSampleRequest {
    pub start_jd: f64,
    pub window_days: f64,
    /// Clamped to `[MIN_SAMPLES, MAX_SAMPLES]`.
    pub samples: usize,
    pub include_helio: bool,
    pub include_geo: bool,
}

/// Sampled epochs and positions (AU). A frame that was not requested is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitSamples {
    pub t_jd: Vec<f64>,
    pub helio_au: Option<Vec<Vector3>>,
    pub geo_au: Option<Vec<Vector3>>,
}

/// Restartable iterator over `count` evenly spaced epochs covering `[start, start + window]`.
#[derive(Debug, Clone)]
pub struct EpochGrid {
    start_jd: f64,
    window_days: f64,
    count: usize,
    index: usize,
}

impl EpochGrid {
    pub fn new(start_jd: f64, window_days: f64, samples: usize) -> Self {
        Self {
            start_jd,
            window_days,
            count: samples.clamp(MIN_SAMPLES, MAX_SAMPLES),
            index: 0,
        }
    }
}

impl Iterator for EpochGrid {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.index >= self.count {
            return None;
        }
        let i = self.index;
        self.index += 1;
        // Pin the last sample so the window end is reproduced exactly.
        if i + 1 == self.count {
            return Some(self.start_jd + self.window_days);
        }
        Some(self.start_jd + self.window_days * i as f64 / (self.count - 1) as f64)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for EpochGrid {}

/// Propagate `elements` across the requested window.
pub fn sample_orbit(elements: &KeplerElements, request: &OrbitSampleRequest) -> OrbitSamples {
    let grid = EpochGrid::new(request.start_jd, request.window_days, request.samples);
    let mut t_jd = Vec::with_capacity(grid.len());
    let mut helio = Vec::with_capacity(if request.include_helio { grid.len() } else { 0 });
    let mut geo = Vec::with_capacity(if request.include_geo { grid.len() } else { 0 });

    for t in grid {
        let r = propagate(elements, t).position_au;
        if request.include_helio {
            helio.push(r);
        }
        if request.include_geo {
            let earth = propagate(&EARTH_J2000, t).position_au;
            geo.push(vector::sub(&r, &earth));
        }
        t_jd.push(t);
    }

    OrbitSamples {
        t_jd,
        helio_au: request.include_helio.then_some(helio),
        geo_au: request.include_geo.then_some(geo),
    }
}
