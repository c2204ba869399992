//! Scale tables and log2 nearest-neighbour snapping

use crate::exposure::common::error::{MeterError, Result};

/// Full-stop f-numbers, including f/1.2.
pub const STANDARD_APERTURES: [f64; 12] = [
    1.0, 1.2, 1.4, 1.8, 2.0, 2.8, 4.0, 5.6, 8.0, 11.0, 16.0, 22.0,
];

/// Full-stop f-numbers without f/1.2.
pub const MINIMAL_APERTURES: [f64; 11] = [
    1.0, 1.4, 1.8, 2.0, 2.8, 4.0, 5.6, 8.0, 11.0, 16.0, 22.0,
];

/// Full-stop shutter speeds in seconds.
pub const STANDARD_SHUTTER_SPEEDS: [f64; 19] = [
    1.0 / 8000.0,
    1.0 / 4000.0,
    1.0 / 2000.0,
    1.0 / 1000.0,
    1.0 / 500.0,
    1.0 / 250.0,
    1.0 / 125.0,
    1.0 / 60.0,
    1.0 / 30.0,
    1.0 / 15.0,
    1.0 / 8.0,
    1.0 / 4.0,
    1.0 / 2.0,
    1.0,
    2.0,
    4.0,
    8.0,
    15.0,
    30.0,
];

/// An ascending table of canonical values that solved exposures snap to.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScale {
    values: Vec<f64>,
}

impl StandardScale {
    /// Builds a scale from strictly ascending, positive, finite values.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(MeterError::invalid_parameter("scale", "empty"));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v <= 0.0) {
            return Err(MeterError::invalid_parameter("scale entry", bad));
        }
        if values.windows(2).any(|w| w[0] >= w[1]) {
            return Err(MeterError::invalid_parameter("scale", "not strictly ascending"));
        }
        Ok(Self { values })
    }

    pub fn full_apertures() -> Self {
        Self { values: STANDARD_APERTURES.to_vec() }
    }

    pub fn minimal_apertures() -> Self {
        Self { values: MINIMAL_APERTURES.to_vec() }
    }

    pub fn shutter_speeds() -> Self {
        Self { values: STANDARD_SHUTTER_SPEEDS.to_vec() }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn contains(&self, value: f64) -> bool {
        self.values.contains(&value)
    }

    /// Snaps `value` to the entry closest in stops.
    pub fn nearest(&self, value: f64) -> Option<f64> {
        nearest_standard(value, &self.values)
    }
}

/// Returns the entry of `scale` with the smallest `|log2(entry) - log2(value)|`.
///
/// Exposure stops are uniform in log2, so linear distance would mis-snap at the
/// long end of either table. Exact ties go to the earlier entry. Returns `None`
/// for an empty scale or a value that is not positive and finite.
pub fn nearest_standard(value: f64, scale: &[f64]) -> Option<f64> {
    if !value.is_finite() || value <= 0.0 {
        return None;
    }
    let target = value.log2();
    let mut best: Option<(f64, f64)> = None;
    for &candidate in scale {
        let distance = (candidate.log2() - target).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(candidate, _)| candidate)
}
