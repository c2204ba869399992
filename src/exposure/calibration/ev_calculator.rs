use tracing::debug;
use crate::exposure::calibration::types::CalibrationProfile;
use crate::exposure::common::error::{MeterError, Result};
use crate::exposure::luminance::Luminance;

/// Shadow floor, keeps `log2` away from zero.
pub const MIN_LUMINANCE: f64 = 0.001;
/// Highlight ceiling, blown-out frames stop raising the reading here.
pub const MAX_LUMINANCE: f64 = 0.95;

/// Converts relative luminance to an exposure value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvCalculator {
    luminance_scale: f64,
    calibration_factor: f64,
}

impl EvCalculator {
    pub fn new(profile: &CalibrationProfile) -> Self {
        Self {
            luminance_scale: profile.luminance_scale,
            calibration_factor: profile.calibration_factor(),
        }
    }

    pub fn calibration_factor(&self) -> f64 {
        self.calibration_factor
    }

    /// EV of a single luminance sample.
    ///
    /// Only the input is clamped; the resulting EV is unbounded and may be
    /// negative for dark scenes.
    pub fn compute_ev(&self, luminance: Luminance) -> f64 {
        let clamped = luminance.value().clamp(MIN_LUMINANCE, MAX_LUMINANCE);
        let calibrated = clamped * self.luminance_scale * self.calibration_factor;
        calibrated.log2()
    }

    /// Arithmetic mean of the per-sample EVs.
    pub fn average_ev(&self, samples: &[Luminance]) -> Result<f64> {
        if samples.is_empty() {
            return Err(MeterError::NotReady("no luminance samples".to_string()));
        }
        let total: f64 = samples.iter().map(|&l| self.compute_ev(l)).sum();
        let ev = total / samples.len() as f64;
        debug!(samples = samples.len(), ev, "Averaged exposure value");
        Ok(ev)
    }
}
