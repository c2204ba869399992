//! Calibration profile types

use crate::exposure::common::error::{MeterError, Result};

/// How a measured luminance maps onto the exposure scale for a given device.
///
/// `calibrated = luminance * luminance_scale * base_calibration_factor * device_brightness_compensation`
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationProfile {
    /// Preset name, for logs
    pub name: String,
    /// Base scene-to-sensor calibration constant
    pub base_calibration_factor: f64,
    /// Correction for the capture device's brightness response
    pub device_brightness_compensation: f64,
    /// Multiplier applied to relative luminance before calibration
    /// (100 maps `[0, 1]` onto a percentage; 1 uses luminance directly)
    pub luminance_scale: f64,
    /// Whether the sampler should overweight the middle of the frame
    pub center_weighted: bool,
    /// Weight of pixels inside the center region
    pub center_weight: f64,
    /// Weight of pixels outside the center region
    pub surround_weight: f64,
    /// Share of each frame dimension treated as the center region
    pub center_fraction: f64,
}

impl Default for CalibrationProfile {
    fn default() -> Self {
        Self::center_weighted()
    }
}

impl CalibrationProfile {
    /// Gamma-correct, center-weighted metering with the phone camera calibration.
    pub fn center_weighted() -> Self {
        Self {
            name: "center-weighted".to_string(),
            base_calibration_factor: 12.5,
            device_brightness_compensation: 1.2,
            luminance_scale: 100.0,
            center_weighted: true,
            center_weight: 0.6,
            surround_weight: 0.4,
            center_fraction: 0.4,
        }
    }

    /// Single-factor calibration on the plain frame average.
    pub fn simple() -> Self {
        Self {
            name: "simple".to_string(),
            base_calibration_factor: 1.2,
            device_brightness_compensation: 1.0,
            luminance_scale: 1.0,
            center_weighted: false,
            center_weight: 1.0,
            surround_weight: 1.0,
            center_fraction: 1.0,
        }
    }

    pub fn builder() -> CalibrationProfileBuilder {
        CalibrationProfileBuilder::default()
    }

    /// Combined calibration factor.
    pub fn calibration_factor(&self) -> f64 {
        self.base_calibration_factor * self.device_brightness_compensation
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(MeterError::invalid_parameter(name, value))
            }
        };
        positive("base_calibration_factor", self.base_calibration_factor)?;
        positive("device_brightness_compensation", self.device_brightness_compensation)?;
        positive("luminance_scale", self.luminance_scale)?;

        if self.center_weighted {
            check_center_weighting(self.center_fraction, self.center_weight, self.surround_weight)?;
        }
        Ok(())
    }
}

/// Builder for CalibrationProfile, starting from the center-weighted preset
#[derive(Default)]
pub struct CalibrationProfileBuilder {
    name: Option<String>,
    base_calibration_factor: Option<f64>,
    device_brightness_compensation: Option<f64>,
    luminance_scale: Option<f64>,
    center_weighted: Option<bool>,
    center_weight: Option<f64>,
    surround_weight: Option<f64>,
    center_fraction: Option<f64>,
}

impl CalibrationProfileBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn base_calibration_factor(mut self, factor: f64) -> Self {
        self.base_calibration_factor = Some(factor);
        self
    }

    pub fn device_brightness_compensation(mut self, compensation: f64) -> Self {
        self.device_brightness_compensation = Some(compensation);
        self
    }

    pub fn luminance_scale(mut self, scale: f64) -> Self {
        self.luminance_scale = Some(scale);
        self
    }

    pub fn center_weighted(mut self, enable: bool) -> Self {
        self.center_weighted = Some(enable);
        self
    }

    pub fn center_weight(mut self, weight: f64) -> Self {
        self.center_weight = Some(weight);
        self
    }

    pub fn surround_weight(mut self, weight: f64) -> Self {
        self.surround_weight = Some(weight);
        self
    }

    pub fn center_fraction(mut self, fraction: f64) -> Self {
        self.center_fraction = Some(fraction);
        self
    }

    pub fn build(self) -> CalibrationProfile {
        let default = CalibrationProfile::default();
        CalibrationProfile {
            name: self.name.unwrap_or_else(|| "custom".to_string()),
            base_calibration_factor: self.base_calibration_factor.unwrap_or(default.base_calibration_factor),
            device_brightness_compensation: self
                .device_brightness_compensation
                .unwrap_or(default.device_brightness_compensation),
            luminance_scale: self.luminance_scale.unwrap_or(default.luminance_scale),
            center_weighted: self.center_weighted.unwrap_or(default.center_weighted),
            center_weight: self.center_weight.unwrap_or(default.center_weight),
            surround_weight: self.surround_weight.unwrap_or(default.surround_weight),
            center_fraction: self.center_fraction.unwrap_or(default.center_fraction),
        }
    }
}

/// Center weights must give every frame a positive total weight: the center
/// weight is positive, the surround weight non-negative and the center
/// fraction in (0, 1].
pub(crate) fn check_center_weighting(
    fraction: f64,
    center_weight: f64,
    surround_weight: f64,
) -> Result<()> {
    if !(center_weight.is_finite() && center_weight > 0.0) {
        return Err(MeterError::invalid_parameter("center_weight", center_weight));
    }
    if !(fraction.is_finite() && fraction > 0.0 && fraction <= 1.0) {
        return Err(MeterError::invalid_parameter("center_fraction", fraction));
    }
    if !(surround_weight.is_finite() && surround_weight >= 0.0) {
        return Err(MeterError::invalid_parameter("surround_weight", surround_weight));
    }
    Ok(())
}
