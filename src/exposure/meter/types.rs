//! Meter configuration and state types

use crate::exposure::calibration::CalibrationProfile;
use crate::exposure::common::error::{MeterError, Result};
use crate::exposure::scales::StandardScale;
use crate::exposure::solver::{ExposureLimits, ExposureSettings, PriorityMode};

/// Default pixel budget per measurement, one 3840x2160 frame.
pub const DEFAULT_MAX_PIXELS: usize = 3840 * 2160;

/// Default bound on exposure compensation, in stops either way.
pub const DEFAULT_MAX_COMPENSATION: f64 = 3.0;

/// The user-facing exposure parameters
///
/// `aperture` and `shutter` hold the last value the user chose or the last
/// valid solve produced, whichever came later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterState {
    pub mode: PriorityMode,
    pub iso: f64,
    pub compensation: f64,
    pub aperture: f64,
    /// Seconds
    pub shutter: f64,
}

impl Default for MeterState {
    fn default() -> Self {
        Self {
            mode: PriorityMode::AperturePriority,
            iso: 100.0,
            compensation: 0.0,
            aperture: 5.6,
            shutter: 1.0 / 125.0,
        }
    }
}

/// A published meter reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureReading {
    pub ev: f64,
    pub iso: f64,
    pub compensation: f64,
    pub mode: PriorityMode,
    pub settings: ExposureSettings,
}

/// Configuration for a LightMeter
#[derive(Debug, Clone)]
pub struct MeterConfig {
    /// Luminance to EV calibration and metering pattern
    pub calibration: CalibrationProfile,
    /// Apertures solved values snap to
    pub aperture_scale: StandardScale,
    /// Shutter speeds solved values snap to
    pub shutter_scale: StandardScale,
    /// Physical range of the solved parameter
    pub limits: ExposureLimits,
    /// Largest frame, in pixels, a measurement accepts. `None` disables the check
    pub max_pixels: Option<usize>,
    /// Largest accepted exposure compensation magnitude
    pub max_compensation: f64,
    /// Parameters the meter starts with
    pub initial_state: MeterState,
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            calibration: CalibrationProfile::default(),
            aperture_scale: StandardScale::full_apertures(),
            shutter_scale: StandardScale::shutter_speeds(),
            limits: ExposureLimits::default(),
            max_pixels: Some(DEFAULT_MAX_PIXELS),
            max_compensation: DEFAULT_MAX_COMPENSATION,
            initial_state: MeterState::default(),
        }
    }
}

impl MeterConfig {
    pub fn builder() -> MeterConfigBuilder {
        MeterConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        self.calibration.validate()?;
        if !self.max_compensation.is_finite() || self.max_compensation < 0.0 {
            return Err(MeterError::invalid_parameter("max_compensation", self.max_compensation));
        }
        if self.max_pixels == Some(0) {
            return Err(MeterError::invalid_parameter("max_pixels", 0));
        }
        let state = &self.initial_state;
        self.check_iso(state.iso)?;
        self.check_compensation(state.compensation)?;
        self.check_aperture(state.aperture)?;
        self.check_shutter(state.shutter)?;
        Ok(())
    }

    pub(crate) fn check_iso(&self, iso: f64) -> Result<()> {
        if iso.is_finite() && iso > 0.0 {
            Ok(())
        } else {
            Err(MeterError::invalid_parameter("iso", iso))
        }
    }

    pub(crate) fn check_compensation(&self, compensation: f64) -> Result<()> {
        if compensation.is_finite() && compensation.abs() <= self.max_compensation {
            Ok(())
        } else {
            Err(MeterError::invalid_parameter("exposure_compensation", compensation))
        }
    }

    pub(crate) fn check_aperture(&self, aperture: f64) -> Result<()> {
        if aperture.is_finite() && self.limits.aperture_in_range(aperture) {
            Ok(())
        } else {
            Err(MeterError::invalid_parameter("aperture", aperture))
        }
    }

    pub(crate) fn check_shutter(&self, shutter: f64) -> Result<()> {
        if shutter.is_finite() && self.limits.shutter_in_range(shutter) {
            Ok(())
        } else {
            Err(MeterError::invalid_parameter("shutter_speed", shutter))
        }
    }
}

/// Builder for MeterConfig
#[derive(Default)]
pub struct MeterConfigBuilder {
    calibration: Option<CalibrationProfile>,
    aperture_scale: Option<StandardScale>,
    shutter_scale: Option<StandardScale>,
    limits: Option<ExposureLimits>,
    max_pixels: Option<Option<usize>>,
    max_compensation: Option<f64>,
    initial_state: Option<MeterState>,
}

impl MeterConfigBuilder {
    pub fn calibration(mut self, profile: CalibrationProfile) -> Self {
        self.calibration = Some(profile);
        self
    }

    pub fn aperture_scale(mut self, scale: StandardScale) -> Self {
        self.aperture_scale = Some(scale);
        self
    }

    pub fn shutter_scale(mut self, scale: StandardScale) -> Self {
        self.shutter_scale = Some(scale);
        self
    }

    pub fn limits(mut self, limits: ExposureLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn max_pixels(mut self, max: Option<usize>) -> Self {
        self.max_pixels = Some(max);
        self
    }

    pub fn max_compensation(mut self, max: f64) -> Self {
        self.max_compensation = Some(max);
        self
    }

    pub fn initial_state(mut self, state: MeterState) -> Self {
        self.initial_state = Some(state);
        self
    }

    pub fn build(self) -> MeterConfig {
        let default = MeterConfig::default();
        MeterConfig {
            calibration: self.calibration.unwrap_or(default.calibration),
            aperture_scale: self.aperture_scale.unwrap_or(default.aperture_scale),
            shutter_scale: self.shutter_scale.unwrap_or(default.shutter_scale),
            limits: self.limits.unwrap_or(default.limits),
            max_pixels: self.max_pixels.unwrap_or(default.max_pixels),
            max_compensation: self.max_compensation.unwrap_or(default.max_compensation),
            initial_state: self.initial_state.unwrap_or(default.initial_state),
        }
    }
}
