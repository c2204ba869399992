//! Solver types

use std::fmt;

use crate::exposure::scales::{format_aperture, format_shutter};

/// Which exposure parameter the user holds fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriorityMode {
    /// Aperture is held, shutter speed is solved
    #[default]
    AperturePriority,
    /// Shutter speed is held, aperture is solved
    ShutterPriority,
}

impl PriorityMode {
    pub fn toggled(self) -> Self {
        match self {
            PriorityMode::AperturePriority => PriorityMode::ShutterPriority,
            PriorityMode::ShutterPriority => PriorityMode::AperturePriority,
        }
    }
}

impl fmt::Display for PriorityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityMode::AperturePriority => write!(f, "aperture priority"),
            PriorityMode::ShutterPriority => write!(f, "shutter priority"),
        }
    }
}

/// Relative slack on the range bounds so a solve that lands on a bound up to
/// floating-point rounding still counts as inside.
const RANGE_TOLERANCE: f64 = 1e-9;

/// Physical range the solved parameter has to land in, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureLimits {
    pub min_aperture: f64,
    pub max_aperture: f64,
    /// Seconds
    pub min_shutter: f64,
    /// Seconds
    pub max_shutter: f64,
}

impl Default for ExposureLimits {
    fn default() -> Self {
        Self {
            min_aperture: 1.0,
            max_aperture: 22.0,
            min_shutter: 1.0 / 8000.0,
            max_shutter: 30.0,
        }
    }
}

impl ExposureLimits {
    pub fn aperture_in_range(&self, aperture: f64) -> bool {
        within(aperture, self.min_aperture, self.max_aperture)
    }

    pub fn shutter_in_range(&self, shutter: f64) -> bool {
        within(shutter, self.min_shutter, self.max_shutter)
    }
}

fn within(value: f64, min: f64, max: f64) -> bool {
    value >= min * (1.0 - RANGE_TOLERANCE) && value <= max * (1.0 + RANGE_TOLERANCE)
}

/// Aperture and shutter speed pair produced by a solve
///
/// When `valid` is false the scene cannot be exposed at the held setting and
/// the solved field carries the sentinel `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExposureSettings {
    pub aperture: f64,
    /// Seconds
    pub shutter: f64,
    pub valid: bool,
}

impl ExposureSettings {
    /// Sentinel for a solved value outside the meterable range.
    pub const INVALID: f64 = 0.0;

    pub fn new(aperture: f64, shutter: f64) -> Self {
        Self {
            aperture,
            shutter,
            valid: true,
        }
    }

    /// Settings whose solved parameter is out of range for `mode`.
    pub fn out_of_range(mode: PriorityMode, held_aperture: f64, held_shutter: f64) -> Self {
        match mode {
            PriorityMode::AperturePriority => Self {
                aperture: held_aperture,
                shutter: Self::INVALID,
                valid: false,
            },
            PriorityMode::ShutterPriority => Self {
                aperture: Self::INVALID,
                shutter: held_shutter,
                valid: false,
            },
        }
    }
}

impl fmt::Display for ExposureSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", format_aperture(self.aperture), format_shutter(self.shutter))
    }
}
