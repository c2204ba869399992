//! Calibration module
//!
//! Calibration profiles and the luminance to exposure value conversion.

mod ev_calculator;
pub mod types;


pub use ev_calculator::{EvCalculator, MIN_LUMINANCE, MAX_LUMINANCE};
pub use types::{CalibrationProfile, CalibrationProfileBuilder};
