//! Exposure calculation engine
//!
//! This module turns a captured frame into a photographic exposure: it samples
//! scene luminance, converts it to an exposure value and solves for the
//! complementary aperture or shutter speed on the standard scales.

pub mod common;
pub mod frame;
pub mod scales;
pub mod luminance;
pub mod calibration;
pub mod solver;
pub mod meter;

pub use common::{
    MeterError,
    Result,
};

pub use frame::{
    FrameSource,
    PixelBuffer,
    RawRgbaFileSource,
    Rect,
};

pub use scales::{
    StandardScale,
    STANDARD_APERTURES,
    MINIMAL_APERTURES,
    STANDARD_SHUTTER_SPEEDS,
    format_aperture,
    format_shutter,
};

pub use luminance::{
    Luminance,
    LuminanceSampler,
    Rec709Sampler,
};

pub use calibration::{
    CalibrationProfile,
    CalibrationProfileBuilder,
    EvCalculator,
};

pub use solver::{
    ExposureLimits,
    ExposureSettings,
    ExposureSolver,
    PriorityMode,
};

pub use meter::{
    ExposureReading,
    LightMeter,
    MeasurementTimings,
    MeterConfig,
    MeterConfigBuilder,
    MeterState,
    SharedLightMeter,
};
