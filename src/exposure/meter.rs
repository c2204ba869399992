//! Light meter module
//!
//! The stateful controller: holds the user's exposure parameters, runs
//! measurement cycles and re-solves when a parameter changes.

mod light_meter;
mod shared;
mod timing;
pub mod types;

#[cfg(test)]
mod tests;

pub use light_meter::LightMeter;
pub use shared::SharedLightMeter;
pub use timing::MeasurementTimings;
pub use types::{ExposureReading, MeterConfig, MeterConfigBuilder, MeterState};
