//! Exposure solver module
//!
//! Solves the exposure equation for whichever of aperture and shutter speed
//! the active priority mode leaves free, and snaps the answer to the standard
//! scales.

mod exposure_solver;
pub mod types;


pub use exposure_solver::ExposureSolver;
pub use types::{ExposureLimits, ExposureSettings, PriorityMode};
