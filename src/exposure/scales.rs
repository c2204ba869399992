//! Standard photographic scales
//!
//! Canonical full-stop aperture and shutter-speed tables, nearest-value
//! snapping and display formatting.

mod format;
pub mod types;


pub use format::{format_aperture, format_shutter};
pub use types::{
    StandardScale,
    nearest_standard,
    STANDARD_APERTURES,
    MINIMAL_APERTURES,
    STANDARD_SHUTTER_SPEEDS,
};
