//! Luminance sampling module
//!
//! Reduces a frame, or a metering region of it, to one relative luminance.

mod sampler;
mod rec709_sampler;
pub mod types;


pub use sampler::LuminanceSampler;
pub use rec709_sampler::Rec709Sampler;
pub use types::{Luminance, srgb_to_linear, REC709_R, REC709_G, REC709_B};
