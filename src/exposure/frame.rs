//! Frame acquisition module
//!
//! This module defines the pixel buffer handed to the engine and the seam to
//! whatever capture surface produces it.

mod source;
mod raw_rgba_source;
pub mod types;


pub use source::FrameSource;
pub use raw_rgba_source::RawRgbaFileSource;
pub use types::{PixelBuffer, Rect, CHANNELS};
