use crate::exposure::common::error::Result;
use crate::exposure::frame::types::PixelBuffer;

/// Anything that can hand the meter a captured frame.
///
/// Implementations return [`MeterError::NotReady`](crate::exposure::MeterError::NotReady)
/// while no frame is available yet.
pub trait FrameSource {
    fn next_frame(&self) -> Result<PixelBuffer>;
}
