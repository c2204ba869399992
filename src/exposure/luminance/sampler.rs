use crate::exposure::common::error::Result;
use crate::exposure::frame::{PixelBuffer, Rect};
use crate::exposure::luminance::types::Luminance;

pub trait LuminanceSampler {
    /// Averages the luminance of `region` (the whole frame when `None`).
    fn sample(&self, buffer: &PixelBuffer, region: Option<Rect>) -> Result<Luminance>;
}
