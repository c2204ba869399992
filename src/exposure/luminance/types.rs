//! Luminance types and colour math

/// ITU-R BT.709 red coefficient.
pub const REC709_R: f64 = 0.2126;
/// ITU-R BT.709 green coefficient.
pub const REC709_G: f64 = 0.7152;
/// ITU-R BT.709 blue coefficient.
pub const REC709_B: f64 = 0.0722;

/// Knee of the sRGB transfer curve on the encoded side.
const SRGB_LINEAR_THRESHOLD: f64 = 0.03928;

/// Relative scene luminance in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Luminance(f64);

impl Luminance {
    pub const BLACK: Luminance = Luminance(0.0);
    pub const WHITE: Luminance = Luminance(1.0);

    /// Wraps a value, clamping it into `[0, 1]`. NaN becomes 0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::BLACK;
        }
        Luminance(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Decodes one normalised sRGB channel to linear light.
#[inline]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= SRGB_LINEAR_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
