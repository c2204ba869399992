//! Gamma-correct Rec. 709 luminance sampler.
//!
//! Each pixel is decoded from sRGB to linear light, weighted with the BT.709
//! coefficients and averaged. With center weighting on, pixels inside the
//! central part of the metering region count with `center_weight` and the rest
//! with `surround_weight`; the result is normalised by the total weight so a
//! uniform frame meters the same either way.

use tracing::debug;
use crate::exposure::calibration::types::check_center_weighting;
use crate::exposure::calibration::CalibrationProfile;
use crate::exposure::common::error::{MeterError, Result};
use crate::exposure::frame::{PixelBuffer, Rect};
use crate::exposure::luminance::sampler::LuminanceSampler;
use crate::exposure::luminance::types::{srgb_to_linear, Luminance, REC709_B, REC709_G, REC709_R};

#[derive(Debug, Clone, Copy, PartialEq)]
struct CenterWeighting {
    fraction: f64,
    center_weight: f64,
    surround_weight: f64,
}

#[derive(Debug, Clone)]
pub struct Rec709Sampler {
    /// sRGB-decoded value for each 8-bit code.
    linear: [f64; 256],
    weighting: Option<CenterWeighting>,
}

impl Default for Rec709Sampler {
    fn default() -> Self {
        Self::uniform()
    }
}

impl Rec709Sampler {
    /// Plain average over the metering region.
    pub fn uniform() -> Self {
        Self {
            linear: linear_table(),
            weighting: None,
        }
    }

    /// Center-weighted average; `fraction` is the share of each dimension
    /// treated as the center.
    ///
    /// Rejects a non-positive or non-finite center weight, a negative or
    /// non-finite surround weight and a fraction outside (0, 1].
    pub fn center_weighted(fraction: f64, center_weight: f64, surround_weight: f64) -> Result<Self> {
        check_center_weighting(fraction, center_weight, surround_weight)?;
        Ok(Self {
            linear: linear_table(),
            weighting: Some(CenterWeighting {
                fraction,
                center_weight,
                surround_weight,
            }),
        })
    }

    pub fn from_profile(profile: &CalibrationProfile) -> Result<Self> {
        if profile.center_weighted {
            Self::center_weighted(
                profile.center_fraction,
                profile.center_weight,
                profile.surround_weight,
            )
        } else {
            Ok(Self::uniform())
        }
    }

    pub fn is_center_weighted(&self) -> bool {
        self.weighting.is_some()
    }

    #[inline]
    fn pixel_luminance(&self, rgb: [u8; 3]) -> f64 {
        REC709_R * self.linear[rgb[0] as usize]
            + REC709_G * self.linear[rgb[1] as usize]
            + REC709_B * self.linear[rgb[2] as usize]
    }
}

impl LuminanceSampler for Rec709Sampler {
    fn sample(&self, buffer: &PixelBuffer, region: Option<Rect>) -> Result<Luminance> {
        if buffer.is_empty() {
            return Err(MeterError::NotReady(format!(
                "frame has no pixels ({}x{})",
                buffer.width(),
                buffer.height()
            )));
        }

        let region = region.unwrap_or_else(|| buffer.full_rect());
        region.validate_within(buffer)?;

        let center = self.weighting.map(|w| (region.centered(w.fraction), w));

        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for y in region.y..region.y + region.height {
            for x in region.x..region.x + region.width {
                let luminance = self.pixel_luminance(buffer.rgb(x, y));
                let weight = match center {
                    Some((rect, w)) if rect.contains(x, y) => w.center_weight,
                    Some((_, w)) => w.surround_weight,
                    None => 1.0,
                };
                weighted_sum += luminance * weight;
                total_weight += weight;
            }
        }

        if !(total_weight > 0.0) {
            return Err(MeterError::invalid_parameter("metering weights", total_weight));
        }

        let average = Luminance::new(weighted_sum / total_weight);
        debug!(
            width = region.width,
            height = region.height,
            center_weighted = self.weighting.is_some(),
            luminance = average.value(),
            "Sampled luminance"
        );
        Ok(average)
    }
}

fn linear_table() -> [f64; 256] {
    let mut table = [0.0; 256];
    for (code, slot) in table.iter_mut().enumerate() {
        *slot = srgb_to_linear(code as f64 / 255.0);
    }
    table
}
