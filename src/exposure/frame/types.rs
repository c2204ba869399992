//! Frame data types

use crate::exposure::common::error::{MeterError, Result};

/// Number of interleaved channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

/// A captured RGBA8 frame
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    /// Interleaved pixel data [R, G, B, A, R, G, B, A, ...]
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps interleaved RGBA data, checking that it covers `width * height` pixels.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .ok_or(MeterError::InvalidDimensions(width, height))?;
        if data.len() != expected {
            return Err(MeterError::InvalidDimensions(width, height));
        }
        Ok(Self { width, height, data })
    }

    /// A frame where every pixel has the same colour. Alpha is opaque.
    ///
    /// # Panics
    ///
    /// Panics if `width * height * 4` overflows `usize`.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let pixels = match width
            .checked_mul(height)
            .filter(|pixels| pixels.checked_mul(CHANNELS).is_some())
        {
            Some(pixels) => pixels,
            None => panic!("frame of {width}x{height} pixels overflows usize"),
        };
        let data = std::iter::repeat([rgb[0], rgb[1], rgb[2], u8::MAX])
            .take(pixels)
            .flatten()
            .collect();
        Self { width, height, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGB channels of the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the frame. Only debug builds catch an
    /// `x` past the row end; release builds then read from the next row.
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> [u8; 3] {
        debug_assert!(x < self.width && y < self.height, "pixel ({x}, {y}) outside frame");
        let offset = (y * self.width + x) * CHANNELS;
        [self.data[offset], self.data[offset + 1], self.data[offset + 2]]
    }

    /// Overwrites the RGB channels of the pixel at (x, y), leaving alpha alone.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the frame.
    pub fn set_rgb(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} frame",
            self.width,
            self.height
        );
        let offset = (y * self.width + x) * CHANNELS;
        self.data[offset..offset + 3].copy_from_slice(&rgb);
    }

    /// The rectangle covering the whole frame.
    pub fn full_rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// A rectangular metering area in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// The sub-rectangle spanning the middle `fraction` of each dimension.
    ///
    /// Never collapses below one pixel in a non-empty dimension.
    pub fn centered(&self, fraction: f64) -> Rect {
        let fraction = fraction.clamp(0.0, 1.0);
        let span = |origin: usize, len: usize| -> (usize, usize) {
            if len == 0 {
                return (origin, 0);
            }
            let span_len = ((len as f64 * fraction).round() as usize).clamp(1, len);
            let start = (len - span_len) / 2;
            (origin + start, span_len)
        };
        let (x, width) = span(self.x, self.width);
        let (y, height) = span(self.y, self.height);
        Rect { x, y, width, height }
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Checks the rectangle is non-empty and lies inside `buffer`.
    pub fn validate_within(&self, buffer: &PixelBuffer) -> Result<()> {
        let fits = self.area() > 0
            && self.x.checked_add(self.width).is_some_and(|r| r <= buffer.width())
            && self.y.checked_add(self.height).is_some_and(|b| b <= buffer.height());
        if fits {
            Ok(())
        } else {
            Err(MeterError::InvalidRegion {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                frame_width: buffer.width(),
                frame_height: buffer.height(),
            })
        }
    }
}
