//! Frame source backed by a headerless RGBA8 dump on disk.
//!
//! Useful for metering frames grabbed by an external capture tool: the file is
//! read as-is, row-major, four bytes per pixel, with the dimensions supplied by
//! the caller.

use std::path::{Path, PathBuf};

use tracing::debug;
use crate::exposure::common::error::{MeterError, Result};
use crate::exposure::frame::source::FrameSource;
use crate::exposure::frame::types::PixelBuffer;

pub struct RawRgbaFileSource {
    path: PathBuf,
    width: usize,
    height: usize,
}

impl RawRgbaFileSource {
    pub fn new<P: AsRef<Path>>(path: P, width: usize, height: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            width,
            height,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FrameSource for RawRgbaFileSource {
    /// Reads the whole file and wraps it as a [`PixelBuffer`].
    ///
    /// A missing file means the capture tool has not produced a frame yet and
    /// is reported as `NotReady`; any other read failure is an `InputReadError`.
    fn next_frame(&self) -> Result<PixelBuffer> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(MeterError::NotReady(format!(
                    "{}: no frame written yet",
                    self.path.display()
                )));
            }
            Err(e) => {
                return Err(MeterError::InputReadError(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        debug!("Read raw frame {}, {} bytes", self.path.display(), data.len());

        PixelBuffer::new(self.width, self.height, data)
    }
}
