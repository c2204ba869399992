use std::sync::{Arc, Mutex, PoisonError, TryLockError};

use tracing::debug;
use crate::exposure::common::error::{MeterError, Result};
use crate::exposure::frame::PixelBuffer;
use crate::exposure::luminance::{LuminanceSampler, Rec709Sampler};
use crate::exposure::meter::light_meter::LightMeter;
use crate::exposure::meter::types::ExposureReading;

/// A [`LightMeter`] shared between threads.
///
/// Measurement cycles never overlap: a `measure` call arriving while another
/// cycle holds the meter is turned away with `MeasurementInProgress` rather
/// than queued, so the caller can drop that frame.
pub struct SharedLightMeter<S: LuminanceSampler = Rec709Sampler> {
    inner: Arc<Mutex<LightMeter<S>>>,
}

impl<S: LuminanceSampler> Clone for SharedLightMeter<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: LuminanceSampler> SharedLightMeter<S> {
    pub fn new(meter: LightMeter<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(meter)),
        }
    }

    pub fn measure(&self, buffer: &PixelBuffer) -> Result<ExposureReading> {
        let mut meter = match self.inner.try_lock() {
            Ok(meter) => meter,
            Err(TryLockError::WouldBlock) => {
                debug!("Measurement skipped, previous cycle still running");
                return Err(MeterError::MeasurementInProgress);
            }
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };
        meter.measure(buffer)
    }

    /// Runs `f` with exclusive access, waiting for any measurement in flight.
    pub fn with<R>(&self, f: impl FnOnce(&mut LightMeter<S>) -> R) -> R {
        let mut meter = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut meter)
    }

    pub fn reading(&self) -> Option<ExposureReading> {
        self.with(|meter| meter.reading())
    }
}
