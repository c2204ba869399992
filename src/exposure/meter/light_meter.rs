use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::exposure::{
    calibration::EvCalculator,
    common::error::{MeterError, Result},
    frame::{FrameSource, PixelBuffer, Rect},
    luminance::{Luminance, LuminanceSampler, Rec709Sampler},
    meter::timing::MeasurementTimings,
    meter::types::{ExposureReading, MeterConfig, MeterState},
    solver::{ExposureSettings, ExposureSolver, PriorityMode},
};

/// Reflected-light meter over captured frames.
///
/// A measurement runs sample -> EV -> solve and caches the EV. Parameter
/// changes re-solve from the cached EV without touching the camera. Exactly one
/// parameter is solved per cycle, the one the priority mode leaves free.
pub struct LightMeter<S: LuminanceSampler = Rec709Sampler> {
    sampler: S,
    calculator: EvCalculator,
    solver: ExposureSolver,
    config: MeterConfig,
    state: MeterState,
    ev: Option<f64>,
    reading: Option<ExposureReading>,
}

impl LightMeter<Rec709Sampler> {
    /// Meter using the Rec. 709 sampler set up from the calibration profile.
    pub fn new(config: MeterConfig) -> Result<Self> {
        let sampler = Rec709Sampler::from_profile(&config.calibration)?;
        Self::with_sampler(sampler, config)
    }
}

impl<S: LuminanceSampler> LightMeter<S> {
    pub fn with_sampler(sampler: S, config: MeterConfig) -> Result<Self> {
        config.validate()?;

        let solver = ExposureSolver::new(
            config.aperture_scale.clone(),
            config.shutter_scale.clone(),
            config.limits,
        );
        info!(
            profile = %config.calibration.name,
            calibration_factor = config.calibration.calibration_factor(),
            mode = %config.initial_state.mode,
            "Light meter initialized"
        );

        Ok(Self {
            sampler,
            calculator: EvCalculator::new(&config.calibration),
            solver,
            state: config.initial_state,
            config,
            ev: None,
            reading: None,
        })
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    pub fn state(&self) -> &MeterState {
        &self.state
    }

    /// EV of the last measurement, if any.
    pub fn ev(&self) -> Option<f64> {
        self.ev
    }

    /// Latest published reading, if a measurement has happened.
    pub fn reading(&self) -> Option<ExposureReading> {
        self.reading
    }

    /// Sets the aperture. Re-solves the shutter in aperture priority; in
    /// shutter priority the value is kept for when the mode flips.
    pub fn set_aperture(&mut self, aperture: f64) -> Result<Option<ExposureReading>> {
        self.reject_invalid(self.config.check_aperture(aperture))?;
        self.state.aperture = aperture;
        if self.state.mode == PriorityMode::AperturePriority {
            self.resolve()
        } else {
            debug!(aperture, "Aperture stored, solved in shutter priority");
            Ok(self.reading)
        }
    }

    /// Sets the shutter speed in seconds. Re-solves the aperture in shutter
    /// priority; in aperture priority the value is kept for when the mode flips.
    pub fn set_shutter_speed(&mut self, shutter: f64) -> Result<Option<ExposureReading>> {
        self.reject_invalid(self.config.check_shutter(shutter))?;
        self.state.shutter = shutter;
        if self.state.mode == PriorityMode::ShutterPriority {
            self.resolve()
        } else {
            debug!(shutter, "Shutter speed stored, solved in aperture priority");
            Ok(self.reading)
        }
    }

    pub fn set_iso(&mut self, iso: f64) -> Result<Option<ExposureReading>> {
        self.reject_invalid(self.config.check_iso(iso))?;
        self.state.iso = iso;
        self.resolve()
    }

    pub fn set_exposure_compensation(&mut self, compensation: f64) -> Result<Option<ExposureReading>> {
        self.reject_invalid(self.config.check_compensation(compensation))?;
        self.state.compensation = compensation;
        self.resolve()
    }

    pub fn set_priority_mode(&mut self, mode: PriorityMode) -> Result<Option<ExposureReading>> {
        if self.state.mode == mode {
            return Ok(self.reading);
        }
        info!(from = %self.state.mode, to = %mode, "Priority mode changed");
        self.state.mode = mode;
        self.resolve()
    }

    /// Flips the priority mode and re-solves from the cached EV.
    pub fn toggle_priority_mode(&mut self) -> Result<Option<ExposureReading>> {
        self.set_priority_mode(self.state.mode.toggled())
    }

    /// Meters the whole frame.
    pub fn measure(&mut self, buffer: &PixelBuffer) -> Result<ExposureReading> {
        let mut timings = MeasurementTimings::default();
        self.run_measurement(std::slice::from_ref(buffer), None, &mut timings)
    }

    /// Meters only `region` of the frame.
    pub fn measure_region(&mut self, buffer: &PixelBuffer, region: Rect) -> Result<ExposureReading> {
        let mut timings = MeasurementTimings::default();
        self.run_measurement(std::slice::from_ref(buffer), Some(region), &mut timings)
    }

    /// Meters several frames of the same scene and averages their EVs.
    pub fn measure_frames(&mut self, frames: &[PixelBuffer]) -> Result<ExposureReading> {
        let mut timings = MeasurementTimings::default();
        self.run_measurement(frames, None, &mut timings)
    }

    /// Pulls a frame from `source` and meters it.
    pub fn measure_from<F: FrameSource>(&mut self, source: &F) -> Result<ExposureReading> {
        let frame = {
            let _span = tracing::info_span!("acquire_frame").entered();
            source.next_frame()?
        };
        self.measure(&frame)
    }

    pub fn measure_with_timings(
        &mut self,
        buffer: &PixelBuffer,
    ) -> Result<(ExposureReading, MeasurementTimings)> {
        let mut timings = MeasurementTimings::default();
        let reading = self.run_measurement(std::slice::from_ref(buffer), None, &mut timings)?;
        Ok((reading, timings))
    }

    /// Every frame needs pixels, and the batch as a whole must fit the pixel
    /// budget.
    fn validate_frames(&self, frames: &[PixelBuffer]) -> Result<()> {
        if let Some(frame) = frames.iter().find(|frame| frame.is_empty()) {
            return Err(MeterError::NotReady(format!(
                "frame has no pixels ({}x{})",
                frame.width(),
                frame.height()
            )));
        }

        if let Some(max) = self.config.max_pixels {
            let pixels = frames
                .iter()
                .try_fold(0usize, |total, frame| total.checked_add(frame.pixel_count()))
                .unwrap_or(usize::MAX);
            if pixels > max {
                warn!(
                    frames = frames.len(),
                    pixels,
                    "Measurement exceeds the {} pixel budget",
                    max
                );
                return Err(MeterError::BufferTooLarge { pixels, max });
            }
        }

        Ok(())
    }

    #[instrument(skip(self, frames, timings), fields(frames = frames.len()))]
    fn run_measurement(
        &mut self,
        frames: &[PixelBuffer],
        region: Option<Rect>,
        timings: &mut MeasurementTimings,
    ) -> Result<ExposureReading> {
        if frames.is_empty() {
            return Err(MeterError::NotReady("no frames to measure".to_string()));
        }

        let started = Instant::now();
        {
            let _span = tracing::info_span!("validate_frames").entered();
            self.validate_frames(frames)?;
        }
        timings.validate = started.elapsed();

        let started = Instant::now();
        let samples = {
            let _span = tracing::info_span!("sample_luminance").entered();
            frames
                .iter()
                .map(|frame| self.sampler.sample(frame, region))
                .collect::<Result<Vec<Luminance>>>()?
        };
        timings.sample = started.elapsed();

        let started = Instant::now();
        let ev = {
            let _span = tracing::info_span!("compute_ev").entered();
            self.calculator.average_ev(&samples)?
        };
        timings.ev = started.elapsed();

        let started = Instant::now();
        self.ev = Some(ev);
        let reading = {
            let _span = tracing::info_span!("solve", ev).entered();
            self.solve_cached(ev)?
        };
        timings.solve = started.elapsed();

        info!(
            ev,
            mode = %reading.mode,
            settings = %reading.settings,
            valid = reading.settings.valid,
            elapsed_ms = timings.total().as_secs_f64() * 1000.0,
            "Measurement complete"
        );
        Ok(reading)
    }

    /// Re-solves from the cached EV. Nothing to do before the first measurement.
    fn resolve(&mut self) -> Result<Option<ExposureReading>> {
        match self.ev {
            Some(ev) => self.solve_cached(ev).map(Some),
            None => Ok(None),
        }
    }

    fn solve_cached(&mut self, ev: f64) -> Result<ExposureReading> {
        let state = self.state;
        let settings = self.solver.solve(
            ev,
            state.iso,
            state.compensation,
            state.mode,
            state.aperture,
            state.shutter,
        )?;
        Ok(self.apply(ev, settings))
    }

    fn apply(&mut self, ev: f64, settings: ExposureSettings) -> ExposureReading {
        if settings.valid {
            match self.state.mode {
                PriorityMode::AperturePriority => self.state.shutter = settings.shutter,
                PriorityMode::ShutterPriority => self.state.aperture = settings.aperture,
            }
        } else {
            info!(ev, mode = %self.state.mode, "No valid exposure at this setting");
        }

        let reading = ExposureReading {
            ev,
            iso: self.state.iso,
            compensation: self.state.compensation,
            mode: self.state.mode,
            settings,
        };
        self.reading = Some(reading);
        reading
    }

    fn reject_invalid(&self, check: Result<()>) -> Result<()> {
        if let Err(e) = &check {
            warn!("Rejected parameter change: {}", e);
        }
        check
    }
}
