#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use crate::exposure::calibration::{CalibrationProfile, EvCalculator};
    use crate::exposure::common::error::{MeterError, Result};
    use crate::exposure::frame::{FrameSource, PixelBuffer, Rect};
    use crate::exposure::luminance::{Luminance, LuminanceSampler};
    use crate::exposure::meter::{LightMeter, MeasurementTimings, MeterConfig, MeterState, SharedLightMeter};
    use crate::exposure::scales::StandardScale;
    use crate::exposure::solver::{ExposureSettings, PriorityMode};

    /// Luminance that meters at EV 10 under the center-weighted profile
    const EV10_LUMINANCE: f64 = 1024.0 / 1500.0;

    struct MockSampler {
        luminance: f64,
        calls: Cell<usize>,
    }

    impl MockSampler {
        fn new(luminance: f64) -> Self {
            Self {
                luminance,
                calls: Cell::new(0),
            }
        }
    }

    impl LuminanceSampler for MockSampler {
        fn sample(&self, _buffer: &PixelBuffer, _region: Option<Rect>) -> Result<Luminance> {
            self.calls.set(self.calls.get() + 1);
            Ok(Luminance::new(self.luminance))
        }
    }

    struct MockSource {
        frame: Option<PixelBuffer>,
    }

    impl FrameSource for MockSource {
        fn next_frame(&self) -> Result<PixelBuffer> {
            self.frame
                .clone()
                .ok_or_else(|| MeterError::NotReady("camera warming up".to_string()))
        }
    }

    fn frame() -> PixelBuffer {
        PixelBuffer::filled(4, 4, [128, 128, 128])
    }

    fn meter_at_f8(luminance: f64) -> LightMeter<MockSampler> {
        let config = MeterConfig::builder()
            .initial_state(MeterState {
                aperture: 8.0,
                ..MeterState::default()
            })
            .build();
        LightMeter::with_sampler(MockSampler::new(luminance), config).unwrap()
    }

    #[test]
    fn test_config_builder() {
        let config = MeterConfig::builder()
            .calibration(CalibrationProfile::simple())
            .aperture_scale(StandardScale::minimal_apertures())
            .max_pixels(None)
            .max_compensation(5.0)
            .build();

        assert_eq!(config.calibration.name, "simple");
        assert!(!config.aperture_scale.contains(1.2));
        assert_eq!(config.max_pixels, None);
        assert_eq!(config.max_compensation, 5.0);
        assert_eq!(config.initial_state, MeterState::default());
    }

    #[test]
    fn test_invalid_initial_state_is_rejected() {
        let config = MeterConfig::builder()
            .initial_state(MeterState {
                iso: 0.0,
                ..MeterState::default()
            })
            .build();
        assert!(matches!(
            LightMeter::new(config).err(),
            Some(MeterError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_measure_solves_shutter() {
        let mut meter = meter_at_f8(EV10_LUMINANCE);
        assert!(meter.reading().is_none());

        let reading = meter.measure(&frame()).unwrap();

        assert!((reading.ev - 10.0).abs() < 1e-9);
        assert_eq!(reading.mode, PriorityMode::AperturePriority);
        assert_eq!(reading.settings, ExposureSettings::new(8.0, 1.0 / 15.0));
        assert_eq!(meter.state().shutter, 1.0 / 15.0);
        assert_eq!(meter.reading(), Some(reading));
    }

    #[test]
    fn test_parameter_changes_before_measurement() {
        let mut meter = meter_at_f8(EV10_LUMINANCE);
        assert_eq!(meter.set_iso(400.0).unwrap(), None);
        assert_eq!(meter.toggle_priority_mode().unwrap(), None);
        assert_eq!(meter.state().iso, 400.0);
        assert_eq!(meter.state().mode, PriorityMode::ShutterPriority);
    }

    #[test]
    fn test_iso_change_resolves_without_sampling() {
        let mut meter = meter_at_f8(EV10_LUMINANCE);
        meter.measure(&frame()).unwrap();

        let reading = meter.set_iso(200.0).unwrap().unwrap();

        assert_eq!(reading.iso, 200.0);
        assert_eq!(reading.settings.shutter, 1.0 / 30.0);
        assert_eq!(meter.sampler_calls(), 1);
    }

    #[test]
    fn test_invalid_iso_is_rejected() {
        let mut meter = meter_at_f8(EV10_LUMINANCE);
        meter.measure(&frame()).unwrap();

        for iso in [0.0, -50.0, f64::INFINITY] {
            let err = meter.set_iso(iso).unwrap_err();
            assert!(matches!(err, MeterError::InvalidParameter { .. }));
            assert!(err.is_recoverable());
        }
        assert_eq!(meter.state().iso, 100.0);
    }

    #[test]
    fn test_exposure_compensation() {
        let mut meter = meter_at_f8(EV10_LUMINANCE);
        meter.measure(&frame()).unwrap();

        let reading = meter.set_exposure_compensation(1.0).unwrap().unwrap();
        assert_eq!(reading.compensation, 1.0);
        assert_eq!(reading.settings.shutter, 1.0 / 8.0);

        assert!(meter.set_exposure_compensation(3.5).is_err());
        assert_eq!(meter.state().compensation, 1.0);
        assert_eq!(meter.sampler_calls(), 1);
    }

    #[test]
    fn test_toggle_resolves_from_held_shutter() {
        let mut meter = meter_at_f8(EV10_LUMINANCE);
        meter.measure(&frame()).unwrap();

        let reading = meter.toggle_priority_mode().unwrap().unwrap();

        assert_eq!(reading.mode, PriorityMode::ShutterPriority);
        assert_eq!(reading.settings, ExposureSettings::new(8.0, 1.0 / 15.0));
        assert!((reading.ev - 10.0).abs() < 1e-9);
        assert_eq!(meter.sampler_calls(), 1);
    }

    #[test]
    fn test_setting_held_and_driven_values() {
        let mut meter = meter_at_f8(EV10_LUMINANCE);
        meter.measure(&frame()).unwrap();
        meter.set_priority_mode(PriorityMode::ShutterPriority).unwrap();

        // sqrt(1024 / 60) = 4.13
        let reading = meter.set_shutter_speed(1.0 / 60.0).unwrap().unwrap();
        assert_eq!(reading.settings, ExposureSettings::new(4.0, 1.0 / 60.0));

        // aperture is the solved value here, so nothing is re-solved
        let unchanged = meter.set_aperture(16.0).unwrap().unwrap();
        assert_eq!(unchanged, reading);
        assert_eq!(meter.state().aperture, 16.0);

        assert!(meter.set_aperture(32.0).is_err());
        assert!(meter.set_shutter_speed(60.0).is_err());
    }

    #[test]
    fn test_out_of_range_is_reported_not_clamped() {
        let config = MeterConfig::builder()
            .initial_state(MeterState {
                aperture: 22.0,
                ..MeterState::default()
            })
            .build();
        let mut meter = LightMeter::with_sampler(MockSampler::new(0.0), config).unwrap();

        let reading = meter.measure(&frame()).unwrap();
        assert!(!reading.settings.valid);
        assert_eq!(reading.settings.shutter, ExposureSettings::INVALID);
        // the held shutter is not overwritten by the sentinel
        assert_eq!(meter.state().shutter, 1.0 / 125.0);

        let reading = meter.toggle_priority_mode().unwrap().unwrap();
        assert!(!reading.settings.valid);
        assert_eq!(reading.settings.aperture, ExposureSettings::INVALID);
        assert_eq!(reading.settings.shutter, 1.0 / 125.0);
        assert_eq!(meter.state().aperture, 22.0);
    }

    #[test]
    fn test_empty_frame_is_not_ready() {
        let mut meter = meter_at_f8(EV10_LUMINANCE);
        let empty = PixelBuffer::new(0, 0, Vec::new()).unwrap();

        let err = meter.measure(&empty).unwrap_err();
        assert!(matches!(err, MeterError::NotReady(_)));
        assert!(err.is_recoverable());
        assert_eq!(meter.ev(), None);
        assert_eq!(meter.sampler_calls(), 0);
    }

    #[test]
    fn test_oversize_frame_is_rejected() {
        let config = MeterConfig::builder().max_pixels(Some(16)).build();
        let mut meter = LightMeter::with_sampler(MockSampler::new(0.5), config).unwrap();

        assert!(meter.measure(&PixelBuffer::filled(4, 4, [0, 0, 0])).is_ok());
        assert!(matches!(
            meter.measure(&PixelBuffer::filled(5, 5, [0, 0, 0])).unwrap_err(),
            MeterError::BufferTooLarge { pixels: 25, max: 16 }
        ));
    }

    #[test]
    fn test_pixel_budget_covers_whole_batch() {
        let config = MeterConfig::builder().max_pixels(Some(16)).build();
        let mut meter = LightMeter::with_sampler(MockSampler::new(0.5), config).unwrap();

        let pair = vec![PixelBuffer::filled(4, 4, [0, 0, 0]); 2];
        assert!(matches!(
            meter.measure_frames(&pair).unwrap_err(),
            MeterError::BufferTooLarge { pixels: 32, max: 16 }
        ));

        let burst = vec![PixelBuffer::filled(4, 4, [0, 0, 0]); 50];
        assert!(matches!(
            meter.measure_frames(&burst).unwrap_err(),
            MeterError::BufferTooLarge { pixels: 800, max: 16 }
        ));
        assert_eq!(meter.sampler_calls(), 0);
        assert_eq!(meter.ev(), None);

        assert!(meter.measure_frames(&pair[..1]).is_ok());
    }

    #[test]
    fn test_measure_from_source() {
        let mut meter = meter_at_f8(EV10_LUMINANCE);

        let waiting = MockSource { frame: None };
        assert!(matches!(
            meter.measure_from(&waiting).unwrap_err(),
            MeterError::NotReady(_)
        ));

        let ready = MockSource { frame: Some(frame()) };
        let reading = meter.measure_from(&ready).unwrap();
        assert_eq!(reading.settings.shutter, 1.0 / 15.0);
    }

    #[test]
    fn test_measure_with_timings() {
        let mut meter = meter_at_f8(EV10_LUMINANCE);
        let (reading, timings) = meter.measure_with_timings(&frame()).unwrap();

        assert!(reading.settings.valid);
        assert_eq!(
            timings.total(),
            timings.validate + timings.sample + timings.ev + timings.solve
        );
        assert!(timings.total() >= timings.sample);
        assert!((0.0..=100.0).contains(&timings.sample_share()));
        assert_eq!(MeasurementTimings::default().sample_share(), 0.0);
    }

    #[test]
    fn test_mid_grey_scene() {
        let mut meter = LightMeter::new(MeterConfig::default()).unwrap();
        let reading = meter.measure(&frame()).unwrap();

        // luminance 0.2159 -> EV 8.34 -> 0.097s at f/5.6
        assert!((reading.ev - 8.339).abs() < 1e-3);
        assert_eq!(reading.settings, ExposureSettings::new(5.6, 1.0 / 8.0));
    }

    #[test]
    fn test_measure_frames_averages_ev() {
        let profile = CalibrationProfile::center_weighted();
        let calculator = EvCalculator::new(&profile);
        let expected = (calculator.compute_ev(Luminance::BLACK) + calculator.compute_ev(Luminance::WHITE)) / 2.0;

        let mut meter = LightMeter::new(MeterConfig::default()).unwrap();
        let frames = [
            PixelBuffer::filled(4, 4, [0, 0, 0]),
            PixelBuffer::filled(4, 4, [255, 255, 255]),
        ];
        let reading = meter.measure_frames(&frames).unwrap();

        assert!((reading.ev - expected).abs() < 1e-9);
        assert!(matches!(meter.measure_frames(&[]).unwrap_err(), MeterError::NotReady(_)));
    }

    #[test]
    fn test_measure_region() {
        let mut scene = PixelBuffer::filled(10, 10, [20, 20, 20]);
        for y in 0..3 {
            for x in 0..3 {
                scene.set_rgb(x, y, [250, 250, 250]);
            }
        }
        let mut meter = LightMeter::new(MeterConfig::default()).unwrap();

        let whole = meter.measure(&scene).unwrap();
        let spot = meter.measure_region(&scene, Rect::new(0, 0, 3, 3)).unwrap();
        assert!(spot.ev > whole.ev);

        assert!(matches!(
            meter.measure_region(&scene, Rect::new(9, 9, 2, 2)).unwrap_err(),
            MeterError::InvalidRegion { .. }
        ));
    }

    #[test]
    fn test_brighter_scene_gives_faster_shutter() {
        let mut meter = LightMeter::new(MeterConfig::default()).unwrap();
        let dim = meter.measure(&PixelBuffer::filled(4, 4, [60, 60, 60])).unwrap();
        let bright = meter.measure(&PixelBuffer::filled(4, 4, [230, 230, 230])).unwrap();

        assert!(bright.ev > dim.ev);
        assert!(bright.settings.shutter < dim.settings.shutter);
    }

    #[test]
    fn test_shared_meter_rejects_overlapping_measurement() {
        let shared = SharedLightMeter::new(meter_at_f8(EV10_LUMINANCE));
        let other = shared.clone();

        shared.with(|_meter| {
            assert!(matches!(
                other.measure(&frame()).unwrap_err(),
                MeterError::MeasurementInProgress
            ));
        });

        let reading = other.measure(&frame()).unwrap();
        assert_eq!(shared.reading(), Some(reading));
        assert_eq!(shared.with(|meter| meter.sampler_calls()), 1);
    }

    impl LightMeter<MockSampler> {
        fn sampler_calls(&self) -> usize {
            self.sampler().calls.get()
        }
    }
}
