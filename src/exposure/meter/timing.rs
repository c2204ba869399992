use std::time::Duration;

use tracing::info;

/// Wall time spent in each stage of one measurement cycle.
///
/// With several frames, `sample` covers all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeasurementTimings {
    pub validate: Duration,
    pub sample: Duration,
    pub ev: Duration,
    pub solve: Duration,
}

impl MeasurementTimings {
    pub fn total(&self) -> Duration {
        self.validate + self.sample + self.ev + self.solve
    }

    /// Share of the cycle spent sampling pixels, in percent.
    pub fn sample_share(&self) -> f64 {
        let total = self.total().as_secs_f64();
        if total > 0.0 {
            self.sample.as_secs_f64() / total * 100.0
        } else {
            0.0
        }
    }

    pub fn log_summary(&self) {
        let ms = |d: Duration| d.as_secs_f64() * 1000.0;
        info!(
            validate_ms = ms(self.validate),
            sample_ms = ms(self.sample),
            ev_ms = ms(self.ev),
            solve_ms = ms(self.solve),
            total_ms = ms(self.total()),
            sample_pct = self.sample_share(),
            "Measurement timings"
        );
    }
}
