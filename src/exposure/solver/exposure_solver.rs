//! Exposure equation solver.
//!
//! Works in the APEX form normalised to ISO 100:
//!
//! - aperture priority: `t = 2^-(EV - comp) * (100 / ISO) * N^2`
//! - shutter priority:  `N = sqrt(t * (100 / ISO) * 2^(EV - comp))`
//!
//! A raw result outside [`ExposureLimits`] is reported as an invalid reading,
//! never clamped into range. In-range results snap to the nearest standard
//! value in stops.

use tracing::debug;
use crate::exposure::common::error::{MeterError, Result};
use crate::exposure::scales::StandardScale;
use crate::exposure::solver::types::{ExposureLimits, ExposureSettings, PriorityMode};

/// Reference sensitivity the EV scale is defined at.
const BASE_ISO: f64 = 100.0;

#[derive(Debug, Clone)]
pub struct ExposureSolver {
    apertures: StandardScale,
    shutter_speeds: StandardScale,
    limits: ExposureLimits,
}

impl Default for ExposureSolver {
    fn default() -> Self {
        Self::new(
            StandardScale::full_apertures(),
            StandardScale::shutter_speeds(),
            ExposureLimits::default(),
        )
    }
}

impl ExposureSolver {
    pub fn new(apertures: StandardScale, shutter_speeds: StandardScale, limits: ExposureLimits) -> Self {
        Self {
            apertures,
            shutter_speeds,
            limits,
        }
    }

    pub fn apertures(&self) -> &StandardScale {
        &self.apertures
    }

    pub fn shutter_speeds(&self) -> &StandardScale {
        &self.shutter_speeds
    }

    pub fn limits(&self) -> &ExposureLimits {
        &self.limits
    }

    /// Unsnapped shutter speed for a held aperture.
    pub fn raw_shutter(ev: f64, iso: f64, compensation: f64, aperture: f64) -> f64 {
        2f64.powf(-(ev - compensation)) * (BASE_ISO / iso) * aperture * aperture
    }

    /// Unsnapped f-number for a held shutter speed.
    pub fn raw_aperture(ev: f64, iso: f64, compensation: f64, shutter: f64) -> f64 {
        (shutter * (BASE_ISO / iso) * 2f64.powf(ev - compensation)).sqrt()
    }

    /// Solves for the parameter `mode` leaves free.
    ///
    /// The held parameter is passed through untouched. Fails only on a
    /// non-positive or non-finite ISO; an unreachable exposure comes back as
    /// `valid: false`.
    pub fn solve(
        &self,
        ev: f64,
        iso: f64,
        compensation: f64,
        mode: PriorityMode,
        held_aperture: f64,
        held_shutter: f64,
    ) -> Result<ExposureSettings> {
        if !iso.is_finite() || iso <= 0.0 {
            return Err(MeterError::invalid_parameter("iso", iso));
        }

        let settings = match mode {
            PriorityMode::AperturePriority => {
                let raw = Self::raw_shutter(ev, iso, compensation, held_aperture);
                match snap(raw, self.limits.shutter_in_range(raw), &self.shutter_speeds) {
                    Some(shutter) => ExposureSettings::new(held_aperture, shutter),
                    None => ExposureSettings::out_of_range(mode, held_aperture, held_shutter),
                }
            }
            PriorityMode::ShutterPriority => {
                let raw = Self::raw_aperture(ev, iso, compensation, held_shutter);
                match snap(raw, self.limits.aperture_in_range(raw), &self.apertures) {
                    Some(aperture) => ExposureSettings::new(aperture, held_shutter),
                    None => ExposureSettings::out_of_range(mode, held_aperture, held_shutter),
                }
            }
        };

        debug!(ev, iso, compensation, %mode, %settings, valid = settings.valid, "Solved exposure");
        Ok(settings)
    }
}

fn snap(raw: f64, in_range: bool, scale: &StandardScale) -> Option<f64> {
    if !in_range {
        return None;
    }
    scale.nearest(raw)
}
