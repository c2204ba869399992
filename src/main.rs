use anyhow::{Context, bail};
use lightmeter_rs::exposure::{
    format_aperture, format_shutter, ExposureReading, LightMeter, MeterConfig, PixelBuffer,
    RawRgbaFileSource,
};
use lightmeter_rs::logger;

use tracing::{info, warn};

fn report(reading: &ExposureReading) {
    if reading.settings.valid {
        info!(
            "EV {:.2} | ISO {} | {:+.1} EV | {} | {} at {}",
            reading.ev,
            reading.iso,
            reading.compensation,
            reading.mode,
            format_aperture(reading.settings.aperture),
            format_shutter(reading.settings.shutter)
        );
    } else {
        warn!(
            "EV {:.2} | ISO {} | {}: no valid exposure at this setting",
            reading.ev, reading.iso, reading.mode
        );
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting light meter...");

    let mut meter = LightMeter::new(MeterConfig::default())?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let reading = match args.as_slice() {
        [path, width, height] => {
            let width: usize = width.parse().context("width must be a pixel count")?;
            let height: usize = height.parse().context("height must be a pixel count")?;
            let source = RawRgbaFileSource::new(path, width, height);
            info!("Metering raw frame {} ({}x{})", path, width, height);
            meter
                .measure_from(&source)
                .with_context(|| format!("metering {}", path))?
        }
        [] => {
            info!("No frame given, metering a synthetic mid-grey frame");
            let (reading, timings) = meter.measure_with_timings(&PixelBuffer::filled(640, 480, [128, 128, 128]))?;
            timings.log_summary();
            reading
        }
        _ => bail!("usage: lightmeter_rs [frame.rgba width height]"),
    };
    report(&reading);

    if let Some(reading) = meter.toggle_priority_mode()? {
        report(&reading);
    }

    Ok(())
}
