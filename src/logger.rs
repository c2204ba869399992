//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence; otherwise the meter logs at `info`. Asking for
//! `debug` also turns on span close events, which carry per-stage timings of
//! each measurement.

pub use tracing::{debug, error, info, warn, trace, instrument};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

const DEFAULT_FILTER: &str = "lightmeter_rs=info";

pub fn init() {
    let _ = init_with_default(DEFAULT_FILTER);
}

/// Installs the global subscriber with `default_filter` as the fallback
/// directive. Returns false if a subscriber was already installed.
pub fn init_with_default(default_filter: &str) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let is_debug = env_filter.to_string().contains("debug");

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(if is_debug {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
}
