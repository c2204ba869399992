/// Formats an f-number the way lenses are marked, e.g. `f/5.6`, `f/11`.
///
/// The invalid sentinel (zero or less) renders as `--`.
pub fn format_aperture(aperture: f64) -> String {
    if !aperture.is_finite() || aperture <= 0.0 {
        return "--".to_string();
    }
    if aperture.fract() == 0.0 {
        format!("f/{:.0}", aperture)
    } else {
        format!("f/{:.1}", aperture)
    }
}

/// Formats a shutter speed as a fraction below one second (`1/60`) and as
/// whole seconds otherwise (`2"`).
pub fn format_shutter(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "--".to_string();
    }
    if seconds >= 1.0 {
        if seconds.fract() == 0.0 {
            format!("{:.0}\"", seconds)
        } else {
            format!("{:.1}\"", seconds)
        }
    } else {
        format!("1/{:.0}", (1.0 / seconds).round())
    }
}
