//! Per-frame ramp primitives shared by the fade, slide and text timers.
//!
//! All helpers are frame-based: each call represents one host frame.

/// Full opacity on the 8-bit alpha scale used by `fade_alpha`.
pub const ALPHA_MAX: f64 = 255.0;

/// Move `current` toward `target` by `fraction` of the remaining distance.
///
/// This is an exponential ease-out: it never overshoots and slows as it
/// approaches the target.
pub fn approach(current: f64, target: f64, fraction: f64) -> f64 {
    current + (target - current) * fraction.clamp(0.0, 1.0)
}

/// Move `current` toward `target` by a fixed `step`, stopping at the target.
pub fn step_toward(current: f64, target: f64, step: f64) -> f64 {
    let step = step.abs();
    if current < target {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}

/// Clamp into `[0, 1]`, mapping NaN to 0.
pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Clamp into `[0, 255]`, mapping NaN to 0.
pub fn clamp_alpha(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, ALPHA_MAX)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ramp.rs"]
mod tests;
