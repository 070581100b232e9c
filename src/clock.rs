//! Fixed-timestep driver for hosts whose frame rate varies.
//!
//! Controller thresholds stay frame-based; the clock converts elapsed wall
//! time into a whole number of reference-rate ticks.

use crate::foundation::core::Fps;

/// Accumulates elapsed time and reports how many ticks are due.
#[derive(Clone, Debug)]
pub struct FrameClock {
    fps: Fps,
    accumulator: f64,
    max_catch_up_ticks: u32,
}

impl FrameClock {
    /// Default upper bound on ticks reported by one [`advance`](Self::advance).
    pub const DEFAULT_MAX_CATCH_UP: u32 = 8;

    /// Clock at the given reference rate.
    pub fn new(fps: Fps) -> Self {
        Self {
            fps,
            accumulator: 0.0,
            max_catch_up_ticks: Self::DEFAULT_MAX_CATCH_UP,
        }
    }

    /// Override the catch-up cap (at least 1).
    pub fn with_max_catch_up(mut self, ticks: u32) -> Self {
        self.max_catch_up_ticks = ticks.max(1);
        self
    }

    /// Add `dt_secs` of wall time and return the ticks now due.
    ///
    /// Non-finite or negative deltas count as zero. When more than the cap is
    /// due, the cap is returned and the backlog is dropped so a stalled host
    /// does not fast-forward through a whole transition.
    pub fn advance(&mut self, dt_secs: f64) -> u32 {
        if !dt_secs.is_finite() || dt_secs <= 0.0 {
            return 0;
        }
        self.accumulator += dt_secs;
        let frame = self.fps.frame_duration_secs();
        let due = (self.accumulator / frame).floor();
        if due >= f64::from(self.max_catch_up_ticks) {
            self.accumulator = 0.0;
            return self.max_catch_up_ticks;
        }
        self.accumulator -= due * frame;
        due as u32
    }

    /// Time carried over toward the next tick, in seconds.
    pub fn pending_secs(&self) -> f64 {
        self.accumulator
    }

    /// Reference frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }
}

#[cfg(test)]
#[path = "../tests/unit/clock.rs"]
mod tests;
