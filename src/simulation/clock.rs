//! Frame clocks that decide how much time passes per frame

use std::time::Instant;

/// Source of per-frame time deltas
pub trait FrameClock {
    /// Seconds elapsed since the previous frame
    fn next_delta(&mut self) -> f32;

    /// Forget the previous frame, so the next delta starts from now
    fn reset(&mut self);
}

/// Measures real elapsed time between frames
///
/// Motion speed is frame-rate independent but trajectories differ from run to run.
#[derive(Debug, Clone)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for WallClock {
    fn next_delta(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        delta
    }

    fn reset(&mut self) {
        self.last = Instant::now();
    }
}

/// A constant logical tick, for bit-exact reproducible runs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedClock {
    pub delta_secs: f32,
}

impl FixedClock {
    pub fn new(delta_secs: f32) -> Self {
        Self { delta_secs }
    }
}

impl FrameClock for FixedClock {
    fn next_delta(&mut self) -> f32 {
        self.delta_secs
    }

    fn reset(&mut self) {}
}
