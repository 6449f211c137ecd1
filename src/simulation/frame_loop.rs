//! Frame loop that drives the fleet with a start/stop lifecycle
//!
//! The loop only advances the fleet while running. Whoever owns the loop can
//! hand out a [`StopHandle`]; dropping the loop stops it as well, so no
//! recurring work outlives the view that started it.

use log::{debug, info};
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::clock::FrameClock;
use super::fleet::SimFleet;

/// What happened during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// 1-based frame counter since the loop was created
    pub frame: u64,
    pub delta_secs: f32,
    /// Fleet simulation time after the frame
    pub time: f32,
}

/// Cancels a running [`FrameLoop`] from outside
#[derive(Debug, Clone)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct FrameLoop<C: FrameClock> {
    clock: C,
    running: Arc<AtomicBool>,
    frames: u64,
    /// Minimum wall time per frame when pacing `run`
    frame_budget: Option<Duration>,
}

impl<C: FrameClock> FrameLoop<C> {
    /// Create a stopped loop
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            running: Arc::new(AtomicBool::new(false)),
            frames: 0,
            frame_budget: None,
        }
    }

    /// Pace `run` to at most `fps` frames per second
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.frame_budget = (fps > 0).then(|| Duration::from_secs_f64(1.0 / fps as f64));
        self
    }

    pub fn start(&mut self) {
        if !self.is_running() {
            self.clock.reset();
            self.running.store(true, Ordering::SeqCst);
            info!("Frame loop started");
        }
    }

    pub fn stop(&mut self) {
        if self.running.swap(false, Ordering::SeqCst) {
            info!("Frame loop stopped after {} frames", self.frames);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle(Arc::clone(&self.running))
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance the fleet by one frame, if the loop is running
    pub fn frame(&mut self, fleet: &mut SimFleet) -> Option<FrameReport> {
        if !self.is_running() {
            return None;
        }

        let delta_secs = self.clock.next_delta();
        fleet.tick(delta_secs);
        self.frames += 1;

        Some(FrameReport {
            frame: self.frames,
            delta_secs,
            time: fleet.time,
        })
    }

    /// Start the loop and drive frames until it is stopped
    ///
    /// The loop ends when the stop handle fires, `max_frames` frames have run, or
    /// `on_frame` returns `ControlFlow::Break`. It is always stopped on return.
    /// Returns the number of frames run by this call.
    pub fn run<F>(&mut self, fleet: &mut SimFleet, max_frames: Option<u64>, mut on_frame: F) -> u64
    where
        F: FnMut(&SimFleet, &FrameReport) -> ControlFlow<()>,
    {
        self.start();
        let mut count = 0;

        while max_frames.is_none_or(|max| count < max) {
            let started = Instant::now();
            let Some(report) = self.frame(fleet) else {
                debug!("Frame loop cancelled");
                break;
            };
            count += 1;

            if on_frame(fleet, &report).is_break() {
                break;
            }

            if let Some(budget) = self.frame_budget {
                let spent = started.elapsed();
                if spent < budget {
                    std::thread::sleep(budget - spent);
                }
            }
        }

        self.stop();
        count
    }
}

impl<C: FrameClock> Drop for FrameLoop<C> {
    fn drop(&mut self) {
        self.stop();
    }
}
