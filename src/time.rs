//! Frame clock for driving a simulation.
//!
//! `Time` turns frames into the monotonically increasing `now` value that
//! [`Simulation::tick`](crate::Simulation::tick) expects. Simulated time is
//! the sum of per-frame deltas, taken either from the wall clock or from a
//! fixed step. A fixed step makes headless runs reproducible regardless of
//! how fast the host loop actually spins.
//!
//! Large deltas are passed through unchanged; the per-tick cap lives in
//! [`Simulation::with_max_delta`](crate::Simulation::with_max_delta).
//!
//! # Example
//!
//! ```ignore
//! use sparkring::time::Time;
//!
//! let mut time = Time::new();
//!
//! // In your frame loop:
//! let (now, _) = time.update();
//! sim.tick(now, &input.pointer());
//! ```

use std::time::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_millis(500);

/// Elapsed simulated time, frame count and measured frame rate.
#[derive(Debug)]
pub struct Time {
    last_frame: Instant,
    elapsed: f64,
    delta: f64,
    frame: u64,
    /// Fixed seconds per frame, replacing wall-clock deltas when set.
    fixed_delta: Option<f64>,
    // Frame rate, measured over FPS_WINDOW of wall-clock time
    fps: f64,
    fps_window_start: Instant,
    fps_window_frames: u64,
}

impl Time {
    /// Wall-clock driven clock starting now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            elapsed: 0.0,
            delta: 0.0,
            frame: 0,
            fixed_delta: None,
            fps: 0.0,
            fps_window_start: now,
            fps_window_frames: 0,
        }
    }

    /// Advance by exactly `step` seconds per frame. Negative steps become zero.
    pub fn with_fixed_delta(mut self, step: f64) -> Self {
        self.fixed_delta = Some(step.max(0.0));
        self
    }

    /// Advance the clock. Call once per frame.
    ///
    /// Returns `(elapsed, delta)`.
    pub fn update(&mut self) -> (f64, f64) {
        let now = Instant::now();
        let wall = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;

        self.delta = self.fixed_delta.unwrap_or(wall);
        self.elapsed += self.delta;
        self.frame += 1;

        self.fps_window_frames += 1;
        let window = now.duration_since(self.fps_window_start);
        if window >= FPS_WINDOW {
            self.fps = self.fps_window_frames as f64 / window.as_secs_f64();
            self.fps_window_frames = 0;
            self.fps_window_start = now;
        }

        (self.elapsed, self.delta)
    }

    /// Simulated seconds since start.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Simulated seconds covered by the last frame.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Wall-clock frames per second, refreshed twice a second.
    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    #[inline]
    pub fn is_fixed_step(&self) -> bool {
        self.fixed_delta.is_some()
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
