//! Simulated time and wall-clock frame timing.
//!
//! Two clocks live here and never mix:
//!
//! - [`advance`] moves *simulated* seconds forward by a real frame delta scaled
//!   by the speed multiplier, and not at all while paused.
//! - [`FrameClock`] measures *wall-clock* frame deltas and throttles the loop
//!   to a target frame rate.
//!
//! # Example
//!
//! ```ignore
//! use orrery::time::{advance, FrameClock};
//!
//! let mut clock = FrameClock::new();
//! let mut elapsed = 0.0;
//!
//! // In your frame loop:
//! let delta = clock.tick(60);
//! elapsed = advance(elapsed, delta, 2.0, false);
//! println!("Frame {} at {:.1} fps", clock.frame(), clock.fps());
//! ```

use std::thread;
use std::time::{Duration, Instant};

/// Longest wall-clock delta a single frame may report.
///
/// A window that was dragged or minimised would otherwise hand the stepper
/// one enormous delta.
pub const MAX_FRAME_DELTA: f64 = 0.25;

/// Advance simulated time by one frame.
///
/// Returns `elapsed` unchanged while `paused`, otherwise
/// `elapsed + real_delta * speed`. Negative and NaN deltas count as zero so
/// simulated time never runs backwards.
#[inline]
pub fn advance(elapsed: f64, real_delta: f64, speed: f64, paused: bool) -> f64 {
    if paused {
        return elapsed;
    }
    // f64::max ignores a NaN operand
    let delta = real_delta.max(0.0);
    let speed = speed.max(0.0);
    elapsed + delta * speed
}

/// Wall-clock frame timer with a frame-rate cap.
///
/// Provides the real delta fed to [`advance`], plus frame counting and FPS
/// for the HUD and logs.
#[derive(Debug)]
pub struct FrameClock {
    /// When the clock was created.
    start: Instant,
    /// When the last frame ended.
    last_frame: Instant,
    /// Time since last frame in seconds.
    delta_secs: f64,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// End the current frame.
    ///
    /// Sleeps out whatever is left of the `1 / target_fps` budget, then
    /// returns the wall-clock seconds since the previous tick, capped at
    /// [`MAX_FRAME_DELTA`]. A `target_fps` of 0 disables the cap.
    pub fn tick(&mut self, target_fps: u32) -> f64 {
        if target_fps > 0 {
            let budget = Duration::from_secs_f64(1.0 / target_fps as f64);
            if let Some(remaining) = budget.checked_sub(self.last_frame.elapsed()) {
                thread::sleep(remaining);
            }
        }

        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f64();
        self.delta_secs = raw_delta.min(MAX_FRAME_DELTA);
        self.last_frame = now;

        self.frame_count += 1;

        // Update FPS periodically
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.delta_secs
    }

    /// Delta returned by the last [`tick`](Self::tick).
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Wall-clock time since the clock was created.
    #[inline]
    pub fn uptime(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_scales_delta() {
        assert_eq!(advance(10.0, 0.5, 4.0, false), 12.0);
    }

    #[test]
    fn test_advance_paused_is_noop() {
        assert_eq!(advance(10.0, 0.5, 4.0, true), 10.0);
    }

    #[test]
    fn test_advance_never_goes_backwards() {
        assert_eq!(advance(3.0, -1.0, 1.0, false), 3.0);
        assert_eq!(advance(3.0, f64::NAN, 1.0, false), 3.0);
    }

    #[test]
    fn test_frame_clock_new() {
        let clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.delta(), 0.0);
    }

    #[test]
    fn test_tick_throttles_to_target() {
        let mut clock = FrameClock::new();
        let delta = clock.tick(50);

        // 1/50 s budget, give or take scheduler jitter
        assert!(delta >= 0.019, "delta {delta} shorter than frame budget");
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_tick_caps_long_frames() {
        let mut clock = FrameClock::new();
        thread::sleep(Duration::from_millis(300));
        let delta = clock.tick(0);
        assert_eq!(delta, MAX_FRAME_DELTA);
    }
}
