//! Frame timing and generation cadence.
//!
//! The explorer renders at display rate but advances the automaton at a
//! configurable generations-per-second rate. [`Clock`] tracks both: call
//! [`Clock::tick`] once per frame and step the lattice as many times as it
//! returns.
//!
//! ```ignore
//! let mut clock = Clock::new(10.0);
//!
//! // In the frame loop:
//! for _ in 0..clock.tick() {
//!     lattice.step(rule.as_ref());
//! }
//! ```
//!
//! While paused, `tick` returns 0 and the frame counter keeps running so the
//! FPS readout stays live.

use std::time::{Duration, Instant};

/// Generations queued in a single frame are capped so a long stall (window
/// drag, debugger pause) does not burst hundreds of steps at once.
const MAX_STEPS_PER_FRAME: u32 = 8;

/// Frame timer with a pause flag and a generations-per-second throttle.
#[derive(Debug)]
pub struct Clock {
    last_frame: Instant,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
    paused: bool,
    rate: f32,
    accumulator: f32,
}

impl Clock {
    /// Create a clock advancing `rate` generations per second, running.
    pub fn new(rate: f32) -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
            paused: false,
            rate: rate.max(0.0),
            accumulator: 0.0,
        }
    }

    /// Advance the frame timer and return the number of generations due.
    ///
    /// Call once per rendered frame.
    pub fn tick(&mut self) -> u32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.frame_count += 1;
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.accumulate(delta)
    }

    /// Credit `delta` seconds toward the generation budget and drain whole
    /// generations from it. Split out from [`Clock::tick`] so timing logic is
    /// testable without real sleeps.
    fn accumulate(&mut self, delta: f32) -> u32 {
        if self.paused || self.rate <= 0.0 {
            self.accumulator = 0.0;
            return 0;
        }

        self.accumulator += delta * self.rate;
        let whole = self.accumulator as u32;
        // Drain every whole generation but only run up to the cap; the
        // backlog beyond it is dropped, not carried forward.
        self.accumulator -= whole as f32;
        whole.min(MAX_STEPS_PER_FRAME)
    }

    /// Generations per second the clock is targeting.
    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Set the target generations per second. Negative values clamp to 0.
    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate.max(0.0);
    }

    /// Whether stepping is paused.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause stepping. Rendering and FPS tracking continue.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume stepping from a clean slate (no backlog burst).
    pub fn resume(&mut self) {
        self.paused = false;
        self.accumulator = 0.0;
        self.last_frame = Instant::now();
    }

    /// Toggle between paused and running.
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Frames rendered since creation.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Measured frames per second, updated twice a second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_whole_generations() {
        let mut clock = Clock::new(10.0);
        // 0.05s at 10 gen/s = half a generation: nothing due yet.
        assert_eq!(clock.accumulate(0.05), 0);
        // Another 0.05s completes one generation.
        assert_eq!(clock.accumulate(0.05), 1);
        // A long frame yields several.
        assert_eq!(clock.accumulate(0.3), 3);
    }

    #[test]
    fn test_paused_clock_yields_nothing() {
        let mut clock = Clock::new(10.0);
        clock.pause();
        assert_eq!(clock.accumulate(5.0), 0);
        assert!(clock.is_paused());

        // Resuming does not burst the time spent paused.
        clock.resume();
        assert_eq!(clock.accumulate(0.01), 0);
    }

    #[test]
    fn test_stall_is_capped() {
        let mut clock = Clock::new(60.0);
        // A 10 second stall would owe 600 generations; the cap bounds it and
        // the excess is dropped rather than carried.
        assert_eq!(clock.accumulate(10.0), MAX_STEPS_PER_FRAME);
        assert_eq!(clock.accumulate(0.0), 0);
        // The frame after a stall is back to normal cadence.
        assert_eq!(clock.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn test_zero_rate_never_steps() {
        let mut clock = Clock::new(0.0);
        assert_eq!(clock.accumulate(100.0), 0);

        clock.set_rate(-5.0);
        assert_eq!(clock.rate(), 0.0);
    }

    #[test]
    fn test_tick_counts_frames() {
        let mut clock = Clock::new(10.0);
        clock.tick();
        clock.tick();
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn test_toggle_pause() {
        let mut clock = Clock::new(10.0);
        clock.toggle_pause();
        assert!(clock.is_paused());
        clock.toggle_pause();
        assert!(!clock.is_paused());
    }
}
