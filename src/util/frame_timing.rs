//! Frame timing for the stats overlay.
//!
//! The animation loop renders exactly once per tick at the display's
//! cadence — there is no frame limiting or catch-up here, only
//! measurement: elapsed time per tick and an exponentially smoothed
//! FPS figure for display.

use std::time::Instant;

/// Tracks per-frame elapsed time and a smoothed FPS estimate.
#[derive(Debug)]
pub struct FrameTiming {
    /// Last tick timestamp.
    last_tick: Instant,
    /// Smoothed FPS using an exponential moving average.
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0).
    smoothing: f32,
}

impl FrameTiming {
    /// Create a timer starting now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Mark a tick: returns seconds elapsed since the previous tick and
    /// folds the sample into the smoothed FPS.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        if dt > 0.0 {
            let instant_fps = 1.0 / dt;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        dt
    }

    /// The smoothed FPS estimate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;

    #[test]
    fn tick_measures_elapsed_time() {
        let mut timing = FrameTiming::new();
        thread::sleep(Duration::from_millis(10));
        let dt = timing.tick();
        assert!(dt >= 0.010);
        assert!(dt < 5.0);
    }

    #[test]
    fn fps_tracks_toward_sample_rate() {
        let mut timing = FrameTiming::new();
        for _ in 0..50 {
            thread::sleep(Duration::from_millis(5));
            let _ = timing.tick();
        }
        // ~200 Hz samples pull the estimate well above the 60 FPS seed.
        assert!(timing.fps() > 60.0);
    }
}
