//! Shared utilities

use std::collections::VecDeque;
use std::time::Instant;

/// FPS counter with rolling average; also the source of per-frame delta
/// time for the input snapshots.
pub struct FpsCounter {
    frame_times: VecDeque<f32>,
    last_frame: Instant,
    sample_count: usize,
}

impl FpsCounter {
    /// Create a new FPS counter with specified sample window
    pub fn new(sample_count: usize) -> Self {
        Self {
            frame_times: VecDeque::with_capacity(sample_count),
            last_frame: Instant::now(),
            sample_count,
        }
    }

    /// Call at the start of each frame to record timing
    /// Returns (delta_time, current_fps, average_fps)
    pub fn tick(&mut self) -> (f32, f32, f32) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.frame_times.push_back(dt);
        if self.frame_times.len() > self.sample_count {
            self.frame_times.pop_front();
        }

        let current_fps = if dt > 0.0 { 1.0 / dt } else { 0.0 };
        let avg_dt: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        let avg_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };

        (dt, current_fps, avg_fps)
    }

    /// Get the average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        let avg_dt: f32 =
            self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
        avg_dt * 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_reports_nonnegative_dt() {
        let mut counter = FpsCounter::new(4);
        let (dt, _, _) = counter.tick();
        assert!(dt >= 0.0);
        let (dt, _, _) = counter.tick();
        assert!(dt >= 0.0);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut counter = FpsCounter::new(3);
        for _ in 0..10 {
            counter.tick();
        }
        assert!(counter.frame_times.len() <= 3);
    }
}
