//! Frame-rate and inference timing bookkeeping for the stats readout.

use std::time::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_secs(1);

#[derive(Clone, Debug)]
pub struct FrameStats {
    window_start: Instant,
    frames_in_window: u32,
    fps: f64,
    last_inference: Duration,
    last_detection_count: usize,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            window_start: start,
            frames_in_window: 0,
            fps: 0.0,
            last_inference: Duration::ZERO,
            last_detection_count: 0,
        }
    }

    pub fn record(&mut self, inference: Duration, detections: usize) {
        self.record_at(Instant::now(), inference, detections);
    }

    /// Counts one processed frame. FPS is recomputed once at least a second
    /// has passed since the current window opened.
    pub fn record_at(&mut self, now: Instant, inference: Duration, detections: usize) {
        self.frames_in_window += 1;
        self.last_inference = inference;
        self.last_detection_count = detections;

        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= FPS_WINDOW {
            self.fps = self.frames_in_window as f64 * 1000.0 / elapsed.as_millis() as f64;
            self.frames_in_window = 0;
            self.window_start = now;
        }
    }

    /// Frames per second over the last completed window.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn last_inference(&self) -> Duration {
        self.last_inference
    }

    pub fn last_detection_count(&self) -> usize {
        self.last_detection_count
    }

    /// `"30 FPS · 12ms · 4 objects"`
    pub fn summary(&self) -> String {
        format!(
            "{} FPS · {}ms · {} objects",
            self.fps as u64,
            self.last_inference.as_millis(),
            self.last_detection_count
        )
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_updates_once_per_window() {
        let start = Instant::now();
        let mut stats = FrameStats::starting_at(start);
        for i in 1..=9 {
            stats.record_at(start + Duration::from_millis(i * 100), Duration::from_millis(20), 2);
            assert_eq!(stats.fps(), 0.0);
        }
        stats.record_at(start + Duration::from_millis(1000), Duration::from_millis(25), 3);
        assert_eq!(stats.fps(), 10.0);
        assert_eq!(stats.last_inference(), Duration::from_millis(25));
        assert_eq!(stats.last_detection_count(), 3);
        assert_eq!(stats.summary(), "10 FPS · 25ms · 3 objects");
    }

    #[test]
    fn window_restarts_after_update() {
        let start = Instant::now();
        let mut stats = FrameStats::starting_at(start);
        stats.record_at(start + Duration::from_millis(2000), Duration::ZERO, 0);
        assert_eq!(stats.fps(), 0.5);
        stats.record_at(start + Duration::from_millis(2500), Duration::ZERO, 0);
        assert_eq!(stats.fps(), 0.5);
    }
}
