//! # Frame Pacing (`frame_rater.rs`)
//!
//! [`FrameRater`] keeps the render loop at a target frame rate and records per-frame timing.
//! The event loop calls [`FrameRater::start_frame`] at the top of every redraw and then asks
//! for [`FrameRater::next_frame_deadline`] to hand to `ControlFlow::WaitUntil`, so the loop
//! sleeps inside `winit` instead of spinning.

use web_time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct FrameRater {
    frame_period: Duration,
    start_time: Option<Instant>,
    frame_start: Option<Instant>,
    frame_delta: Duration,
    frame_count: u64,
}

impl FrameRater {
    /// Creates a rater for `target_fps` frames per second. A zero rate is treated as one frame
    /// per second; configuration validation rejects it before it gets here.
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_period: Duration::from_secs(1) / target_fps.max(1),
            start_time: None,
            frame_start: None,
            frame_delta: Duration::ZERO,
            frame_count: 0,
        }
    }

    pub fn frame_period(&self) -> Duration {
        self.frame_period
    }

    /// Marks the beginning of a frame and updates the frame delta.
    pub fn start_frame(&mut self, now: Instant) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
        if let Some(previous) = self.frame_start {
            self.frame_delta = now.saturating_duration_since(previous);
            self.frame_count += 1;
        }
        self.frame_start = Some(now);
    }

    /// Instant at which the next frame should start, or `None` before the first frame.
    pub fn next_frame_deadline(&self) -> Option<Instant> {
        self.frame_start.map(|start| start + self.frame_period)
    }

    /// Number of completed frames.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn frame_delta(&self) -> Duration {
        self.frame_delta
    }

    pub fn frame_delta_seconds(&self) -> f32 {
        self.frame_delta.as_secs_f32()
    }

    /// Time since the first frame started.
    pub fn run_time(&self, now: Instant) -> Duration {
        self.start_time
            .map(|start| now.saturating_duration_since(start))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_delta_and_count() {
        let mut rater = FrameRater::new(50);
        let t0 = Instant::now();

        assert_eq!(rater.next_frame_deadline(), None);

        rater.start_frame(t0);
        assert_eq!(rater.frame_count(), 0);
        assert_eq!(rater.next_frame_deadline(), Some(t0 + Duration::from_millis(20)));

        rater.start_frame(t0 + Duration::from_millis(25));
        assert_eq!(rater.frame_count(), 1);
        assert_eq!(rater.frame_delta(), Duration::from_millis(25));
        assert_eq!(rater.run_time(t0 + Duration::from_secs(1)), Duration::from_secs(1));
    }

    #[test]
    fn zero_rate_does_not_divide_by_zero() {
        let rater = FrameRater::new(0);
        assert_eq!(rater.frame_period(), Duration::from_secs(1));
    }
}
