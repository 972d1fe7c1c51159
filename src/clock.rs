//! # Frame Clock
//!
//! Turns monotonic time samples into the per-frame `delta_time` that scales
//! every movement, and keeps a short rolling window of frame times so the
//! frame rate can be reported through `log`.
//!
//! ```no_run
//! use freecam_viewer::clock::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! loop {
//!     let delta_time = clock.tick();
//!     // ... move things by speed * delta_time ...
//! #   break;
//! }
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Rolling frame-time statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub min_frame_time_ms: f32,
    pub max_frame_time_ms: f32,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: f32::MAX,
            max_frame_time_ms: 0.0,
        }
    }
}

pub struct FrameClock {
    origin: Instant,
    /// Seconds since `origin` at the previous sample.
    last_sample: f64,
    delta_time: f32,
    frame_times: VecDeque<f32>,
    max_samples: usize,
    stats: FrameStats,
    /// Seconds since `origin` at the last stats report.
    last_report: f64,
    report_interval: Duration,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_config(120, Duration::from_secs(1))
    }

    /// Create a clock keeping `max_samples` frame times and reporting every `report_interval`
    pub fn with_config(max_samples: usize, report_interval: Duration) -> Self {
        Self {
            origin: Instant::now(),
            last_sample: 0.0,
            delta_time: 0.0,
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples: max_samples.max(1),
            stats: FrameStats::default(),
            last_report: 0.0,
            report_interval,
        }
    }

    /// Samples the monotonic clock and returns this frame's delta
    pub fn tick(&mut self) -> f32 {
        let now = self.origin.elapsed().as_secs_f64();
        self.sample(now)
    }

    /// Advances to `now` (seconds on this clock's timeline) and returns the delta.
    ///
    /// A sample earlier than the previous one yields a zero delta.
    pub fn sample(&mut self, now: f64) -> f32 {
        self.delta_time = (now - self.last_sample).max(0.0) as f32;
        self.last_sample = self.last_sample.max(now);
        self.record(self.delta_time);

        if now - self.last_report >= self.report_interval.as_secs_f64() {
            self.update_stats();
            self.last_report = now;
            log::debug!(
                "{:.1} fps ({:.2} ms avg, {:.2}..{:.2} ms)",
                self.stats.fps,
                self.stats.frame_time_ms,
                self.stats.min_frame_time_ms,
                self.stats.max_frame_time_ms
            );
        }

        self.delta_time
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn last_sample(&self) -> f64 {
        self.last_sample
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    fn record(&mut self, frame_time: f32) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);
    }

    fn update_stats(&mut self) {
        if self.frame_times.is_empty() {
            return;
        }

        let total: f32 = self.frame_times.iter().sum();
        let avg_ms = total / self.frame_times.len() as f32 * 1000.0;

        self.stats.frame_time_ms = avg_ms;
        self.stats.fps = if avg_ms > 0.0 { 1000.0 / avg_ms } else { 0.0 };
        self.stats.min_frame_time_ms = self
            .frame_times
            .iter()
            .copied()
            .fold(f32::MAX, f32::min)
            * 1000.0;
        self.stats.max_frame_time_ms =
            self.frame_times.iter().copied().fold(0.0, f32::max) * 1000.0;
    }
}
