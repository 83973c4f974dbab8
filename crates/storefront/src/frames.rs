//! Per-frame callback scheduling.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Frame scheduler for one animation.
///
/// Each call to [`FrameClock::next_frame`] suspends until the next frame and
/// returns its timestamp relative to page load, like a browser's
/// animation-frame callback argument. The first frame fires immediately.
#[derive(Debug)]
pub struct FrameClock {
    interval: Interval,
    origin: Instant,
}

impl FrameClock {
    /// Create a clock ticking every `period` (at least 1 ms).
    #[must_use]
    pub fn new(period: Duration, origin: Instant) -> Self {
        let mut interval = tokio::time::interval(period.max(Duration::from_millis(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval, origin }
    }

    /// Wait for the next frame.
    pub async fn next_frame(&mut self) -> Duration {
        let at = self.interval.tick().await;
        at.saturating_duration_since(self.origin)
    }
}
