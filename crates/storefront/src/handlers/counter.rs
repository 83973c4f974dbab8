//! Animated counters.
//!
//! A counter moves its displayed value from 0 to an integer target, one step
//! per animation frame. Two interpolation strategies exist:
//!
//! - [`CounterRun`] derives the value from the elapsed fraction of the
//!   duration, so frame jitter changes how many steps are shown but never the
//!   final value.
//! - [`IncrementRun`] adds a fixed amount per frame, sized for a nominal 16 ms
//!   frame.
//!
//! Both clamp to the target on their last frame, and neither ever shows a
//! value lower than one already shown.

use std::time::Duration;

use tracing::instrument;

use crate::layout::{CounterSpec, CounterStyle, Interpolation};
use crate::state::Page;
use crate::surface::Surface;

/// Frame length the increment strategy is sized for.
pub const NOMINAL_FRAME: Duration = Duration::from_millis(16);

/// Value to display for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterFrame {
    pub value: u64,
    pub done: bool,
}

/// Elapsed-fraction interpolation.
#[derive(Debug, Clone)]
pub struct CounterRun {
    target: u64,
    duration: Duration,
    started_at: Option<Duration>,
    shown: u64,
}

impl CounterRun {
    #[must_use]
    pub const fn new(target: u64, duration: Duration) -> Self {
        Self {
            target,
            duration,
            started_at: None,
            shown: 0,
        }
    }

    /// Advance to the frame at timestamp `now`. The first call fixes the start.
    pub fn advance(&mut self, now: Duration) -> CounterFrame {
        let start = *self.started_at.get_or_insert(now);
        let elapsed = now.saturating_sub(start);

        if elapsed >= self.duration {
            self.shown = self.target;
            return CounterFrame {
                value: self.target,
                done: true,
            };
        }

        // floor(elapsed / duration * target), computed exactly
        let scaled = u128::from(self.target) * elapsed.as_nanos() / self.duration.as_nanos();
        let value = u64::try_from(scaled).unwrap_or(self.target).min(self.target);
        self.shown = self.shown.max(value);
        CounterFrame {
            value: self.shown,
            done: false,
        }
    }
}

/// Fixed-increment interpolation.
#[derive(Debug, Clone)]
pub struct IncrementRun {
    target: u64,
    /// Number of nominal frames in the duration.
    frames: u128,
    ticks: u128,
}

impl IncrementRun {
    #[must_use]
    pub fn new(target: u64, duration: Duration) -> Self {
        Self {
            target,
            frames: duration.as_millis() / NOMINAL_FRAME.as_millis(),
            ticks: 0,
        }
    }

    /// Advance one frame.
    pub fn advance(&mut self) -> CounterFrame {
        self.ticks += 1;
        if self.ticks >= self.frames {
            return CounterFrame {
                value: self.target,
                done: true,
            };
        }

        let value = u128::from(self.target) * self.ticks / self.frames;
        CounterFrame {
            value: u64::try_from(value).unwrap_or(self.target),
            done: false,
        }
    }
}

/// Either interpolation strategy, as chosen by a [`CounterSpec`].
#[derive(Debug, Clone)]
pub enum Interpolator {
    Fraction(CounterRun),
    Increment(IncrementRun),
}

impl Interpolator {
    #[must_use]
    pub fn for_spec(spec: &CounterSpec) -> Self {
        let duration = Duration::from_millis(spec.duration_ms);
        match spec.interpolation {
            Interpolation::Fraction => Self::Fraction(CounterRun::new(spec.target, duration)),
            Interpolation::Increment => Self::Increment(IncrementRun::new(spec.target, duration)),
        }
    }

    pub fn advance(&mut self, now: Duration) -> CounterFrame {
        match self {
            Self::Fraction(run) => run.advance(now),
            Self::Increment(run) => run.advance(),
        }
    }
}

/// Group digits in threes with `.` separators (vi-VN).
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// Text shown for a counter frame.
#[must_use]
pub fn format_counter(frame: CounterFrame, style: CounterStyle) -> String {
    match (style, frame.done) {
        (CounterStyle::Plain, _) => frame.value.to_string(),
        (CounterStyle::GroupedPlus, true) => format!("{}+", group_thousands(frame.value)),
        (CounterStyle::Percent, true) => format!("{}%", frame.value),
        (CounterStyle::GroupedPlus | CounterStyle::Percent, false) => {
            group_thousands(frame.value)
        }
    }
}

impl<S: Surface> Page<S> {
    /// Drive one counter until it shows its target.
    #[instrument(skip(self, spec), fields(element = %spec.element, target = spec.target))]
    pub(crate) async fn run_counter(&self, spec: CounterSpec) {
        let mut clock = self.frame_clock();
        let mut interpolator = Interpolator::for_spec(&spec);
        let mut frames = 0_u32;

        loop {
            let now = clock.next_frame().await;
            let frame = interpolator.advance(now);
            let text = format_counter(frame, spec.style);
            self.with_state(|state| state.surface.set_text(&spec.element, &text));
            frames += 1;

            if frame.done {
                tracing::debug!(frames, "counter finished");
                break;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fraction_counter_steps() {
        let mut run = CounterRun::new(95, ms(1500));
        assert_eq!(run.advance(ms(1000)).value, 0);
        assert_eq!(run.advance(ms(1750)).value, 47);
        let last = run.advance(ms(2500));
        assert_eq!(last, CounterFrame { value: 95, done: true });
    }

    #[test]
    fn test_fraction_counter_zero_duration() {
        let mut run = CounterRun::new(30, Duration::ZERO);
        assert_eq!(run.advance(ms(5)), CounterFrame { value: 30, done: true });
    }

    #[test]
    fn test_increment_counter_steps() {
        // 2000 ms / 16 ms = 125 frames
        let mut run = IncrementRun::new(500, ms(2000));
        assert_eq!(run.advance().value, 4);
        for _ in 0..123 {
            assert!(!run.advance().done);
        }
        assert_eq!(run.advance(), CounterFrame { value: 500, done: true });
    }

    #[test]
    fn test_increment_counter_shorter_than_a_frame() {
        let mut run = IncrementRun::new(7, ms(5));
        assert_eq!(run.advance(), CounterFrame { value: 7, done: true });
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1.000");
        assert_eq!(group_thousands(50_000), "50.000");
        assert_eq!(group_thousands(1_234_567), "1.234.567");
    }

    #[test]
    fn test_format_counter_styles() {
        let running = CounterFrame {
            value: 12_345,
            done: false,
        };
        let done = CounterFrame {
            value: 50_000,
            done: true,
        };
        assert_eq!(format_counter(running, CounterStyle::Plain), "12345");
        assert_eq!(format_counter(running, CounterStyle::GroupedPlus), "12.345");
        assert_eq!(format_counter(done, CounterStyle::GroupedPlus), "50.000+");
        assert_eq!(
            format_counter(CounterFrame { value: 99, done: true }, CounterStyle::Percent),
            "99%"
        );
    }

    proptest! {
        #[test]
        fn fraction_counter_is_monotonic_and_exact(
            target in 0_u64..1_000_000,
            duration_ms in 1_u64..5000,
            gaps in prop::collection::vec(0_u64..200, 1..400),
        ) {
            let mut run = CounterRun::new(target, ms(duration_ms));
            let mut now = 0;
            let mut last = 0;
            for gap in gaps {
                now += gap;
                let frame = run.advance(ms(now));
                prop_assert!(frame.value >= last);
                prop_assert!(frame.value <= target);
                last = frame.value;
            }
            // however many frames ran, the next one past the end is exact
            let frame = run.advance(ms(now + duration_ms));
            prop_assert_eq!(frame, CounterFrame { value: target, done: true });
        }

        #[test]
        fn increment_counter_is_monotonic_and_exact(
            target in 0_u64..1_000_000,
            duration_ms in 0_u64..5000,
        ) {
            let mut run = IncrementRun::new(target, ms(duration_ms));
            let mut last = 0;
            loop {
                let frame = run.advance();
                prop_assert!(frame.value >= last);
                last = frame.value;
                if frame.done {
                    prop_assert_eq!(frame.value, target);
                    break;
                }
            }
        }
    }
}
