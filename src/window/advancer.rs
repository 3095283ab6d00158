//! # Advancement policies for rolling windows.
//!
//! An [`Advancer`] is a pure policy: given the current window and a `force`
//! hint, return either `None` (keep accumulating) or `Some(next)` (roll).
//!
//! ## Contract
//! - The successor is contiguous: `next.start == current.end`. Advancement
//!   never produces overlapping windows and never rewinds.
//! - When `force` is true the advancer MUST return `Some(_)`.
//!
//! The actor validates both points; a policy that breaks them fails the
//! actor and triggers a supervised restart.

use std::sync::Arc;

use crate::clock::ClockRef;
use crate::window::window::Window;

/// Shared handle to an advancement policy.
pub type AdvancerRef = Arc<dyn Advancer>;

/// Decides whether the current window should roll into its successor.
pub trait Advancer: Send + Sync + 'static {
    /// Returns `Some(next)` when the window should advance, `None`
    /// otherwise. Must return `Some(_)` when `force` is true.
    fn advance(&self, current: &Window, force: bool) -> Option<Window>;

    /// Stable policy name for logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Builds the contiguous successor of `current` with the same width.
fn successor(current: &Window) -> Window {
    Window::starting_at(current.end(), current.duration())
}

/// Rolls when the current window has expired by wall clock.
///
/// This is the standard tumbling policy: windows advance one frequency at a
/// time, each starting exactly where the previous one ended.
pub struct TumblingAdvancer {
    clock: ClockRef,
}

impl TumblingAdvancer {
    /// Creates a tumbling policy reading time from `clock`.
    pub fn new(clock: ClockRef) -> Self {
        Self { clock }
    }
}

impl Advancer for TumblingAdvancer {
    fn advance(&self, current: &Window, force: bool) -> Option<Window> {
        if force || current.expired(self.clock.now()) {
            Some(successor(current))
        } else {
            None
        }
    }

    fn name(&self) -> &'static str {
        "tumbling"
    }
}

/// Rolls once the window has accumulated at least `threshold` signals.
///
/// Useful for bursty sources where a window should close early rather than
/// grow without bound; the successor still starts at `current.end`, so the
/// no-gap/no-overlap contract holds.
pub struct CountAdvancer {
    threshold: usize,
}

impl CountAdvancer {
    /// Creates a count policy; `threshold` is clamped to a minimum of 1.
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold: threshold.max(1),
        }
    }
}

impl Advancer for CountAdvancer {
    fn advance(&self, current: &Window, force: bool) -> Option<Window> {
        if force || current.data().len() >= self.threshold {
            Some(successor(current))
        } else {
            None
        }
    }

    fn name(&self) -> &'static str {
        "count"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::signals::signal::HealthSignal;
    use std::time::{Duration, SystemTime};

    fn window_at_epoch(secs: u64) -> Window {
        Window::starting_at(SystemTime::UNIX_EPOCH, Duration::from_secs(secs))
    }

    #[test]
    fn tumbling_holds_until_expiry() {
        let clock = Arc::new(ManualClock::default());
        let adv = TumblingAdvancer::new(clock.clone());
        let w = window_at_epoch(10);

        assert!(adv.advance(&w, false).is_none());
        clock.advance(Duration::from_secs(10));
        let next = adv.advance(&w, false).expect("expired window rolls");
        assert_eq!(next.start(), w.end());
        assert_eq!(next.duration(), w.duration());
        assert!(next.data().is_empty());
    }

    #[test]
    fn force_always_rolls() {
        let clock = Arc::new(ManualClock::default());
        let adv = TumblingAdvancer::new(clock);
        let w = window_at_epoch(10);
        let next = adv.advance(&w, true).expect("forced advance");
        assert_eq!(next.start(), w.end());
    }

    #[test]
    fn count_rolls_at_threshold() {
        let adv = CountAdvancer::new(2);
        let mut w = window_at_epoch(10);
        assert!(adv.advance(&w, false).is_none());
        w.push(HealthSignal::new("a", SystemTime::UNIX_EPOCH));
        assert!(adv.advance(&w, false).is_none());
        w.push(HealthSignal::new("b", SystemTime::UNIX_EPOCH));
        let next = adv.advance(&w, false).expect("threshold reached");
        assert_eq!(next.start(), w.end());
    }

    #[test]
    fn successors_are_contiguous() {
        let adv = CountAdvancer::new(1);
        let w0 = window_at_epoch(5);
        let w1 = adv.advance(&w0, true).unwrap();
        let w2 = adv.advance(&w1, true).unwrap();
        assert_eq!(w1.start(), w0.end());
        assert_eq!(w2.start(), w1.end());
    }
}
