//! # Injectable time source.
//!
//! Every place the engine asks "what time is it" — window construction and
//! expiry checks — goes through a single [`Clock`]. Production code uses
//! [`SystemClock`]; tests swap in [`ManualClock`] and advance it by hand,
//! which makes expiry-driven paths fully deterministic.

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

/// Shared handle to a clock implementation.
pub type ClockRef = Arc<dyn Clock>;

/// Source of wall-clock time.
///
/// Implementations must be cheap to call; the actor consults the clock on
/// every tick.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current time.
    fn now(&self) -> SystemTime;
}

/// Real wall-clock time via [`SystemTime::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Manually driven clock for deterministic tests.
///
/// Starts at an arbitrary fixed instant and only moves when told to.
///
/// ```rust
/// use std::time::Duration;
/// use sigvisor::{Clock, ManualClock};
///
/// let clock = ManualClock::default();
/// let t0 = clock.now();
/// clock.advance(Duration::from_secs(5));
/// assert_eq!(clock.now(), t0 + Duration::from_secs(5));
/// ```
pub struct ManualClock {
    now: Mutex<SystemTime>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: SystemTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward by `d`.
    pub fn advance(&self, d: Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += d;
    }

    /// Sets the clock to an absolute instant.
    pub fn set(&self, at: SystemTime) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now = at;
    }
}

impl Default for ManualClock {
    /// Starts at the UNIX epoch; tests usually only care about deltas.
    fn default() -> Self {
        Self::new(SystemTime::UNIX_EPOCH)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        *self.now.lock().expect("clock lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::default();
        let t0 = clock.now();
        clock.advance(Duration::from_millis(250));
        assert_eq!(clock.now(), t0 + Duration::from_millis(250));
    }

    #[test]
    fn manual_clock_set_is_absolute() {
        let clock = ManualClock::default();
        let target = SystemTime::UNIX_EPOCH + Duration::from_secs(3600);
        clock.set(target);
        assert_eq!(clock.now(), target);
    }
}
