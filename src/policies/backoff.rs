//! # Restart backoff policy.
//!
//! [`BackoffPolicy`] controls how long the supervisor waits before
//! restarting a failed actor, and how many restarts it tolerates:
//!
//! ```text
//! delay(attempt) = min(max_backoff, min_backoff · 2^attempt · (1 ± random_factor))
//! ```
//!
//! The randomization spreads restarts of independent engines apart so they
//! do not hammer shared downstreams in lockstep.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use sigvisor::BackoffPolicy;
//!
//! let backoff = BackoffPolicy {
//!     min_backoff: Duration::from_millis(100),
//!     max_backoff: Duration::from_secs(10),
//!     random_factor: 0.0,
//!     max_retries: 5,
//! };
//!
//! assert_eq!(backoff.delay(0), Duration::from_millis(100));
//! assert_eq!(backoff.delay(1), Duration::from_millis(200));
//! assert_eq!(backoff.delay(2), Duration::from_millis(400));
//! // 100ms * 2^10 exceeds the cap
//! assert_eq!(backoff.delay(10), Duration::from_secs(10));
//! ```

use std::time::Duration;

use rand::Rng;

/// Exponential restart backoff with bounded randomization.
#[derive(Clone, Copy, Debug)]
pub struct BackoffPolicy {
    /// Delay before the first restart.
    pub min_backoff: Duration,
    /// Cap on the computed delay.
    pub max_backoff: Duration,
    /// Randomization factor in `[0, 1)`: each delay is multiplied by a
    /// uniform draw from `[1 - f, 1 + f)`.
    pub random_factor: f64,
    /// Restarts tolerated before supervision gives up.
    pub max_retries: u32,
}

impl Default for BackoffPolicy {
    /// Returns a policy with:
    /// - `min_backoff = 100ms`;
    /// - `max_backoff = 30s`;
    /// - `random_factor = 0.1`;
    /// - `max_retries = 10`.
    fn default() -> Self {
        Self {
            min_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(30),
            random_factor: 0.1,
            max_retries: 10,
        }
    }
}

impl BackoffPolicy {
    /// Computes the delay before restart number `attempt` (zero-based).
    ///
    /// The exponential term saturates rather than overflows: past the point
    /// where `min_backoff · 2^attempt` exceeds `max_backoff`, the result is
    /// pinned at `max_backoff` regardless of the draw.
    pub fn delay(&self, attempt: u32) -> Duration {
        let base_ms = duration_ms(self.min_backoff)
            .saturating_mul(1u64.checked_shl(attempt).unwrap_or(u64::MAX));
        let max_ms = duration_ms(self.max_backoff);

        let factor = self.random_factor.clamp(0.0, 1.0 - f64::EPSILON);
        let scaled = if factor > 0.0 {
            let draw = rand::rng().random_range((1.0 - factor)..(1.0 + factor));
            let ms = (base_ms as f64) * draw;
            if ms.is_finite() { ms as u64 } else { u64::MAX }
        } else {
            base_ms
        };

        Duration::from_millis(scaled.min(max_ms))
    }

    /// True once `attempt` (zero-based failure count) exceeds the cap.
    pub fn exhausted(&self, attempts: u32) -> bool {
        attempts > self.max_retries
    }
}

fn duration_ms(d: Duration) -> u64 {
    d.as_millis().min(u128::from(u64::MAX)) as u64
}
