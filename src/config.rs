//! # Engine configuration.
//!
//! Provides [`Config`], the centralized settings bundle handed to
//! [`WindowHandle::spawn`](crate::WindowHandle::spawn).
//!
//! ## Field semantics
//! - `frequency`: window width; every window spans exactly this much time.
//! - `initial_processing_delay`: quiet period before the first periodic tick.
//! - `resume_processing_delay`: pause length scheduled after a flush before
//!   the actor resumes windowing.
//! - `tick_interval`: period of the expiry-checking tick.
//! - `snapshot_timeout`: bound on the `snapshot()` ask.
//! - `bus_capacity`: ring-buffer size of the side-effect signal bus (min 1;
//!   clamped by the bus).
//! - `backoff`: restart policy applied by the supervisor.

use std::time::Duration;

use crate::policies::BackoffPolicy;

/// Configuration for one windowing engine instance.
///
/// All fields are public for flexibility; prefer the helper accessors where
/// clamping matters.
#[derive(Clone, Debug)]
pub struct Config {
    /// Window width. Each window covers `[start, start + frequency)`.
    pub frequency: Duration,

    /// Delay before the first periodic tick after `start`.
    ///
    /// Gives the surrounding system time to settle before expiry checks
    /// begin; signals received in the meantime are windowed normally.
    pub initial_processing_delay: Duration,

    /// Pause length scheduled after a flush.
    ///
    /// A flush clears the current window's data and pauses the actor; a
    /// one-shot timer resumes it after this delay.
    pub resume_processing_delay: Duration,

    /// Period of the expiry-checking tick.
    pub tick_interval: Duration,

    /// Maximum time a `snapshot()` query may take before it fails with a
    /// timeout. The actor is unaffected by an expired query.
    pub snapshot_timeout: Duration,

    /// Capacity of the side-effect signal bus ring buffer.
    ///
    /// Subscribers lagging behind more than this many signals skip older
    /// items. Minimum value is 1 (enforced by the bus).
    pub bus_capacity: usize,

    /// Restart backoff applied by the supervisor on actor failure.
    pub backoff: BackoffPolicy,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `frequency = 10s`
    /// - `initial_processing_delay = 30s`
    /// - `resume_processing_delay = 30s`
    /// - `tick_interval = 1s`
    /// - `snapshot_timeout = 3s`
    /// - `bus_capacity = 1024`
    /// - `backoff = BackoffPolicy::default()`
    fn default() -> Self {
        Self {
            frequency: Duration::from_secs(10),
            initial_processing_delay: Duration::from_secs(30),
            resume_processing_delay: Duration::from_secs(30),
            tick_interval: Duration::from_secs(1),
            snapshot_timeout: Duration::from_secs(3),
            bus_capacity: 1024,
            backoff: BackoffPolicy::default(),
        }
    }
}
