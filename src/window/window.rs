//! # Window: a half-open time span accumulating signals.
//!
//! A [`Window`] covers `[start, end)` with `end = start + frequency`.
//! Signals are appended in delivery order and may contain duplicates.
//! When a window advances, the successor keeps a copy of the predecessor's
//! data in `prior_data` (informational only).
//!
//! ## Rules
//! - `end > start` always.
//! - `data` and `prior_data` never shrink during a window's lifetime,
//!   except on an explicit flush.
//! - A freshly built window has empty `data`; `prior_data` is assigned by
//!   its predecessor at advance time.

use std::time::{Duration, SystemTime};

use crate::signals::signal::HealthSignal;

/// Read-only value copy of a window's accumulated signals.
///
/// This is the only view of window contents external callers ever get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowSnapshot {
    /// Accumulated signals in append order.
    pub data: Vec<HealthSignal>,
}

/// A half-open time interval `[start, end)` accumulating health signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    start: SystemTime,
    end: SystemTime,
    data: Vec<HealthSignal>,
    prior_data: Vec<HealthSignal>,
}

impl Window {
    /// Builds the window `[now, now + frequency)` with no data.
    ///
    /// `frequency` must be non-zero; a zero-width window can never hold the
    /// `end > start` invariant and is rejected by clamping to 1ms.
    pub fn starting_at(now: SystemTime, frequency: Duration) -> Self {
        let width = if frequency.is_zero() {
            Duration::from_millis(1)
        } else {
            frequency
        };
        Self {
            start: now,
            end: now + width,
            data: Vec::new(),
            prior_data: Vec::new(),
        }
    }

    /// Inclusive lower bound.
    pub fn start(&self) -> SystemTime {
        self.start
    }

    /// Exclusive upper bound.
    pub fn end(&self) -> SystemTime {
        self.end
    }

    /// Window width (`end - start`).
    pub fn duration(&self) -> Duration {
        self.end
            .duration_since(self.start)
            .unwrap_or(Duration::ZERO)
    }

    /// True once `at` has reached the exclusive upper bound.
    pub fn expired(&self, at: SystemTime) -> bool {
        at >= self.end
    }

    /// Accumulated signals in append order.
    pub fn data(&self) -> &[HealthSignal] {
        &self.data
    }

    /// Data handed over by the predecessor window at advance time.
    pub fn prior_data(&self) -> &[HealthSignal] {
        &self.prior_data
    }

    /// Appends a signal. Never reorders, never deduplicates.
    pub(crate) fn push(&mut self, signal: HealthSignal) {
        self.data.push(signal);
    }

    /// Drops accumulated data, preserving the window bounds. Flush only.
    pub(crate) fn clear_data(&mut self) {
        self.data.clear();
    }

    /// Installs the predecessor's data snapshot.
    pub(crate) fn set_prior_data(&mut self, prior: Vec<HealthSignal>) {
        self.prior_data = prior;
    }

    /// Read-only value copy of the accumulated data.
    pub fn snapshot(&self) -> WindowSnapshot {
        WindowSnapshot {
            data: self.data.clone(),
        }
    }

    /// Stable label for logs and source attribution, e.g.
    /// `window[1706000000.000..1706000010.000)`.
    pub fn label(&self) -> String {
        format!(
            "window[{:.3}..{:.3})",
            unix_secs(self.start),
            unix_secs(self.end)
        )
    }
}

fn unix_secs(t: SystemTime) -> f64 {
    t.duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
