//! # Lifecycle events emitted by the window actor.
//!
//! Every state-machine transition that matters to an observer is published
//! to the session's [`Listener`](crate::Listener) as a
//! [`WindowEvent`]. Terminal events (`Advanced`, `Closed`) carry a
//! [`WindowData`] payload: the full contents of the window that just ended,
//! in delivery order, plus the configured window width.
//!
//! ## Ordering
//! Events for one actor are emitted in causal order: `Opened` precedes any
//! `AddedToWindow` for that window; `Advanced`/`Closed` follow the last
//! `AddedToWindow`; matcher side-effects are published to the bus before
//! the actor dequeues its next message. No ordering holds across actors.

use std::time::Duration;

use crate::signals::signal::HealthSignal;
use crate::window::window::Window;

/// Payload of a terminal window event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowData {
    /// The ended window's signals in delivery order.
    pub signals: Vec<HealthSignal>,
    /// Configured window width.
    pub frequency: Duration,
}

impl WindowData {
    pub(crate) fn new(signals: Vec<HealthSignal>, frequency: Duration) -> Self {
        Self { signals, frequency }
    }
}

/// Lifecycle event of one windowing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowEvent {
    /// A window was installed and is now accumulating signals.
    Opened {
        /// The freshly opened window.
        window: Window,
    },
    /// The previous window rolled into `window`; `data` holds the
    /// predecessor's full contents.
    Advanced {
        /// The successor window now accumulating signals.
        window: Window,
        /// Contents of the window that was advanced away from.
        data: WindowData,
    },
    /// The current window was closed without an installed successor.
    Closed {
        /// The closed window (bounds as at close time).
        window: Window,
        /// The closed window's contents.
        data: WindowData,
    },
    /// A signal was appended to the current window.
    AddedToWindow {
        /// The appended signal.
        signal: HealthSignal,
        /// The window after the append.
        window: Window,
    },
    /// Processing was paused; signals arriving now are parked.
    Paused {
        /// The window held while paused.
        window: Window,
    },
    /// Processing resumed after a pause.
    Resumed {
        /// The window accumulation resumes into.
        window: Window,
    },
    /// The actor terminated. Emitted last; `window` is the window that was
    /// current at stop time, if any.
    Stopped {
        /// The window open at stop time, if any.
        window: Option<Window>,
    },
}

impl WindowEvent {
    /// Returns a short stable label (snake_case) for logs/metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            WindowEvent::Opened { .. } => "opened",
            WindowEvent::Advanced { .. } => "advanced",
            WindowEvent::Closed { .. } => "closed",
            WindowEvent::AddedToWindow { .. } => "added_to_window",
            WindowEvent::Paused { .. } => "paused",
            WindowEvent::Resumed { .. } => "resumed",
            WindowEvent::Stopped { .. } => "stopped",
        }
    }
}
