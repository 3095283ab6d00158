//! # State-machine scratchpad of the window actor.
//!
//! The actor's behaviour is a function of its [`Phase`] plus the
//! [`WindowState`] it threads through every transition. Phases:
//!
//! ```text
//! initializing ──Start──► ready ──Open──► windowing ◄──Resume──┐
//!                           ▲                │                 │
//!                           └────Close───────┤──Pause──► pausing
//! ```
//!
//! ## Rules
//! - `window` is `Some` in windowing and pausing, `None` in ready between
//!   windows and before the first open.
//! - `listener` is installed once by `Start` and never mutated afterward.
//! - `closing` bridges a close-with-advance and the `Advance` that consumes
//!   it: the closed window is parked there so the matcher sees its full
//!   data, and a duplicate `Advance` finds it already taken.

use crate::events::listener::ListenerRef;
use crate::window::window::Window;

/// The actor's current mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Waiting for `Start`; signals are parked.
    Initializing,
    /// Between windows; signals are parked.
    Ready,
    /// Accumulating into the current window.
    Windowing,
    /// Paused; signals are parked until the next open/advance.
    Pausing,
}

impl Phase {
    /// Returns a short stable label (snake_case) for logs.
    pub(crate) fn as_label(&self) -> &'static str {
        match self {
            Phase::Initializing => "initializing",
            Phase::Ready => "ready",
            Phase::Windowing => "windowing",
            Phase::Pausing => "pausing",
        }
    }
}

/// Mutable session state owned exclusively by the actor.
pub(crate) struct WindowState {
    /// The window currently accumulating signals, if any.
    pub window: Option<Window>,
    /// Lifecycle event sink, installed once at start.
    pub listener: Option<ListenerRef>,
    /// A closed window awaiting its follow-up advance.
    pub closing: Option<Window>,
}

impl WindowState {
    pub(crate) fn new() -> Self {
        Self {
            window: None,
            listener: None,
            closing: None,
        }
    }
}
