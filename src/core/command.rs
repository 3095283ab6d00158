//! # Mailbox commands of the window actor.
//!
//! Everything the actor does, it does in response to a [`Command`]. Caller
//! commands arrive through the handle; the actor also posts commands to
//! itself to split a transition into mailbox-serialised steps (open after
//! start, append after signal, advance after append, close after tick).
//!
//! Self-posted commands carry the identity of the window they were computed
//! against (`opened_at`/`closed_start`): if the window has moved on by the
//! time the command is dequeued, the command is stale and becomes a no-op
//! (or re-routes its signal) instead of acting on the wrong window.

use std::time::{Duration, SystemTime};

use tokio::sync::oneshot;

use crate::events::listener::ListenerRef;
use crate::signals::signal::HealthSignal;
use crate::window::window::{Window, WindowSnapshot};

/// A message processed by the window actor, one at a time, in FIFO order.
pub(crate) enum Command {
    /// Begin a session with the initial window. Valid only once, in the
    /// initializing phase; the listener is installed and never replaced.
    Start {
        window: Window,
        listener: Option<ListenerRef>,
    },
    /// Install a window and begin accumulating. Self-posted by `Start` and
    /// by the ready-path of `Advance`. `pending` is a signal to re-deliver
    /// into the fresh window before any parked ones.
    Open {
        window: Window,
        pending: Option<HealthSignal>,
    },
    /// An inbound health signal from a caller.
    Signal(HealthSignal),
    /// Append a signal to the window opened at `opened_at`. Self-posted by
    /// `Signal` while windowing.
    Append {
        signal: HealthSignal,
        opened_at: SystemTime,
    },
    /// Roll the window that started at `closed_start` into `next`.
    /// Self-posted after an append-triggered or forced advance decision.
    Advance {
        closed_start: SystemTime,
        next: Window,
    },
    /// Close the window opened at `opened_at`; when `advance` is set, a
    /// forced advance follows. Self-posted by `Tick`.
    Close {
        opened_at: SystemTime,
        advance: bool,
    },
    /// Close whatever window is current, with a forced advance. Caller
    /// command; a no-op when no window is open (repeat closes are safe).
    CloseCurrent,
    /// Drop the current window's accumulated data (bounds kept) and pause.
    Flush,
    /// Pause processing; a one-shot timer posts `Resume` after the delay.
    Pause(Duration),
    /// Resume windowing after a pause. Posted by the pause timer.
    Resume,
    /// Periodic expiry check.
    Tick,
    /// Read-only query answered within the same message turn.
    Snapshot(oneshot::Sender<Option<WindowSnapshot>>),
    /// Graceful termination: close a live window, emit the terminal event,
    /// stop. Parked signals are discarded.
    Stop,
}

impl Command {
    /// Returns a short stable label (snake_case) for logs.
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Command::Start { .. } => "start",
            Command::Open { .. } => "open",
            Command::Signal(_) => "signal",
            Command::Append { .. } => "append",
            Command::Advance { .. } => "advance",
            Command::Close { .. } => "close",
            Command::CloseCurrent => "close_current",
            Command::Flush => "flush",
            Command::Pause(_) => "pause",
            Command::Resume => "resume",
            Command::Tick => "tick",
            Command::Snapshot(_) => "snapshot",
            Command::Stop => "stop",
        }
    }
}
