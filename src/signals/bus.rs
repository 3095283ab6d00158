//! # Signal bus for republishing synthesized signals.
//!
//! [`SignalBus`] is a wrapper around [`tokio::sync::broadcast`] through
//! which the engine republishes the side-effect signals produced by a
//! pattern matcher at window close/advance time.
//!
//! ## Key characteristics:
//! - **Fire-and-forget**: publishing never blocks and never fails the
//!   engine; an undeliverable signal is logged and dropped.
//! - **Broadcast semantics**: every active subscriber receives a clone of
//!   each signal.
//! - **Non-persistent**: signals published while nobody is subscribed are
//!   lost, which is acceptable for best-effort delivery.
//! - **Bounded capacity**: slow subscribers that lag more than the channel
//!   capacity skip older signals.

use tokio::sync::broadcast;

use crate::signals::signal::HealthSignal;

/// Broadcast channel for synthesized health signals.
///
/// Cheap to clone; the engine and any number of downstream consumers can
/// hold their own copy.
#[derive(Clone)]
pub struct SignalBus {
    tx: broadcast::Sender<HealthSignal>,
}

impl SignalBus {
    /// Creates a new bus with the given channel capacity (min 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publishes a signal to all active subscribers.
    ///
    /// Best-effort: when there are no subscribers the signal is dropped.
    /// The drop is logged at debug level and is never an engine failure.
    pub fn publish(&self, signal: HealthSignal) {
        if let Err(e) = self.tx.send(signal) {
            log::debug!("bus: dropping signal '{}', no subscribers", e.0.name);
        }
    }

    /// Creates a new subscriber receiving all signals published after this
    /// call.
    pub fn subscribe(&self) -> broadcast::Receiver<HealthSignal> {
        self.tx.subscribe()
    }
}
