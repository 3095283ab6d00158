//! # Lifecycle event sink.
//!
//! [`Listener`] is the extension point for observing a windowing session.
//! The actor holds one listener per session, installed once at start and
//! never replaced; the listener owns its own delivery machinery.
//!
//! ## Rules
//! - `accept` is awaited inside the actor's message turn, so a listener
//!   should hand the event off quickly (queue it, send it on a channel)
//!   rather than do slow work inline.
//! - Delivery failures are the listener's problem to report; the engine
//!   logs and moves on. Each event attempt is independent.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::events::event::WindowEvent;

/// Shared handle to a lifecycle event sink.
pub type ListenerRef = Arc<dyn Listener>;

/// Receives the lifecycle events of one windowing session.
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Processes a single lifecycle event.
    async fn accept(&self, event: &WindowEvent);

    /// Returns the listener name for logging.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Adapter delivering events onto an unbounded mpsc channel.
///
/// This is what the handle wraps around a caller-provided reply channel at
/// start time. A closed receiver makes delivery a logged no-op; the engine
/// keeps running and later events are attempted independently.
pub struct ChannelListener {
    tx: mpsc::UnboundedSender<WindowEvent>,
}

impl ChannelListener {
    /// Wraps a reply channel.
    pub fn new(tx: mpsc::UnboundedSender<WindowEvent>) -> Self {
        Self { tx }
    }

    /// Convenience constructor returning the adapter together with the
    /// receiving half.
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<WindowEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl Listener for ChannelListener {
    async fn accept(&self, event: &WindowEvent) {
        if self.tx.send(event.clone()).is_err() {
            log::warn!(
                "listener: reply channel closed, dropping '{}' event",
                event.kind()
            );
        }
    }

    fn name(&self) -> &'static str {
        "channel"
    }
}
