//! Window lifecycle events and their sinks.
//!
//! - [`event`]: the tagged [`WindowEvent`] schema emitted by the actor.
//! - [`listener`]: the [`Listener`] sink trait and the channel adapter the
//!   handle wraps around a caller-provided reply channel.
//! - [`log`]: a demo listener printing events through the `log` facade
//!   (feature `logging`).

pub mod event;
pub mod listener;

#[cfg(feature = "logging")]
pub mod log;

pub use event::{WindowData, WindowEvent};
pub use listener::{ChannelListener, Listener, ListenerRef};

#[cfg(feature = "logging")]
pub use log::LogListener;
