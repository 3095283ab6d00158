//! # Simple logging listener for debugging and demos.
//!
//! [`LogListener`] writes events through the `log` facade in a
//! human-readable format.
//!
//! ## Output format
//! ```text
//! [opened] window=window[0.000..10.000)
//! [added] signal=db.latency.p99 window=window[0.000..10.000)
//! [closed] window=window[0.000..10.000) signals=3
//! [advanced] window=window[10.000..20.000) prior_signals=3
//! [paused] window=window[10.000..20.000)
//! [stopped]
//! ```

use async_trait::async_trait;

use crate::events::event::WindowEvent;
use crate::events::listener::Listener;

/// Demo listener printing human-readable event lines via `log::info!`.
///
/// Enabled via the `logging` feature. Not intended for production use;
/// implement a custom [`Listener`] for structured delivery.
pub struct LogListener;

#[async_trait]
impl Listener for LogListener {
    async fn accept(&self, event: &WindowEvent) {
        match event {
            WindowEvent::Opened { window } => {
                log::info!("[opened] window={}", window.label());
            }
            WindowEvent::Advanced { window, data } => {
                log::info!(
                    "[advanced] window={} prior_signals={}",
                    window.label(),
                    data.signals.len()
                );
            }
            WindowEvent::Closed { window, data } => {
                log::info!(
                    "[closed] window={} signals={}",
                    window.label(),
                    data.signals.len()
                );
            }
            WindowEvent::AddedToWindow { signal, window } => {
                log::info!("[added] signal={} window={}", signal.name, window.label());
            }
            WindowEvent::Paused { window } => {
                log::info!("[paused] window={}", window.label());
            }
            WindowEvent::Resumed { window } => {
                log::info!("[resumed] window={}", window.label());
            }
            WindowEvent::Stopped { window } => match window {
                Some(w) => log::info!("[stopped] window={}", w.label()),
                None => log::info!("[stopped]"),
            },
        }
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
