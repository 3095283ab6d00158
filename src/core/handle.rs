//! # WindowHandle: the external façade of one windowing engine.
//!
//! The handle is the only thing callers touch. It spawns the supervised
//! actor, schedules the periodic expiry tick, forwards commands
//! fire-and-forget, and answers bounded snapshot queries.
//!
//! ## Rules
//! - Command senders (`process_signal`, `flush`, `pause`, `close_window`,
//!   `tick`, `stop`) enqueue and return immediately; they are safe to call
//!   after the engine died (the command is dropped with a debug log).
//! - `snapshot()` is the only suspension visible to callers; it is bounded
//!   by the configured ask timeout.
//! - `stop()` is graceful and idempotent; `terminate()` is hard (no
//!   terminal events).

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, oneshot};
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::clock::ClockRef;
use crate::config::Config;
use crate::core::actor::ActorDeps;
use crate::core::command::Command;
use crate::core::supervisor::WindowSupervisor;
use crate::error::EngineError;
use crate::events::listener::ListenerRef;
use crate::matcher::MatcherRef;
use crate::signals::bus::SignalBus;
use crate::signals::signal::HealthSignal;
use crate::window::advancer::AdvancerRef;
use crate::window::window::{Window, WindowSnapshot};

/// Handle to one supervised windowing engine.
///
/// ```no_run
/// use std::sync::Arc;
/// use sigvisor::{
///     ChannelListener, Config, CountAdvancer, SignalBus, SystemClock, ThresholdMatcher,
///     WindowHandle,
/// };
///
/// # async fn demo() {
/// let cfg = Config::default();
/// let bus = SignalBus::new(cfg.bus_capacity_clamped());
/// let engine = WindowHandle::spawn(
///     cfg,
///     Arc::new(CountAdvancer::new(100)),
///     Arc::new(ThresholdMatcher::new("disk.full", 3, "disk.alert")),
///     bus.clone(),
///     Arc::new(SystemClock),
/// );
///
/// let (listener, mut events) = ChannelListener::pair();
/// engine.start(Some(Arc::new(listener)));
/// # }
/// ```
pub struct WindowHandle {
    tx: mpsc::UnboundedSender<Command>,
    shutdown: CancellationToken,
    /// Child of `shutdown` scoped to the tick loop, so a graceful stop can
    /// cancel the periodic tick without tearing the actor down.
    tick_token: CancellationToken,
    clock: ClockRef,
    cfg: Config,
    ticking: AtomicBool,
}

impl WindowHandle {
    /// Spawns the supervised actor and returns its handle.
    ///
    /// The engine is idle until [`start`](Self::start) is called; signals
    /// sent before that are parked and delivered into the first window.
    pub fn spawn(
        cfg: Config,
        advancer: AdvancerRef,
        matcher: MatcherRef,
        bus: SignalBus,
        clock: ClockRef,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let tick_token = shutdown.child_token();

        let deps = ActorDeps {
            advancer,
            matcher,
            bus,
            clock: clock.clone(),
            frequency: cfg.frequency,
            resume_delay: cfg.resume_processing_delay,
            self_tx: tx.clone(),
        };
        WindowSupervisor::new(cfg.backoff, deps).spawn(rx, shutdown.clone());

        Self {
            tx,
            shutdown,
            tick_token,
            clock,
            cfg,
            ticking: AtomicBool::new(false),
        }
    }

    /// Begins the session: builds the initial window at `clock.now()`,
    /// installs the listener, and schedules the periodic tick
    /// (first fire after `initial_processing_delay`, then every
    /// `tick_interval`).
    ///
    /// Wrap a reply channel in [`ChannelListener`](crate::ChannelListener)
    /// to receive lifecycle events; pass `None` to run without an observer.
    pub fn start(&self, listener: Option<ListenerRef>) -> &Self {
        let window = Window::starting_at(self.clock.now(), self.cfg.frequency);
        self.send(Command::Start { window, listener });
        self.spawn_tick_loop();
        self
    }

    /// Routes a health signal into the current window (or parks it until
    /// one is open).
    pub fn process_signal(&self, signal: HealthSignal) -> &Self {
        self.send(Command::Signal(signal));
        self
    }

    /// Posts one expiry check. Primarily for tests; production relies on
    /// the periodic tick.
    pub fn tick(&self) -> &Self {
        self.send(Command::Tick);
        self
    }

    /// Drops the current window's accumulated data and pauses processing
    /// for `resume_processing_delay`.
    pub fn flush(&self) -> &Self {
        self.send(Command::Flush);
        self
    }

    /// Pauses processing for `delay`; signals arriving meanwhile are
    /// parked.
    pub fn pause(&self, delay: std::time::Duration) -> &Self {
        self.send(Command::Pause(delay));
        self
    }

    /// Closes the current window and advances into its successor. A no-op
    /// when no window is open, so repeated calls are safe.
    pub fn close_window(&self) -> &Self {
        self.send(Command::CloseCurrent);
        self
    }

    /// Graceful stop: the actor closes a live window, emits `Stopped`, and
    /// terminates; the periodic tick is cancelled. Idempotent.
    pub fn stop(&self) -> &Self {
        self.send(Command::Stop);
        self.tick_token.cancel();
        self
    }

    /// Hard termination: cancels the actor, the supervisor (including a
    /// backoff in progress) and the tick loop without terminal events.
    pub fn terminate(&self) {
        self.shutdown.cancel();
    }

    /// Returns a copy of the current window's data, or `None` when no
    /// window is open.
    ///
    /// # Errors
    /// - [`EngineError::Unavailable`] when the engine stopped, terminated,
    ///   or exhausted its supervised restarts.
    /// - [`EngineError::SnapshotTimeout`] when the actor did not answer
    ///   within `snapshot_timeout`; the actor itself is unaffected.
    pub async fn snapshot(&self) -> Result<Option<WindowSnapshot>, EngineError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Command::Snapshot(reply))
            .map_err(|_| EngineError::Unavailable)?;

        match time::timeout(self.cfg.snapshot_timeout, response).await {
            Ok(Ok(snapshot)) => Ok(snapshot),
            // The actor dropped the query without answering (died or was
            // restarted mid-turn).
            Ok(Err(_)) => Err(EngineError::Unavailable),
            Err(_) => Err(EngineError::SnapshotTimeout {
                timeout: self.cfg.snapshot_timeout,
            }),
        }
    }

    fn send(&self, cmd: Command) {
        let name = cmd.name();
        if self.tx.send(cmd).is_err() {
            log::debug!("handle: engine unavailable, dropping '{name}' command");
        }
    }

    /// Spawns the periodic tick loop once; repeated starts reuse it.
    ///
    /// The loop runs until its token is cancelled — by `stop()` directly,
    /// or through the parent `shutdown` on terminate/drop.
    fn spawn_tick_loop(&self) {
        if self.ticking.swap(true, Ordering::SeqCst) {
            return;
        }
        let tx = self.tx.clone();
        let cancelled = self.tick_token.clone();
        let initial = self.cfg.initial_processing_delay;
        let every = self.cfg.tick_interval;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => return,
                _ = time::sleep(initial) => {}
            }
            let mut ticks = time::interval(every);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = ticks.tick() => {
                        if tx.send(Command::Tick).is_err() {
                            break;
                        }
                    }
                }
            }
        });
    }
}

impl Drop for WindowHandle {
    /// Dropping the handle hard-terminates the engine; use
    /// [`stop`](Self::stop) first for a graceful shutdown. Share the handle
    /// behind an [`Arc`](std::sync::Arc) when multiple owners need it.
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
