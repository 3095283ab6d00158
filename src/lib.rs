//! # sigvisor
//!
//! **Sigvisor** is a health-signal windowing engine.
//!
//! It accumulates observability signals into contiguous tumbling windows,
//! evaluates a pattern matcher over each window's contents when the window
//! closes or advances, and republishes the synthesized side-effect signals
//! on a broadcast bus. The windowing state machine runs as a supervised
//! actor: invariant violations trigger exponential-backoff restarts with a
//! capped retry budget.
//!
//! ## Features
//!
//! | Area            | Description                                                   | Key types / traits                        |
//! |-----------------|---------------------------------------------------------------|-------------------------------------------|
//! | **Windows**     | Half-open tumbling spans accumulating signals.                | [`Window`], [`WindowSnapshot`]            |
//! | **Advancement** | Pluggable policy deciding when a window rolls.                | [`Advancer`], [`TumblingAdvancer`], [`CountAdvancer`] |
//! | **Matching**    | Deterministic scan producing side-effect signals.             | [`PatternMatcher`], [`ThresholdMatcher`]  |
//! | **Events**      | Lifecycle events delivered to a per-session listener.         | [`WindowEvent`], [`Listener`], [`ChannelListener`] |
//! | **Bus**         | Fire-and-forget republish sink for synthesized signals.       | [`SignalBus`]                             |
//! | **Supervision** | Backoff restart envelope around the windowing actor.          | [`BackoffPolicy`]                         |
//! | **Handle**      | External façade: start, signals, tick, flush, pause, snapshot.| [`WindowHandle`]                          |
//! | **Errors**      | Typed errors per failure domain.                              | [`EngineError`], [`MatchError`]           |
//! | **Time**        | Injectable clock for deterministic tests.                     | [`Clock`], [`SystemClock`], [`ManualClock`] |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogListener`] _(demo/reference only)_.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::{Duration, SystemTime};
//! use sigvisor::{
//!     ChannelListener, Config, HealthSignal, SignalBus, SystemClock, ThresholdMatcher,
//!     TumblingAdvancer, WindowHandle,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut cfg = Config::default();
//!     cfg.frequency = Duration::from_secs(10);
//!
//!     let clock = Arc::new(SystemClock);
//!     let bus = SignalBus::new(cfg.bus_capacity_clamped());
//!     let mut side_effects = bus.subscribe();
//!
//!     let engine = WindowHandle::spawn(
//!         cfg,
//!         Arc::new(TumblingAdvancer::new(clock.clone())),
//!         Arc::new(ThresholdMatcher::new("heartbeat.missed", 3, "node.unhealthy")),
//!         bus,
//!         clock,
//!     );
//!
//!     let (listener, mut events) = ChannelListener::pair();
//!     engine.start(Some(Arc::new(listener)));
//!     engine.process_signal(
//!         HealthSignal::new("heartbeat.missed", SystemTime::now()).with_source("node-7"),
//!     );
//!
//!     // Lifecycle events arrive on `events`, synthesized signals on
//!     // `side_effects`.
//!     let _ = events.recv().await;
//!     let _ = side_effects.try_recv();
//!
//!     engine.stop();
//! }
//! ```
//!
//! ---

mod clock;
mod config;
mod core;
mod error;
mod events;
mod matcher;
mod policies;
mod signals;
mod window;

// ---- Public re-exports ----

pub use crate::core::WindowHandle;
pub use clock::{Clock, ClockRef, ManualClock, SystemClock};
pub use config::Config;
pub use error::{EngineError, MatchError};
pub use events::{ChannelListener, Listener, ListenerRef, WindowData, WindowEvent};
pub use matcher::{
    MatcherRef, PatternMatcher, SideEffect, SignalMatch, SignalPatternMatchResult,
    ThresholdMatcher,
};
pub use policies::BackoffPolicy;
pub use signals::{HealthSignal, SignalBus};
pub use window::{Advancer, AdvancerRef, CountAdvancer, TumblingAdvancer, Window, WindowSnapshot};

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use events::LogListener;
