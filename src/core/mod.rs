//! Engine core: the window actor, its supervision envelope, and the handle.
//!
//! The only public API re-exported from here is [`WindowHandle`]. Everything
//! else is an internal building block the handle wires together.
//!
//! ## Files & responsibilities
//! - **handle.rs**: public façade; spawns the supervised actor, schedules
//!   the periodic tick, forwards commands fire-and-forget, answers bounded
//!   snapshot queries.
//! - **supervisor.rs**: restart envelope; exponential backoff with jitter,
//!   capped retries, fresh actor state per attempt (in-flight window lost),
//!   mailbox kept across restarts.
//! - **actor.rs**: the state machine; one FIFO mailbox, stash/unstash,
//!   per-command handlers, matcher invocation and side-effect publishing at
//!   close/advance, lifecycle event emission.
//! - **command.rs**: the tagged mailbox message set, including the actor's
//!   identity-carrying self-posts.
//! - **state.rs**: the phase enum and the session scratchpad.
//!
//! ## Wiring
//! ```text
//! caller ──► WindowHandle ── mpsc ──► WindowSupervisor ──► WindowActor
//!               │                          │ (restart on invariant
//!               │ tick loop (tokio)        │  violation, backoff, cap)
//!               └── Tick ──────────────────┘
//!
//! WindowActor per turn:
//!   dequeue command ──► transition ──► emit WindowEvent ──► Listener
//!                              └──► matcher.search ──► SignalBus.publish
//! ```
//!
//! ## Command journey (happy path)
//! ```text
//! start ─► Start ─► Open ─► Opened
//! process_signal ─► Signal ─► Append ─► AddedToWindow
//! tick (expired) ─► Close ─► Closed ─► Advance ─► Advanced ─► Open ─► Opened
//! flush ─► Flush ─► Pause ─► Paused ─ timer ─► Resume ─► Resumed
//! stop ─► Stop ─► [Closed] ─► Stopped
//! ```

mod actor;
mod command;
mod handle;
mod state;
mod supervisor;

pub use handle::WindowHandle;
