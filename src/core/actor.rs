//! # WindowActor: the windowing state machine.
//!
//! Owns one window at a time, consumes [`Command`]s from a single logical
//! FIFO mailbox, drives phase transitions, emits lifecycle events, and runs
//! the pattern matcher at close/advance time.
//!
//! ## Mailbox
//! The external mpsc channel is drained into an internal queue; self-posted
//! commands go to the queue tail. This reproduces a classic actor mailbox:
//! one message processed to completion at a time, self-posts serialised
//! behind whatever was already enqueued. Stale self-posts (their window has
//! moved on) degrade to no-ops instead of acting on the wrong window.
//!
//! ## Stash
//! Signals that arrive while the actor cannot append (initializing, ready,
//! pausing) are parked and re-delivered in order the next time a window is
//! installed (`Open`) or rolled (`Advance`). `Resume` does NOT re-deliver
//! parked signals; they wait for the next open/advance.
//!
//! ## Event flow
//! ```text
//! Start ──► Open ──► Opened
//! Signal ──► Append ──► AddedToWindow ──(policy says roll)──► Advance
//! Advance ──► Advanced ──► matcher ──► bus.publish(side-effects)
//! Tick(expired) ──► Close ──► Closed ──► Advance ──► Open ──► Opened
//! Flush ──► Pause ──► Paused ──(timer)──► Resume ──► Resumed
//! Stop ──► [Closed] ──► Stopped
//! ```
//!
//! ## Rules
//! - Exactly one terminal event (`Advanced` or `Closed`) carries each
//!   window's data, in delivery order.
//! - Consecutive windows are contiguous: each successor starts where its
//!   predecessor ended. The actor validates this against the advancement
//!   policy and fails (supervised restart) on a contract violation.
//! - Matcher and bus failures are contained; only invariant violations
//!   escalate.

use std::collections::VecDeque;
use std::time::{Duration, SystemTime};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::clock::ClockRef;
use crate::core::command::Command;
use crate::core::state::{Phase, WindowState};
use crate::error::ActorError;
use crate::events::event::{WindowData, WindowEvent};
use crate::events::listener::ListenerRef;
use crate::matcher::MatcherRef;
use crate::signals::bus::SignalBus;
use crate::signals::signal::HealthSignal;
use crate::window::advancer::AdvancerRef;
use crate::window::window::Window;

/// Collaborators and settings shared across restarts of one actor.
#[derive(Clone)]
pub(crate) struct ActorDeps {
    /// Advancement policy consulted on append and forced on close.
    pub advancer: AdvancerRef,
    /// Pattern matcher run over every closed/advanced window.
    pub matcher: MatcherRef,
    /// Sink for synthesized side-effect signals.
    pub bus: SignalBus,
    /// Injected time source for expiry checks.
    pub clock: ClockRef,
    /// Configured window width.
    pub frequency: Duration,
    /// Pause length scheduled after a flush.
    pub resume_delay: Duration,
    /// Sender looping back into this actor's own mailbox (pause timer).
    pub self_tx: mpsc::UnboundedSender<Command>,
}

/// Why the actor's run loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActorExit {
    /// Graceful `Stop` command processed.
    Stopped,
    /// The mailbox sender side was dropped; nobody can reach the actor.
    Detached,
    /// The engine's cancellation token fired (terminate).
    Terminated,
}

impl ActorExit {
    pub(crate) fn as_label(&self) -> &'static str {
        match self {
            ActorExit::Stopped => "stopped",
            ActorExit::Detached => "detached",
            ActorExit::Terminated => "terminated",
        }
    }
}

/// The windowing state machine. One instance per supervised attempt; a
/// restart builds a fresh one (prior window, queue and stash are lost).
pub(crate) struct WindowActor {
    deps: ActorDeps,
    phase: Phase,
    state: WindowState,
    queue: VecDeque<Command>,
    stash: Vec<HealthSignal>,
}

impl WindowActor {
    pub(crate) fn new(deps: ActorDeps) -> Self {
        Self {
            deps,
            phase: Phase::Initializing,
            state: WindowState::new(),
            queue: VecDeque::new(),
            stash: Vec::new(),
        }
    }

    /// Runs the actor until stop, detach, terminate, or an invariant
    /// violation (`Err`). The mailbox receiver is borrowed so it survives a
    /// supervised restart.
    pub(crate) async fn run(
        &mut self,
        rx: &mut mpsc::UnboundedReceiver<Command>,
        shutdown: &CancellationToken,
    ) -> Result<ActorExit, ActorError> {
        loop {
            // Pull fresh arrivals behind whatever is already queued so the
            // internal queue stays one FIFO mailbox.
            while let Ok(cmd) = rx.try_recv() {
                self.queue.push_back(cmd);
            }

            let cmd = match self.queue.pop_front() {
                Some(cmd) => cmd,
                None => {
                    tokio::select! {
                        biased;
                        maybe = rx.recv() => match maybe {
                            Some(cmd) => cmd,
                            None => return Ok(ActorExit::Detached),
                        },
                        _ = shutdown.cancelled() => return Ok(ActorExit::Terminated),
                    }
                }
            };

            log::trace!(
                "actor: phase={} command={}",
                self.phase.as_label(),
                cmd.name()
            );
            if let Some(exit) = self.handle_command(cmd).await? {
                return Ok(exit);
            }
        }
    }

    async fn handle_command(&mut self, cmd: Command) -> Result<Option<ActorExit>, ActorError> {
        match cmd {
            Command::Start { window, listener } => self.on_start(window, listener)?,
            Command::Open { window, pending } => self.on_open(window, pending).await?,
            Command::Signal(signal) => self.on_signal(signal),
            Command::Append { signal, opened_at } => self.on_append(signal, opened_at).await?,
            Command::Advance { closed_start, next } => self.on_advance(closed_start, next).await,
            Command::Close { opened_at, advance } => self.on_close(opened_at, advance).await?,
            Command::CloseCurrent => self.on_close_current().await?,
            Command::Flush => self.on_flush(),
            Command::Pause(delay) => self.on_pause(delay).await,
            Command::Resume => self.on_resume().await,
            Command::Tick => self.on_tick(),
            Command::Snapshot(reply) => {
                let snap = self.state.window.as_ref().map(|w| w.snapshot());
                // A dropped receiver means the ask timed out; nothing to do.
                let _ = reply.send(snap);
            }
            Command::Stop => return Ok(Some(self.on_stop().await)),
        }
        Ok(None)
    }

    // ---- command handlers -------------------------------------------------

    fn on_start(
        &mut self,
        window: Window,
        listener: Option<ListenerRef>,
    ) -> Result<(), ActorError> {
        if self.phase != Phase::Initializing {
            return Err(self.invalid("start"));
        }
        self.state.listener = listener;
        self.phase = Phase::Ready;
        self.post(Command::Open {
            window,
            pending: None,
        });
        Ok(())
    }

    async fn on_open(
        &mut self,
        window: Window,
        pending: Option<HealthSignal>,
    ) -> Result<(), ActorError> {
        if self.phase != Phase::Ready {
            return Err(self.invalid("open"));
        }
        self.state.window = Some(window.clone());
        self.phase = Phase::Windowing;
        self.emit(WindowEvent::Opened { window }).await;
        self.unstash();
        if let Some(signal) = pending {
            self.queue.push_front(Command::Signal(signal));
        }
        Ok(())
    }

    fn on_signal(&mut self, signal: HealthSignal) {
        if self.phase == Phase::Windowing {
            if let Some(opened_at) = self.state.window.as_ref().map(|w| w.start()) {
                self.post(Command::Append { signal, opened_at });
                return;
            }
        }
        self.stash.push(signal);
    }

    async fn on_append(
        &mut self,
        signal: HealthSignal,
        opened_at: SystemTime,
    ) -> Result<(), ActorError> {
        let aimed_at_current = self.phase == Phase::Windowing
            && self
                .state
                .window
                .as_ref()
                .is_some_and(|w| w.start() == opened_at);
        if !aimed_at_current {
            // The window this append was aimed at is gone; route the signal
            // into whatever comes next instead of dropping it.
            log::debug!(
                "actor: re-routing signal '{}' past a gone window",
                signal.name
            );
            self.on_signal(signal);
            return Ok(());
        }

        let window = {
            let current = self.state.window.as_mut().expect("checked above");
            current.push(signal.clone());
            current.clone()
        };
        self.emit(WindowEvent::AddedToWindow { signal, window })
            .await;

        let decision = {
            let current = self.state.window.as_ref().expect("checked above");
            match self.deps.advancer.advance(current, false) {
                Some(next) => Some((current.start(), self.contiguous(current, next)?)),
                None => None,
            }
        };
        if let Some((closed_start, next)) = decision {
            self.post(Command::Advance { closed_start, next });
        }
        Ok(())
    }

    async fn on_advance(&mut self, closed_start: SystemTime, next: Window) {
        let rolls_current = self.phase == Phase::Windowing
            && self
                .state
                .window
                .as_ref()
                .is_some_and(|w| w.start() == closed_start);
        let follows_close = self.phase == Phase::Ready
            && self
                .state
                .closing
                .as_ref()
                .is_some_and(|w| w.start() == closed_start);

        if rolls_current {
            // Roll in place. The current window's data is authoritative: it
            // may have grown since the advance was posted.
            let closed = self.state.window.take().expect("checked above");
            let data = closed.data().to_vec();

            let mut next = next;
            next.set_prior_data(data.clone());
            self.state.window = Some(next.clone());

            self.emit(WindowEvent::Advanced {
                window: next,
                data: WindowData::new(data, self.deps.frequency),
            })
            .await;
            self.run_matcher(&closed);
            self.unstash();
        } else if follows_close {
            let closed = self.state.closing.take().expect("checked above");
            let mut next = next;
            next.set_prior_data(closed.data().to_vec());

            self.emit(WindowEvent::Advanced {
                window: next.clone(),
                data: WindowData::new(closed.data().to_vec(), self.deps.frequency),
            })
            .await;
            self.run_matcher(&closed);
            self.post(Command::Open {
                window: next,
                pending: None,
            });
        } else {
            // A later command already advanced or closed that window.
            log::debug!(
                "actor: ignoring stale advance in phase {}",
                self.phase.as_label()
            );
        }
    }

    async fn on_close(&mut self, opened_at: SystemTime, advance: bool) -> Result<(), ActorError> {
        let aimed_at_current = self.phase == Phase::Windowing
            && self
                .state
                .window
                .as_ref()
                .is_some_and(|w| w.start() == opened_at);
        if aimed_at_current {
            self.close_current(advance).await?;
        } else {
            log::debug!(
                "actor: ignoring stale close in phase {}",
                self.phase.as_label()
            );
        }
        Ok(())
    }

    async fn on_close_current(&mut self) -> Result<(), ActorError> {
        if self.phase == Phase::Windowing && self.state.window.is_some() {
            self.close_current(true).await?;
        } else {
            // Repeated closes are safe: nothing is open, nothing happens.
            log::debug!(
                "actor: no window to close in phase {}",
                self.phase.as_label()
            );
        }
        Ok(())
    }

    /// Closes the current window: emits `Closed`, returns to ready, and
    /// either schedules the forced advance or runs the matcher right away.
    async fn close_current(&mut self, advance: bool) -> Result<(), ActorError> {
        let closed = self.state.window.take().expect("close requires a window");
        self.phase = Phase::Ready;
        self.emit(WindowEvent::Closed {
            window: closed.clone(),
            data: WindowData::new(closed.data().to_vec(), self.deps.frequency),
        })
        .await;

        if advance {
            let next = match self.deps.advancer.advance(&closed, true) {
                Some(next) => self.contiguous(&closed, next)?,
                None => {
                    return Err(ActorError::AdvancerContract {
                        reason: "forced advance returned no successor".to_string(),
                    })
                }
            };
            let closed_start = closed.start();
            self.state.closing = Some(closed);
            self.post(Command::Advance { closed_start, next });
        } else {
            self.run_matcher(&closed);
        }
        Ok(())
    }

    fn on_flush(&mut self) {
        if self.phase == Phase::Windowing {
            if let Some(window) = self.state.window.as_mut() {
                window.clear_data();
                let delay = self.deps.resume_delay;
                self.post(Command::Pause(delay));
                return;
            }
        }
        log::debug!("actor: ignoring flush in phase {}", self.phase.as_label());
    }

    async fn on_pause(&mut self, delay: Duration) {
        if self.phase != Phase::Windowing || self.state.window.is_none() {
            log::debug!("actor: ignoring pause in phase {}", self.phase.as_label());
            return;
        }
        let window = self.state.window.as_ref().expect("checked above").clone();
        self.phase = Phase::Pausing;
        self.emit(WindowEvent::Paused { window }).await;

        // One-shot resume timer; if the actor is gone when it fires, the
        // send fails silently.
        let tx = self.deps.self_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Command::Resume);
        });
    }

    async fn on_resume(&mut self) {
        if self.phase != Phase::Pausing || self.state.window.is_none() {
            log::debug!("actor: ignoring resume in phase {}", self.phase.as_label());
            return;
        }
        let window = self.state.window.as_ref().expect("checked above").clone();
        self.phase = Phase::Windowing;
        // Parked signals stay parked until the next open/advance.
        self.emit(WindowEvent::Resumed { window }).await;
    }

    fn on_tick(&mut self) {
        if self.phase != Phase::Windowing {
            return;
        }
        let expired_at = self
            .state
            .window
            .as_ref()
            .filter(|w| w.expired(self.deps.clock.now()))
            .map(|w| w.start());
        if let Some(opened_at) = expired_at {
            self.post(Command::Close {
                opened_at,
                advance: true,
            });
        }
    }

    async fn on_stop(&mut self) -> ActorExit {
        let window = self.state.window.take();
        if let Some(w) = &window {
            self.emit(WindowEvent::Closed {
                window: w.clone(),
                data: WindowData::new(w.data().to_vec(), self.deps.frequency),
            })
            .await;
        }
        self.emit(WindowEvent::Stopped { window }).await;
        ActorExit::Stopped
    }

    // ---- helpers ----------------------------------------------------------

    /// Posts a command to this actor's own mailbox tail.
    fn post(&mut self, cmd: Command) {
        self.queue.push_back(cmd);
    }

    /// Re-delivers parked signals, in arrival order, ahead of queued work.
    fn unstash(&mut self) {
        if self.stash.is_empty() {
            return;
        }
        let parked = std::mem::take(&mut self.stash);
        for signal in parked.into_iter().rev() {
            self.queue.push_front(Command::Signal(signal));
        }
    }

    /// Validates the advancement contract: the successor starts exactly
    /// where the closed window ends.
    fn contiguous(&self, closed: &Window, next: Window) -> Result<Window, ActorError> {
        if next.start() != closed.end() || next.end() <= next.start() {
            return Err(ActorError::AdvancerContract {
                reason: format!(
                    "successor {} is not contiguous with {}",
                    next.label(),
                    closed.label()
                ),
            });
        }
        Ok(next)
    }

    fn invalid(&self, command: &'static str) -> ActorError {
        ActorError::InvalidTransition {
            command,
            phase: self.phase.as_label(),
        }
    }

    /// Runs the matcher over a closed window and republishes its
    /// side-effect signals, each re-attributed to the window's label.
    /// Matcher failures are logged and contained.
    fn run_matcher(&self, closed: &Window) {
        match self.deps.matcher.search(closed, self.deps.frequency) {
            Ok(result) => {
                let label = closed.label();
                for signal in result.side_effect.signals {
                    self.deps.bus.publish(signal.sourced_from(&label));
                }
            }
            Err(e) => {
                log::warn!(
                    "actor: matcher '{}' failed on {}: {} ({})",
                    self.deps.matcher.name(),
                    closed.label(),
                    e,
                    e.as_label()
                );
            }
        }
    }

    async fn emit(&self, event: WindowEvent) {
        if let Some(listener) = &self.state.listener {
            listener.accept(&event).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::MatchError;
    use crate::matcher::{PatternMatcher, SignalPatternMatchResult};
    use crate::window::advancer::Advancer;
    use std::sync::Arc;

    struct EmptyMatcher;

    impl PatternMatcher for EmptyMatcher {
        fn search(
            &self,
            window: &Window,
            frequency: Duration,
        ) -> Result<SignalPatternMatchResult, MatchError> {
            Ok(SignalPatternMatchResult::empty(window, frequency))
        }
    }

    struct ForcedOnly;

    impl Advancer for ForcedOnly {
        fn advance(&self, current: &Window, force: bool) -> Option<Window> {
            force.then(|| Window::starting_at(current.end(), current.duration()))
        }
    }

    fn test_actor() -> (WindowActor, mpsc::UnboundedReceiver<Command>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let deps = ActorDeps {
            advancer: Arc::new(ForcedOnly),
            matcher: Arc::new(EmptyMatcher),
            bus: SignalBus::new(4),
            clock: Arc::new(ManualClock::default()),
            frequency: Duration::from_secs(10),
            resume_delay: Duration::from_millis(10),
            self_tx: tx,
        };
        (WindowActor::new(deps), rx)
    }

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    async fn drain(actor: &mut WindowActor) {
        while let Some(cmd) = actor.queue.pop_front() {
            actor
                .handle_command(cmd)
                .await
                .expect("no invariant violation");
        }
    }

    #[tokio::test]
    async fn open_redelivers_pending_ahead_of_parked_signals() {
        let (mut actor, _rx) = test_actor();

        actor
            .handle_command(Command::Signal(HealthSignal::new("parked", at(0))))
            .await
            .unwrap();
        actor
            .handle_command(Command::Start {
                window: Window::starting_at(at(0), Duration::from_secs(10)),
                listener: None,
            })
            .await
            .unwrap();

        // Swap the self-posted open for one carrying a re-delivery.
        let window = match actor.queue.pop_front() {
            Some(Command::Open { window, .. }) => window,
            _ => panic!("start should post an open"),
        };
        actor
            .handle_command(Command::Open {
                window,
                pending: Some(HealthSignal::new("pending", at(1))),
            })
            .await
            .unwrap();
        drain(&mut actor).await;

        let appended: Vec<_> = actor
            .state
            .window
            .as_ref()
            .expect("window open")
            .data()
            .iter()
            .map(|s| s.name.clone())
            .collect();
        assert_eq!(appended, ["pending", "parked"]);
    }

    #[tokio::test]
    async fn advance_aimed_at_a_gone_window_is_ignored() {
        let (mut actor, _rx) = test_actor();
        actor
            .handle_command(Command::Start {
                window: Window::starting_at(at(0), Duration::from_secs(10)),
                listener: None,
            })
            .await
            .unwrap();
        drain(&mut actor).await;
        assert_eq!(actor.phase, Phase::Windowing);

        actor
            .handle_command(Command::Advance {
                closed_start: at(999),
                next: Window::starting_at(at(1009), Duration::from_secs(10)),
            })
            .await
            .unwrap();

        assert_eq!(actor.phase, Phase::Windowing);
        assert_eq!(actor.state.window.as_ref().expect("still open").start(), at(0));
    }

    #[tokio::test]
    async fn repeated_start_breaks_the_state_machine() {
        let (mut actor, _rx) = test_actor();
        let window = Window::starting_at(at(0), Duration::from_secs(10));
        actor
            .handle_command(Command::Start {
                window: window.clone(),
                listener: None,
            })
            .await
            .unwrap();

        let second = actor
            .handle_command(Command::Start {
                window,
                listener: None,
            })
            .await;
        assert!(matches!(
            second,
            Err(ActorError::InvalidTransition { command: "start", .. })
        ));
    }
}
