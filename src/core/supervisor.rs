//! # Supervision envelope around the window actor.
//!
//! [`WindowSupervisor`] runs the actor and restarts it on invariant
//! violations with exponential backoff:
//!
//! ```text
//! delay = min(max_backoff, min_backoff · 2^attempt · (1 ± random_factor))
//! ```
//!
//! ## Rules
//! - A restart builds a **fresh** actor: the in-flight window, the internal
//!   queue and the stash are lost. Observers see this as a missing `Closed`
//!   event for the aborted window.
//! - The external mailbox survives restarts: commands sent during backoff
//!   are processed by the fresh actor in order.
//! - More than `max_retries` failures ends supervision. The mailbox is
//!   dropped; every handle command becomes a no-op and `snapshot()` fails
//!   with `Unavailable`. Callers observe the dead state through those
//!   errors, not through a panic.
//! - Graceful exits (stop, detach, terminate) end supervision without a
//!   restart.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::core::actor::{ActorDeps, WindowActor};
use crate::core::command::Command;
use crate::policies::BackoffPolicy;

/// Restart harness owning the actor's run loop.
pub(crate) struct WindowSupervisor {
    backoff: BackoffPolicy,
    deps: ActorDeps,
}

impl WindowSupervisor {
    pub(crate) fn new(backoff: BackoffPolicy, deps: ActorDeps) -> Self {
        Self { backoff, deps }
    }

    /// Spawns the supervision loop as a background task. The loop owns the
    /// mailbox receiver; dropping it (on exit) is what makes the handle
    /// observe `Unavailable`.
    pub(crate) fn spawn(
        self,
        mut rx: mpsc::UnboundedReceiver<Command>,
        shutdown: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut failures: u32 = 0;

            loop {
                let mut actor = WindowActor::new(self.deps.clone());
                match actor.run(&mut rx, &shutdown).await {
                    Ok(exit) => {
                        log::debug!("supervisor: actor exited ({})", exit.as_label());
                        break;
                    }
                    Err(e) => {
                        failures += 1;
                        if self.backoff.exhausted(failures) {
                            log::error!(
                                "supervisor: giving up after {} restarts: {} ({})",
                                failures - 1,
                                e,
                                e.as_label()
                            );
                            break;
                        }

                        let delay = self.backoff.delay(failures - 1);
                        log::warn!(
                            "supervisor: actor failed ({}), restart #{} in {:?}; in-flight window lost",
                            e,
                            failures,
                            delay
                        );

                        let sleep = time::sleep(delay);
                        tokio::pin!(sleep);
                        tokio::select! {
                            _ = &mut sleep => {}
                            _ = shutdown.cancelled() => {
                                log::debug!("supervisor: terminated during backoff");
                                return;
                            }
                        }
                    }
                }
            }
        })
    }
}
