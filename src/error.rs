//! # Error types used by the windowing engine.
//!
//! Three enums, one per failure domain:
//!
//! - [`EngineError`] errors surfaced to callers through the handle.
//! - [`ActorError`] internal assertion failures that fail the actor and
//!   escalate to the supervisor.
//! - [`MatchError`] failures raised by a pattern matcher; contained (logged,
//!   side-effects skipped), never fatal.
//!
//! All types provide `as_label()` for stable log/metric strings.

use std::time::Duration;

use thiserror::Error;

/// Errors surfaced to callers of the engine handle.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EngineError {
    /// The supervised actor is gone: supervision exhausted its retries or
    /// the engine was stopped/terminated. Further commands are no-ops.
    #[error("engine unavailable: actor terminated")]
    Unavailable,

    /// A snapshot query was not answered within the configured bound.
    /// The actor itself is unaffected.
    #[error("snapshot timed out after {timeout:?}")]
    SnapshotTimeout {
        /// The configured ask timeout.
        timeout: Duration,
    },
}

impl EngineError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            EngineError::Unavailable => "engine_unavailable",
            EngineError::SnapshotTimeout { .. } => "engine_snapshot_timeout",
        }
    }
}

/// State-machine invariant violations inside the window actor.
///
/// These are expected only from implementation bugs (a misbehaving
/// advancement policy, a command delivered in a phase that can never
/// legally receive it), never from user input. Each one fails the actor;
/// the supervisor applies backoff and restarts it with fresh state.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ActorError {
    /// A command arrived in a phase that can never legally receive it.
    #[error("command '{command}' is not valid in phase '{phase}'")]
    InvalidTransition {
        /// The offending command's label.
        command: &'static str,
        /// The phase the actor was in.
        phase: &'static str,
    },

    /// The advancement policy broke its contract: it returned `None` for a
    /// forced advance, or produced a non-contiguous successor.
    #[error("advancer contract violated: {reason}")]
    AdvancerContract {
        /// What the policy did wrong.
        reason: String,
    },
}

impl ActorError {
    /// Returns a short stable label.
    pub fn as_label(&self) -> &'static str {
        match self {
            ActorError::InvalidTransition { .. } => "actor_invalid_transition",
            ActorError::AdvancerContract { .. } => "actor_advancer_contract",
        }
    }
}

/// Failure raised by a pattern matcher while scanning a window.
///
/// Contained by the actor: the failure is logged, no side-effects are
/// published for that window, and processing continues.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum MatchError {
    /// The scan over the window's signals failed.
    #[error("pattern scan failed: {reason}")]
    Scan {
        /// Matcher-provided failure description.
        reason: String,
    },
}

impl MatchError {
    /// Returns a short stable label.
    pub fn as_label(&self) -> &'static str {
        match self {
            MatchError::Scan { .. } => "match_scan_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(EngineError::Unavailable.as_label(), "engine_unavailable");
        assert_eq!(
            EngineError::SnapshotTimeout {
                timeout: Duration::from_secs(3)
            }
            .as_label(),
            "engine_snapshot_timeout"
        );
        assert_eq!(
            ActorError::InvalidTransition {
                command: "open",
                phase: "windowing"
            }
            .as_label(),
            "actor_invalid_transition"
        );
    }
}
