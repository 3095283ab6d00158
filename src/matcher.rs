//! # Pattern matching over closed windows.
//!
//! A [`PatternMatcher`] scans the signals of a window at close/advance time
//! and returns matches plus a set of synthesized side-effect signals. The
//! engine republishes the side-effect set on the signal bus, rewriting each
//! signal's source to the closed window's label.
//!
//! ## Rules
//! - A matcher MUST be deterministic for identical input; anything time- or
//!   randomness-dependent belongs in the signals themselves, not the scan.
//! - A matcher failure is contained: the engine logs it, publishes nothing
//!   for that window, and keeps running.

use std::sync::Arc;
use std::time::Duration;

use crate::error::MatchError;
use crate::signals::signal::HealthSignal;
use crate::window::window::Window;

/// Shared handle to a pattern matcher.
pub type MatcherRef = Arc<dyn PatternMatcher>;

/// One pattern occurrence found in a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalMatch {
    /// Which pattern matched.
    pub pattern: String,
    /// The signals that formed the match, in window order.
    pub signals: Vec<HealthSignal>,
}

/// The synthesized signals a scan wants republished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideEffect {
    /// Signals to publish on the bus. May be empty.
    pub signals: Vec<HealthSignal>,
}

/// Result of scanning one window.
#[derive(Debug, Clone)]
pub struct SignalPatternMatchResult {
    /// All pattern occurrences found.
    pub matches: Vec<SignalMatch>,
    /// Signals the matcher captured while scanning (subset of the input).
    pub captured: Vec<HealthSignal>,
    /// Synthesized signals to republish.
    pub side_effect: SideEffect,
    /// Window width the scan ran under.
    pub frequency: Duration,
    /// The scanned window, kept so downstream can trace causality.
    pub source_window: Option<Window>,
}

impl SignalPatternMatchResult {
    /// An empty result for `window`: no matches, no side-effects.
    pub fn empty(window: &Window, frequency: Duration) -> Self {
        Self {
            matches: Vec::new(),
            captured: Vec::new(),
            side_effect: SideEffect::default(),
            frequency,
            source_window: Some(window.clone()),
        }
    }
}

/// Scans a window's signals for patterns.
pub trait PatternMatcher: Send + Sync + 'static {
    /// Scans `window` (signals in delivery order) and returns the matches
    /// and side-effect set. `frequency` is the configured window width.
    fn search(
        &self,
        window: &Window,
        frequency: Duration,
    ) -> Result<SignalPatternMatchResult, MatchError>;

    /// Stable matcher name for logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Matches when a named signal occurs at least `threshold` times in a
/// window, synthesizing one alert-style signal per closed window.
///
/// The synthesized signal is stamped with the window's end time so the
/// result stays deterministic for identical input.
pub struct ThresholdMatcher {
    watch: String,
    threshold: usize,
    emit: String,
}

impl ThresholdMatcher {
    /// Watches for `watch` occurring at least `threshold` times (min 1);
    /// the synthesized signal is named `emit`.
    pub fn new(watch: impl Into<String>, threshold: usize, emit: impl Into<String>) -> Self {
        Self {
            watch: watch.into(),
            threshold: threshold.max(1),
            emit: emit.into(),
        }
    }
}

impl PatternMatcher for ThresholdMatcher {
    fn search(
        &self,
        window: &Window,
        frequency: Duration,
    ) -> Result<SignalPatternMatchResult, MatchError> {
        let hits: Vec<HealthSignal> = window
            .data()
            .iter()
            .filter(|s| s.name == self.watch)
            .cloned()
            .collect();

        let mut result = SignalPatternMatchResult::empty(window, frequency);
        if hits.len() >= self.threshold {
            result.matches.push(SignalMatch {
                pattern: self.watch.clone(),
                signals: hits.clone(),
            });
            result.captured = hits;
            result
                .side_effect
                .signals
                .push(HealthSignal::new(self.emit.clone(), window.end()));
        }
        Ok(result)
    }

    fn name(&self) -> &'static str {
        "threshold"
    }
}
