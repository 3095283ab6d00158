//! Health signals and the republish bus.
//!
//! - [`signal`]: the opaque observation record the engine accumulates.
//! - [`bus`]: fire-and-forget broadcast sink for synthesized signals.

pub mod bus;
pub mod signal;

pub use bus::SignalBus;
pub use signal::HealthSignal;
