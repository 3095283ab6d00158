//! Supervision policies.
//!
//! - [`backoff`]: exponential restart backoff with bounded randomization
//!   and a retry cap, applied by the supervisor between actor restarts.

pub mod backoff;

pub use backoff::BackoffPolicy;
