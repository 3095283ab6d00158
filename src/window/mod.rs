//! Windows and advancement policies.
//!
//! - [`window`]: the half-open time span accumulating signals.
//! - [`advancer`]: pure policy deciding when the current window rolls into
//!   its successor.

pub mod advancer;
pub mod window;

pub use advancer::{Advancer, AdvancerRef, CountAdvancer, TumblingAdvancer};
pub use window::{Window, WindowSnapshot};
