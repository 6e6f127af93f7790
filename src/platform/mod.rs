//! Platform abstraction layer
//!
//! The seams between the simulation and the outside world:
//! - Input (held and just-pressed logical actions)
//! - Time (per-frame delta and timestamps)

pub mod clock;
pub mod input;

pub use clock::{Clock, FixedClock, SystemClock};
pub use input::{Action, InputProvider, KeyState};
