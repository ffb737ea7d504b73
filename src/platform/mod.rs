//! Platform abstraction layer
//!
//! Handles the boundary with whatever hosts the game:
//! - Input keys and the pressed-key map
//! - Wall-clock time (rocket fire-rate limiter)

pub mod input;
pub mod time;

pub use input::{Key, PressedKeys};
pub use time::{Clock, ManualClock, SystemClock};
