//! Input: the fixed set of logical actions the tick loop reacts to.
//!
//! # Invariants
//! - The core consumes `InputState` snapshots, never raw device events.
//! - One snapshot is polled per tick.

pub mod action;
pub mod state;

pub use action::Action;
pub use state::{InputSource, InputState, ScriptedInput};
