//! Audio: the sink interface the tick loop talks to, and the footstep trigger.
//!
//! # Invariants
//! - At most one footstep loop is playing at a time.
//! - Sink failures are the sink's business; the trigger never observes them.

mod footsteps;
mod sink;

pub use footsteps::{AudioConfig, FootstepLoop};
pub use sink::{AudioSink, NullAudio};
