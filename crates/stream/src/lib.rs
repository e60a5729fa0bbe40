//! Streaming: keeps the fixed window centred on the observer.
//!
//! # Invariants
//! - At most one shift per tick; a second crossing waits for the next tick.
//! - Horizontal (column) crossings are applied before vertical (row) ones.
//! - Shifting never rebuilds the whole window.

mod controller;
mod timer;
mod window;

pub use controller::{StreamController, StreamStats};
pub use timer::TickTimer;
pub use window::WindowBounds;

pub fn crate_info() -> &'static str {
    "cityscape-stream v0.1.0"
}
