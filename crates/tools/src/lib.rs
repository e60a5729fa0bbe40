//! Developer Tooling: read-only inspection of the world and its window.
//!
//! # Invariants
//! - Tools never mutate world state.

mod inspector;

pub use inspector::{WindowInspector, WindowSummary};

pub fn crate_info() -> &'static str {
    "cityscape-tools v0.1.0"
}
