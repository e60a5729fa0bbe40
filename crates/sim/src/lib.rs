//! Simulation: the single-threaded tick loop.
//!
//! # Invariants
//! - Tick order is fixed: input, movement, streaming, collision, audio, doors, step, render.
//! - The loop exclusively owns the world; collaborators only see borrows.
//! - Same seed + same inputs = identical state hash.

pub mod config;
pub mod simulation;

pub use config::{SimConfig, SimError};
pub use simulation::{RunSummary, Simulation, TickReport};

pub fn crate_info() -> &'static str {
    "cityscape-sim v0.1.0"
}
