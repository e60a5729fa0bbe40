//! World Kernel: the streaming city window, its generator, and the observer.
//!
//! # Invariants
//! - The window is always a complete `N×N` grid; cells are overwritten, never removed.
//! - Every height stays within the configured story range.
//! - All state mutations flow through explicit operations on `WorldState`.

pub mod cell;
pub mod collision;
pub mod config;
pub mod generator;
pub mod grid;
pub mod observer;
pub mod world;

pub use cell::{Cell, DoorState, DoorTransition};
pub use collision::PushOut;
pub use config::{ConfigError, MovementConfig, WorldConfig};
pub use generator::{CellGenerator, CellTraits, Roll};
pub use grid::Grid;
pub use observer::{LookAngles, MoveIntent, Observer};
pub use world::{WorldEvent, WorldState};
