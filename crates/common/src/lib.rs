//! Shared plain types used by every cityscape crate.
//!
//! # Invariants
//! - Nothing in here owns world state; these are values only.
//! - Ground-plane coordinates are `(x, z)` packed into a `DVec2`.

pub mod types;

pub use types::{Axis, Facing, Footprint, GridPos, ShiftDirection};
