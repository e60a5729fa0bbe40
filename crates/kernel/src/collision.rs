//! Discrete push-out of the observer from building footprints.
//!
//! Each overlapping footprint found in a row-major scan is resolved by
//! reversing and damping the observer's velocity, then stepping the observer
//! along it until the boxes separate. Stepping can land the observer inside a
//! different footprint; only cells met later in the same scan are corrected.

use cityscape_common::{Footprint, GridPos};
use glam::DVec2;

use crate::config::WorldConfig;
use crate::grid::Grid;
use crate::observer::Observer;

/// Upper bound on steps for a single push-out. Reaching it is a logic defect.
const MAX_PUSH_STEPS: u32 = 1_000_000;

/// One footprint the observer was pushed out of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushOut {
    pub cell: GridPos,
    pub steps: u32,
}

/// Scan every cell in row-major order and push the observer out of each
/// footprint its box overlaps at the time the cell is visited.
pub fn resolve(observer: &mut Observer, grid: &Grid, config: &WorldConfig) -> Vec<PushOut> {
    let mut resolved = Vec::new();
    for cell in grid.cells() {
        let footprint = cell.footprint(config.footprint);
        if !observer
            .bounding_box(config.observer_half_extent)
            .overlaps(&footprint)
        {
            continue;
        }
        let steps = push_out(observer, &footprint, config);
        tracing::trace!(cell = %cell.grid_pos, steps, position = ?observer.position, "pushed out");
        resolved.push(PushOut {
            cell: cell.grid_pos,
            steps,
        });
    }
    resolved
}

/// Separate the observer from one footprint. Returns the number of steps taken.
pub fn push_out(observer: &mut Observer, footprint: &Footprint, config: &WorldConfig) -> u32 {
    let v = observer.velocity;
    if v.x.abs() < config.collision_epsilon && v.y.abs() < config.collision_epsilon {
        observer.velocity = DVec2::splat(config.forced_velocity);
    }
    observer.velocity *= config.push_damping;

    let mut steps = 0;
    while observer
        .bounding_box(config.observer_half_extent)
        .overlaps(footprint)
    {
        if steps == MAX_PUSH_STEPS {
            tracing::error!(
                position = ?observer.position,
                velocity = ?observer.velocity,
                "push-out did not converge"
            );
            break;
        }
        observer.position += observer.velocity;
        steps += 1;
    }
    steps
}
