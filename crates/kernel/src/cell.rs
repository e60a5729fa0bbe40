use cityscape_common::{Facing, Footprint, GridPos};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::generator::CellTraits;

/// One building in the streaming window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Slot in the window, updated whenever the window slides.
    pub grid_pos: GridPos,
    /// Footprint origin (the corner with the smallest x and z).
    pub world_pos: DVec2,
    pub height: i32,
    pub facing: Facing,
    pub primary_shade: f32,
    pub accent_shade: f32,
    pub locked: bool,
    pub open: bool,
}

/// Door state derived from the `locked` and `open` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    ClosedLocked,
    ClosedUnlocked,
    Open,
}

/// Result of one interaction attempt against a cell's door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorTransition {
    Opened,
    AlreadyOpen,
    Locked,
    OutOfReach,
}

impl Cell {
    pub fn new(grid_pos: GridPos, world_pos: DVec2, traits: CellTraits) -> Self {
        Self {
            grid_pos,
            world_pos,
            height: traits.height,
            facing: traits.facing,
            primary_shade: traits.primary_shade,
            accent_shade: traits.accent_shade,
            locked: traits.locked,
            open: false,
        }
    }

    pub fn door_state(&self) -> DoorState {
        if self.open {
            DoorState::Open
        } else if self.locked {
            DoorState::ClosedLocked
        } else {
            DoorState::ClosedUnlocked
        }
    }

    pub fn footprint(&self, size: f64) -> Footprint {
        Footprint::from_origin(self.world_pos, size)
    }

    pub fn center(&self, size: f64) -> DVec2 {
        self.world_pos + DVec2::splat(size / 2.0)
    }

    /// Midpoint of the footprint edge selected by `facing`.
    pub fn door_point(&self, size: f64) -> DVec2 {
        self.center(size) + self.facing.outward() * (size / 2.0)
    }

    /// Attempt to open the door from `observer`.
    ///
    /// Open is terminal; locked doors never open. Reach is tested per axis.
    pub fn interact(&mut self, observer: DVec2, size: f64, reach: f64) -> DoorTransition {
        match self.door_state() {
            DoorState::Open => DoorTransition::AlreadyOpen,
            DoorState::ClosedLocked => DoorTransition::Locked,
            DoorState::ClosedUnlocked => {
                let delta = (observer - self.door_point(size)).abs();
                if delta.x < reach && delta.y < reach {
                    self.open = true;
                    DoorTransition::Opened
                } else {
                    DoorTransition::OutOfReach
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(facing: Facing, locked: bool) -> Cell {
        Cell::new(
            GridPos::new(0, 0),
            DVec2::new(25.5, 25.5),
            CellTraits {
                height: 6,
                facing,
                primary_shade: 0.5,
                accent_shade: 0.9,
                locked,
            },
        )
    }

    #[test]
    fn north_door_sits_on_near_edge() {
        let c = cell(Facing::North, false);
        assert_eq!(c.center(9.0), DVec2::new(30.0, 30.0));
        assert_eq!(c.door_point(9.0), DVec2::new(30.0, 25.5));
        assert_eq!(cell(Facing::East, false).door_point(9.0), DVec2::new(34.5, 30.0));
        assert_eq!(cell(Facing::South, false).door_point(9.0), DVec2::new(30.0, 34.5));
        assert_eq!(cell(Facing::West, false).door_point(9.0), DVec2::new(25.5, 30.0));
    }

    #[test]
    fn unlocked_door_opens_within_reach() {
        let mut c = cell(Facing::North, false);
        assert_eq!(c.door_state(), DoorState::ClosedUnlocked);
        let t = c.interact(DVec2::new(30.5, 25.6), 9.0, 1.0);
        assert_eq!(t, DoorTransition::Opened);
        assert_eq!(c.door_state(), DoorState::Open);
    }

    #[test]
    fn second_interaction_is_idempotent() {
        let mut c = cell(Facing::North, false);
        c.interact(DVec2::new(30.0, 25.0), 9.0, 1.0);
        let before = c;
        assert_eq!(
            c.interact(DVec2::new(30.0, 25.0), 9.0, 1.0),
            DoorTransition::AlreadyOpen
        );
        assert_eq!(c, before);
    }

    #[test]
    fn locked_door_never_opens() {
        let mut c = cell(Facing::North, true);
        for _ in 0..100 {
            assert_eq!(
                c.interact(DVec2::new(30.0, 25.5), 9.0, 1.0),
                DoorTransition::Locked
            );
        }
        assert!(!c.open);
        assert_eq!(c.door_state(), DoorState::ClosedLocked);
    }

    #[test]
    fn reach_is_per_axis_and_strict() {
        let mut c = cell(Facing::North, false);
        assert_eq!(
            c.interact(DVec2::new(31.0, 25.5), 9.0, 1.0),
            DoorTransition::OutOfReach
        );
        assert_eq!(
            c.interact(DVec2::new(30.0, 27.0), 9.0, 1.0),
            DoorTransition::OutOfReach
        );
        assert!(!c.open);
    }
}
