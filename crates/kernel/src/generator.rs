use cityscape_common::Facing;
use rand::Rng;

use crate::config::WorldConfig;

/// Attributes of a freshly generated cell. Position is assigned by the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellTraits {
    pub height: i32,
    pub facing: Facing,
    pub primary_shade: f32,
    pub accent_shade: f32,
    pub locked: bool,
}

/// The raw random draws behind one cell, in draw order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Roll {
    pub height_step: i32,
    pub primary_shade: f32,
    pub accent_shade: f32,
    pub facing: u32,
    pub lock_draw: u32,
}

/// Produces new cells as a bounded random walk from a neighbour's height.
///
/// The generator holds no RNG of its own; callers inject one so a fixed seed
/// reproduces the same city.
#[derive(Debug, Clone)]
pub struct CellGenerator {
    min_stories: i32,
    max_stories: i32,
    step_min: i32,
    step_max: i32,
    lock_probability: u32,
}

impl CellGenerator {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            min_stories: config.min_stories,
            max_stories: config.max_stories,
            step_min: config.height_step_min,
            step_max: config.height_step_max,
            lock_probability: config.lock_probability.max(1),
        }
    }

    /// Draw the five random values for one cell.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Roll {
        Roll {
            height_step: rng.gen_range(self.step_min..=self.step_max),
            primary_shade: rng.gen_range(0.0..1.0),
            accent_shade: rng.gen_range(0.0..1.0),
            facing: rng.gen_range(0..4),
            lock_draw: rng.gen_range(0..self.lock_probability),
        }
    }

    /// Turn a roll into cell attributes, walking from `neighbor_height`.
    pub fn apply(&self, neighbor_height: i32, roll: Roll) -> CellTraits {
        let height = neighbor_height
            .saturating_add(roll.height_step)
            .clamp(self.min_stories, self.max_stories);
        CellTraits {
            height,
            facing: Facing::from_index(roll.facing),
            primary_shade: roll.primary_shade,
            accent_shade: roll.accent_shade,
            locked: roll.lock_draw != 0,
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, neighbor_height: i32, rng: &mut R) -> CellTraits {
        let roll = self.roll(rng);
        self.apply(neighbor_height, roll)
    }
}
