use cityscape_common::{GridPos, ShiftDirection};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::cell::DoorTransition;
use crate::collision::{self, PushOut};
use crate::config::{ConfigError, MovementConfig, WorldConfig};
use crate::generator::CellGenerator;
use crate::grid::Grid;
use crate::observer::{MoveIntent, Observer};

/// An event record produced by every mutation of the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// The window was generated from scratch.
    Filled { seed: u64 },
    /// The window slid one cell and regenerated its freed edge.
    Shifted { tick: u64, direction: ShiftDirection },
    /// An unlocked door was opened.
    DoorOpened { tick: u64, pos: GridPos },
    /// Simulation advanced one tick.
    Stepped { tick: u64 },
}

/// The authoritative world state.
///
/// Owns the window, the observer and the generator RNG. Everything that
/// changes them goes through a method here so the event log stays complete.
/// Given the same seed and the same sequence of operations the state is
/// bit-identical.
#[derive(Debug, Clone)]
pub struct WorldState {
    config: WorldConfig,
    generator: CellGenerator,
    grid: Grid,
    observer: Observer,
    rng: ChaCha8Rng,
    seed: u64,
    tick: u64,
    event_log: Vec<WorldEvent>,
}

impl WorldState {
    /// Validate the configuration, spawn the observer and fill the window.
    pub fn new(config: WorldConfig, movement: &MovementConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        movement.validate()?;

        let generator = CellGenerator::new(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = Grid::fill(&config, config.centred_origin(), &generator, &mut rng);
        tracing::info!(seed, size = config.grid_size, "world created");

        Ok(Self {
            observer: Observer::spawn(movement),
            config,
            generator,
            grid,
            rng,
            seed,
            tick: 0,
            event_log: vec![WorldEvent::Filled { seed }],
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    /// Direct observer access, for placement by tools and tests.
    pub fn observer_mut(&mut self) -> &mut Observer {
        &mut self.observer
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[WorldEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Apply one tick of the movement model to the observer.
    pub fn move_observer(&mut self, intent: &MoveIntent, movement: &MovementConfig) {
        self.observer.integrate(intent, movement);
    }

    /// Slide the window and regenerate the freed row or column.
    pub fn shift(&mut self, direction: ShiftDirection) -> Vec<GridPos> {
        let freed = self
            .grid
            .shift_and_regenerate(direction, &self.generator, &mut self.rng);
        self.event_log.push(WorldEvent::Shifted {
            tick: self.tick,
            direction,
        });
        freed
    }

    /// Push the observer out of every footprint it overlaps.
    pub fn resolve_collisions(&mut self) -> Vec<PushOut> {
        collision::resolve(&mut self.observer, &self.grid, &self.config)
    }

    /// Try every door in the window from the observer's position.
    /// Returns the cells whose doors opened.
    pub fn interact(&mut self) -> Vec<GridPos> {
        let position = self.observer.position;
        let footprint = self.config.footprint;
        let reach = self.config.door_reach;
        let mut opened = Vec::new();
        for cell in self.grid.cells_mut() {
            if cell.interact(position, footprint, reach) == DoorTransition::Opened {
                tracing::info!(cell = %cell.grid_pos, "door opened");
                opened.push(cell.grid_pos);
            }
        }
        for &pos in &opened {
            self.event_log.push(WorldEvent::DoorOpened {
                tick: self.tick,
                pos,
            });
        }
        opened
    }

    /// Advance the tick counter.
    pub fn step(&mut self) {
        self.tick += 1;
        self.event_log.push(WorldEvent::Stepped { tick: self.tick });
    }

    /// Deterministic FNV-1a hash over tick, observer and every cell in
    /// row-major order.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        mix(&mut h, &self.seed.to_le_bytes());
        let o = &self.observer;
        for v in [
            o.position.x,
            o.position.y,
            o.velocity.x,
            o.velocity.y,
            o.look.yaw,
            o.look.pitch,
        ] {
            mix(&mut h, &v.to_le_bytes());
        }
        for cell in self.grid.cells() {
            mix(&mut h, &cell.world_pos.x.to_le_bytes());
            mix(&mut h, &cell.world_pos.y.to_le_bytes());
            mix(&mut h, &cell.height.to_le_bytes());
            mix(&mut h, &cell.facing.index().to_le_bytes());
            mix(&mut h, &cell.primary_shade.to_le_bytes());
            mix(&mut h, &cell.accent_shade.to_le_bytes());
            mix(&mut h, &[cell.locked as u8, cell.open as u8]);
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityscape_common::Facing;
    use glam::DVec2;

    fn world(seed: u64) -> WorldState {
        WorldState::new(WorldConfig::default(), &MovementConfig::default(), seed).unwrap()
    }

    #[test]
    fn new_world_is_filled() {
        let w = world(1);
        assert_eq!(w.tick(), 0);
        assert_eq!(w.grid().cells().count(), 100);
        assert_eq!(w.events(), &[WorldEvent::Filled { seed: 1 }]);
        assert_eq!(w.observer().position, DVec2::new(3.0, -7.0));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = WorldConfig {
            grid_size: 1,
            ..WorldConfig::default()
        };
        let err = WorldState::new(config, &MovementConfig::default(), 0).unwrap_err();
        assert_eq!(err, ConfigError::GridTooSmall(1));
    }

    #[test]
    fn same_seed_same_state() {
        let mut a = world(42);
        let mut b = world(42);
        for direction in [ShiftDirection::PosCol, ShiftDirection::NegRow] {
            a.shift(direction);
            b.shift(direction);
            a.step();
            b.step();
        }
        assert_eq!(a.state_hash(), b.state_hash());
        assert_ne!(a.state_hash(), world(43).state_hash());
    }

    #[test]
    fn shift_is_logged() {
        let mut w = world(3);
        w.step();
        w.shift(ShiftDirection::PosRow);
        assert_eq!(
            w.events().last(),
            Some(&WorldEvent::Shifted {
                tick: 1,
                direction: ShiftDirection::PosRow
            })
        );
        assert_eq!(w.drain_events().len(), 3);
        assert!(w.events().is_empty());
    }

    #[test]
    fn interact_opens_only_reachable_unlocked_doors() {
        let mut w = world(5);
        {
            let cell = w.grid.get_mut(2, 2);
            cell.world_pos = DVec2::new(25.5, 25.5);
            cell.facing = Facing::North;
            cell.locked = false;
        }
        w.observer_mut().position = DVec2::new(30.5, 25.6);

        let opened = w.interact();
        assert_eq!(opened, vec![GridPos::new(2, 2)]);
        assert!(w.grid().get(2, 2).open);
        assert!(matches!(
            w.events().last(),
            Some(WorldEvent::DoorOpened { pos, .. }) if *pos == GridPos::new(2, 2)
        ));

        // Holding interact keeps re-evaluating without further transitions.
        assert!(w.interact().is_empty());
        assert!(w.grid().get(2, 2).open);
    }

    #[test]
    fn locked_door_stays_closed_under_interaction() {
        let mut w = world(5);
        {
            let cell = w.grid.get_mut(2, 2);
            cell.world_pos = DVec2::new(25.5, 25.5);
            cell.facing = Facing::North;
            cell.locked = true;
        }
        w.observer_mut().position = DVec2::new(30.0, 25.5);
        for _ in 0..10 {
            w.interact();
        }
        assert!(!w.grid().get(2, 2).open);
    }
}
