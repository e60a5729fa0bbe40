use std::fmt;

use cityscape_common::GridPos;
use cityscape_kernel::{DoorState, WorldState};
use cityscape_stream::StreamStats;
use serde::Serialize;

/// World inspector for developer tooling.
///
/// Provides read-only queries against the world state for debugging,
/// profiling, and the CLI.
pub struct WindowInspector;

impl WindowInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &WorldState, stats: &StreamStats) -> WindowSummary {
        let grid = world.grid();
        let mut summary = WindowSummary {
            tick: world.tick(),
            seed: world.seed(),
            observer: [world.observer().position.x, world.observer().position.y],
            speed: world.observer().speed(),
            origin: [grid.origin().x, grid.origin().y],
            shifts: stats.shifts_total,
            open_doors: 0,
            unlocked_doors: 0,
            locked_doors: 0,
            min_height: i32::MAX,
            max_height: i32::MIN,
            pending_events: world.events().len(),
            state_hash: world.state_hash(),
        };
        for cell in grid.cells() {
            match cell.door_state() {
                DoorState::Open => summary.open_doors += 1,
                DoorState::ClosedUnlocked => summary.unlocked_doors += 1,
                DoorState::ClosedLocked => summary.locked_doors += 1,
            }
            summary.min_height = summary.min_height.min(cell.height);
            summary.max_height = summary.max_height.max(cell.height);
        }
        summary
    }

    /// The window's heights as a text grid, row 0 at the top.
    ///
    /// Open doors are marked `*`, locked doors `#`.
    pub fn height_map(world: &WorldState) -> String {
        let grid = world.grid();
        let mut out = String::new();
        for row in 0..grid.size() {
            let line: Vec<String> = (0..grid.size())
                .map(|col| {
                    let cell = grid.get(row, col);
                    let mark = match cell.door_state() {
                        DoorState::Open => '*',
                        DoorState::ClosedLocked => '#',
                        DoorState::ClosedUnlocked => ' ',
                    };
                    format!("{:>2}{mark}", cell.height)
                })
                .collect();
            out.push_str(line.join(" ").trim_end());
            out.push('\n');
        }
        out
    }

    /// The window slot whose footprint or surrounding street the observer
    /// is in, if the observer is inside the window at all.
    pub fn observer_slot(world: &WorldState) -> Option<GridPos> {
        let grid = world.grid();
        let pitch = grid.pitch();
        let street = (pitch - world.config().footprint) / 2.0;
        let local = (world.observer().position - grid.origin() + street) / pitch;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let (row, col) = (local.y.floor() as usize, local.x.floor() as usize);
        (row < grid.size() && col < grid.size()).then_some(GridPos::new(row, col))
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct WindowSummary {
    pub tick: u64,
    pub seed: u64,
    pub observer: [f64; 2],
    pub speed: f64,
    pub origin: [f64; 2],
    pub shifts: u64,
    pub open_doors: usize,
    pub unlocked_doors: usize,
    pub locked_doors: usize,
    pub min_height: i32,
    pub max_height: i32,
    pub pending_events: usize,
    pub state_hash: u64,
}

impl fmt::Display for WindowSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "World: tick={} seed={} hash={:016x}",
            self.tick, self.seed, self.state_hash
        )?;
        writeln!(
            f,
            "Observer: ({:.2}, {:.2}) speed={:.3}",
            self.observer[0], self.observer[1], self.speed
        )?;
        writeln!(
            f,
            "Window: origin=({:.1}, {:.1}) shifts={} heights={}..={}",
            self.origin[0], self.origin[1], self.shifts, self.min_height, self.max_height
        )?;
        write!(
            f,
            "Doors: open={} unlocked={} locked={} pending_events={}",
            self.open_doors, self.unlocked_doors, self.locked_doors, self.pending_events
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cityscape_kernel::{MovementConfig, WorldConfig};
    use cityscape_stream::StreamController;
    use glam::DVec2;

    fn world() -> WorldState {
        WorldState::new(WorldConfig::default(), &MovementConfig::default(), 17).unwrap()
    }

    #[test]
    fn summary_fresh_world() {
        let w = world();
        let summary = WindowInspector::summary(&w, &StreamStats::default());
        assert_eq!(summary.tick, 0);
        assert_eq!(summary.seed, 17);
        assert_eq!(summary.observer, [3.0, -7.0]);
        assert_eq!(summary.open_doors, 0);
        assert_eq!(summary.unlocked_doors + summary.locked_doors, 100);
        assert!(summary.min_height >= 3 && summary.max_height <= 20);
        assert_eq!(summary.state_hash, w.state_hash());
    }

    #[test]
    fn summary_counts_shifts() {
        let mut w = world();
        let mut stream = StreamController::new();
        w.observer_mut().position = DVec2::new(20.0, 0.0);
        stream.update(&mut w);
        let summary = WindowInspector::summary(&w, stream.stats());
        assert_eq!(summary.shifts, 1);
        assert_eq!(summary.origin, [-52.5, -67.5]);
    }

    #[test]
    fn summary_display_and_json() {
        let summary = WindowInspector::summary(&world(), &StreamStats::default());
        let text = summary.to_string();
        assert!(text.contains("tick=0"));
        assert!(text.contains("Doors: open=0"));
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["seed"], 17);
    }

    #[test]
    fn height_map_has_one_line_per_row() {
        let w = world();
        let map = WindowInspector::height_map(&w);
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines.len(), 10);
        let first: i32 = lines[0].split_whitespace().next().unwrap().trim_end_matches('#').parse().unwrap();
        assert_eq!(first, w.grid().get(0, 0).height);
    }

    #[test]
    fn observer_slot_tracks_position() {
        let mut w = world();
        // Window origin is (-67.5, -67.5); slot (0, 0) starts 3 units before it.
        w.observer_mut().position = DVec2::new(-70.0, -70.0);
        assert_eq!(WindowInspector::observer_slot(&w), Some(GridPos::new(0, 0)));
        w.observer_mut().position = DVec2::new(0.0, 0.0);
        assert_eq!(WindowInspector::observer_slot(&w), Some(GridPos::new(4, 4)));
        w.observer_mut().position = DVec2::new(-80.0, 0.0);
        assert_eq!(WindowInspector::observer_slot(&w), None);
    }
}
