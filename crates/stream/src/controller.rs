use cityscape_common::{Axis, ShiftDirection};
use cityscape_kernel::WorldState;
use serde::Serialize;

use crate::window::WindowBounds;

/// Running totals of window shifts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StreamStats {
    pub shifts_total: u64,
    pub pos_row: u64,
    pub neg_row: u64,
    pub pos_col: u64,
    pub neg_col: u64,
    /// Ticks where a row crossing waited behind a column shift.
    pub deferred: u64,
    pub last_shift: Option<ShiftDirection>,
}

impl StreamStats {
    fn record(&mut self, direction: ShiftDirection) {
        self.shifts_total += 1;
        match direction {
            ShiftDirection::PosRow => self.pos_row += 1,
            ShiftDirection::NegRow => self.neg_row += 1,
            ShiftDirection::PosCol => self.pos_col += 1,
            ShiftDirection::NegCol => self.neg_col += 1,
        }
        self.last_shift = Some(direction);
    }
}

/// Decides once per tick whether the window must slide under the observer.
#[derive(Debug, Clone, Default)]
pub struct StreamController {
    stats: StreamStats,
}

impl StreamController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crossings pending for the current observer position, column axis first.
    pub fn pending(world: &WorldState) -> (Option<ShiftDirection>, Option<ShiftDirection>) {
        let bounds = WindowBounds::of(world.grid());
        let position = world.observer().position;
        (
            bounds.crossing(position, Axis::Col),
            bounds.crossing(position, Axis::Row),
        )
    }

    /// Apply at most one shift for this tick and return it.
    ///
    /// A column crossing wins over a row crossing in the same tick; the row
    /// shift is picked up on the next tick if the observer is still past the
    /// band.
    pub fn update(&mut self, world: &mut WorldState) -> Option<ShiftDirection> {
        let _span = tracing::info_span!("stream_update", tick = world.tick()).entered();

        let (horizontal, vertical) = Self::pending(world);
        let direction = match (horizontal, vertical) {
            (Some(h), Some(v)) => {
                self.stats.deferred += 1;
                tracing::debug!(applied = %h, deferred = %v, "two crossings in one tick");
                h
            }
            (Some(h), None) => h,
            (None, Some(v)) => v,
            (None, None) => return None,
        };

        world.shift(direction);
        self.stats.record(direction);
        tracing::debug!(%direction, total = self.stats.shifts_total, "stream shift");
        Some(direction)
    }

    pub fn stats(&self) -> &StreamStats {
        &self.stats
    }
}
