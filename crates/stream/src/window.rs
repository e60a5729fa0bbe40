use cityscape_common::{Axis, ShiftDirection};
use cityscape_kernel::Grid;
use glam::DVec2;

/// World-space box covered by the current window.
///
/// Built from the corner cells' positions widened by half a pitch on every
/// side, so it tiles exactly with the boxes of neighbouring windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowBounds {
    pub min: DVec2,
    pub max: DVec2,
    pitch: f64,
}

impl WindowBounds {
    pub fn of(grid: &Grid) -> Self {
        let half = DVec2::splat(grid.pitch() / 2.0);
        Self {
            min: grid.origin() - half,
            max: grid.far_corner() + half,
            pitch: grid.pitch(),
        }
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Shift that would bring `position` back inside the central band on
    /// `axis`, if it has strayed more than half a pitch from the centre.
    pub fn crossing(&self, position: DVec2, axis: Axis) -> Option<ShiftDirection> {
        let offset = position - self.center();
        let along = match axis {
            Axis::Col => offset.x,
            Axis::Row => offset.y,
        };
        let band = self.pitch / 2.0;
        if along > band {
            Some(ShiftDirection::along(axis, true))
        } else if along < -band {
            Some(ShiftDirection::along(axis, false))
        } else {
            None
        }
    }
}
