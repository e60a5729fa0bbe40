use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical index into the streaming window. Not a world coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Cardinal rotation of a building. The facing picks the footprint edge that
/// carries the door.
///
/// Rows grow along +z and columns along +x, so `North` is the -z edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    North,
    East,
    South,
    West,
}

impl Facing {
    /// Build a facing from any integer, reduced modulo 4.
    pub fn from_index(index: u32) -> Self {
        match index % 4 {
            0 => Self::North,
            1 => Self::East,
            2 => Self::South,
            _ => Self::West,
        }
    }

    pub fn index(self) -> u32 {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Unit vector on the ground plane pointing out through the door edge.
    pub fn outward(self) -> DVec2 {
        match self {
            Self::North => DVec2::new(0.0, -1.0),
            Self::East => DVec2::new(1.0, 0.0),
            Self::South => DVec2::new(0.0, 1.0),
            Self::West => DVec2::new(-1.0, 0.0),
        }
    }
}

/// Logical window axis. Rows advance along world z, columns along world x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Row,
    Col,
}

/// Direction the window slides by one cell.
///
/// `PosCol` means the observer moved toward +x: every column moves one slot
/// toward index 0 and the last column is regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftDirection {
    PosRow,
    NegRow,
    PosCol,
    NegCol,
}

impl ShiftDirection {
    pub const ALL: [ShiftDirection; 4] = [
        ShiftDirection::PosRow,
        ShiftDirection::NegRow,
        ShiftDirection::PosCol,
        ShiftDirection::NegCol,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Self::PosRow | Self::NegRow => Axis::Row,
            Self::PosCol | Self::NegCol => Axis::Col,
        }
    }

    /// +1 when the window advances toward higher indices, -1 otherwise.
    pub fn sign(self) -> f64 {
        match self {
            Self::PosRow | Self::PosCol => 1.0,
            Self::NegRow | Self::NegCol => -1.0,
        }
    }

    pub fn along(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::Row, true) => Self::PosRow,
            (Axis::Row, false) => Self::NegRow,
            (Axis::Col, true) => Self::PosCol,
            (Axis::Col, false) => Self::NegCol,
        }
    }
}

impl fmt::Display for ShiftDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PosRow => "+row",
            Self::NegRow => "-row",
            Self::PosCol => "+col",
            Self::NegCol => "-col",
        };
        f.write_str(s)
    }
}

/// Axis-aligned rectangle on the ground plane (`x` in `.x`, `z` in `.y`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub min: DVec2,
    pub max: DVec2,
}

impl Footprint {
    /// Rectangle `[origin, origin + size]` on both axes.
    pub fn from_origin(origin: DVec2, size: f64) -> Self {
        Self {
            min: origin,
            max: origin + DVec2::splat(size),
        }
    }

    /// Rectangle `center ± half_extent` on both axes.
    pub fn centered(center: DVec2, half_extent: f64) -> Self {
        Self {
            min: center - DVec2::splat(half_extent),
            max: center + DVec2::splat(half_extent),
        }
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: rectangles that only touch along an edge are disjoint.
    pub fn overlaps(&self, other: &Footprint) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_reduces_modulo_four() {
        assert_eq!(Facing::from_index(0), Facing::North);
        assert_eq!(Facing::from_index(5), Facing::East);
        assert_eq!(Facing::from_index(7), Facing::West);
        assert_eq!(Facing::from_index(Facing::South.index()), Facing::South);
    }

    #[test]
    fn north_door_faces_negative_z() {
        assert_eq!(Facing::North.outward(), DVec2::new(0.0, -1.0));
    }

    #[test]
    fn shift_direction_axes() {
        assert_eq!(ShiftDirection::PosCol.axis(), Axis::Col);
        assert_eq!(ShiftDirection::NegRow.axis(), Axis::Row);
        assert_eq!(ShiftDirection::along(Axis::Col, false), ShiftDirection::NegCol);
        assert_eq!(ShiftDirection::PosRow.to_string(), "+row");
    }

    #[test]
    fn touching_footprints_are_disjoint() {
        let a = Footprint::from_origin(DVec2::ZERO, 9.0);
        let b = Footprint::from_origin(DVec2::new(9.0, 0.0), 9.0);
        assert!(!a.overlaps(&b));

        let c = Footprint::centered(DVec2::new(9.0, 4.5), 0.5);
        assert!(a.overlaps(&c));
        assert_eq!(a.center(), DVec2::splat(4.5));
    }
}
