use cityscape_kernel::{Cell, Observer};
use glam::{DVec2, Vec3};

/// Height of one story in world units.
pub const STORY_HEIGHT: f32 = 2.0;
/// Half the side of the ground quad centred under the observer.
pub const GROUND_HALF_EXTENT: f32 = 200.0;
pub const GROUND_SHADE: f32 = 0.3;

/// Facade columns across one building face; even slots are piers, odd slots are window bays.
const FACADE_SLOTS: usize = 9;
/// Depth of the window recess behind the facade.
const RECESS: f32 = 0.1;
/// Ground-floor wall height, leaving the first window row above it.
const GROUND_FLOOR: f32 = STORY_HEIGHT * 1.75;
const DOOR_HEIGHT: f32 = STORY_HEIGHT * 1.25;

/// A flat shaded quad in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub vertices: [Vec3; 4],
    pub shade: f32,
    /// `vertices[1] - vertices[0]`
    pub edge_a: Vec3,
    /// `vertices[2] - vertices[0]`
    pub edge_b: Vec3,
}

impl Quad {
    pub fn new(shade: f32, vertices: [Vec3; 4]) -> Self {
        Self {
            vertices,
            shade,
            edge_a: vertices[1] - vertices[0],
            edge_b: vertices[2] - vertices[0],
        }
    }

    /// Unnormalised face normal for shading.
    pub fn normal(&self) -> Vec3 {
        self.edge_b.cross(self.edge_a)
    }
}

/// Builds a building in local space (door face at z = 0, body toward +z)
/// and places each quad in the world on the way out.
struct Facade {
    origin: DVec2,
    width: f32,
    quarter_turns: u32,
    quads: Vec<Quad>,
}

impl Facade {
    fn place(&self, local: Vec3) -> Vec3 {
        let half = self.width / 2.0;
        let (mut dx, mut dz) = (local.x - half, local.z - half);
        for _ in 0..self.quarter_turns {
            (dx, dz) = (-dz, dx);
        }
        Vec3::new(
            (self.origin.x + f64::from(half + dx)) as f32,
            local.y,
            (self.origin.y + f64::from(half + dz)) as f32,
        )
    }

    fn push(&mut self, shade: f32, corners: [Vec3; 4]) {
        let vertices = corners.map(|v| self.place(v));
        self.quads.push(Quad::new(shade, vertices));
    }
}

/// Every quad of one building.
///
/// Piers and recessed window bays across the door face, a parapet per bay,
/// the ground floor split around the door, the door leaf (swung inward when
/// open) and the three remaining walls. Yields `20 * height - 25` quads.
pub fn building_quads(cell: &Cell, footprint: f64) -> Vec<Quad> {
    let w = footprint as f32;
    let top = cell.height as f32 * STORY_HEIGHT;
    let slot = w / FACADE_SLOTS as f32;
    let (shade, glass) = (cell.primary_shade, cell.accent_shade);

    let mut f = Facade {
        origin: cell.world_pos,
        width: w,
        quarter_turns: cell.facing.index(),
        quads: Vec::with_capacity((20 * cell.height.max(2) - 25).max(0) as usize),
    };

    let rows = (cell.height - 2).max(0);
    for s in 0..FACADE_SLOTS {
        let x0 = s as f32 * slot;
        let x1 = x0 + slot;
        if s % 2 == 0 {
            f.push(
                shade,
                [
                    Vec3::new(x0, STORY_HEIGHT * 1.5, 0.0),
                    Vec3::new(x0, top, 0.0),
                    Vec3::new(x1, top, 0.0),
                    Vec3::new(x1, STORY_HEIGHT * 1.5, 0.0),
                ],
            );
            continue;
        }
        for row in 0..rows {
            let y = STORY_HEIGHT * 1.5 + row as f32 * STORY_HEIGHT;
            let sill = y + STORY_HEIGHT / 4.0;
            let lintel = y + STORY_HEIGHT * 3.0 / 4.0;
            let head = y + STORY_HEIGHT * 5.0 / 4.0;
            // spandrel
            f.push(
                shade,
                [
                    Vec3::new(x0, lintel, 0.0),
                    Vec3::new(x0, head, 0.0),
                    Vec3::new(x1, head, 0.0),
                    Vec3::new(x1, lintel, 0.0),
                ],
            );
            // reveals
            f.push(
                shade,
                [
                    Vec3::new(x0, sill, RECESS),
                    Vec3::new(x0, sill, 0.0),
                    Vec3::new(x0, lintel, 0.0),
                    Vec3::new(x0, lintel, RECESS),
                ],
            );
            f.push(
                shade,
                [
                    Vec3::new(x1, sill, 0.0),
                    Vec3::new(x1, sill, RECESS),
                    Vec3::new(x1, lintel, RECESS),
                    Vec3::new(x1, lintel, 0.0),
                ],
            );
            // soffit
            f.push(
                shade,
                [
                    Vec3::new(x0, lintel, RECESS),
                    Vec3::new(x0, lintel, 0.0),
                    Vec3::new(x1, lintel, 0.0),
                    Vec3::new(x1, lintel, RECESS),
                ],
            );
            f.push(
                glass,
                [
                    Vec3::new(x0, sill, RECESS),
                    Vec3::new(x0, lintel, RECESS),
                    Vec3::new(x1, lintel, RECESS),
                    Vec3::new(x1, sill, RECESS),
                ],
            );
        }
        // parapet
        f.push(
            shade,
            [
                Vec3::new(x0, top - STORY_HEIGHT / 4.0, 0.0),
                Vec3::new(x0, top, 0.0),
                Vec3::new(x1, top, 0.0),
                Vec3::new(x1, top - STORY_HEIGHT / 4.0, 0.0),
            ],
        );
    }

    let door_l = slot * 4.0;
    let door_r = slot * 5.0;
    f.push(
        shade,
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, GROUND_FLOOR, 0.0),
            Vec3::new(door_l, GROUND_FLOOR, 0.0),
            Vec3::new(door_l, 0.0, 0.0),
        ],
    );
    f.push(
        shade,
        [
            Vec3::new(w, 0.0, 0.0),
            Vec3::new(w, GROUND_FLOOR, 0.0),
            Vec3::new(door_r, GROUND_FLOOR, 0.0),
            Vec3::new(door_r, 0.0, 0.0),
        ],
    );
    let leaf_end = if cell.open {
        Vec3::new(door_l, 0.0, door_r - door_l)
    } else {
        Vec3::new(door_r, 0.0, 0.0)
    };
    f.push(
        glass,
        [
            Vec3::new(door_l, 0.0, 0.0),
            Vec3::new(door_l, DOOR_HEIGHT, 0.0),
            leaf_end + Vec3::Y * DOOR_HEIGHT,
            leaf_end,
        ],
    );

    f.push(
        shade,
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, w),
            Vec3::new(0.0, top, w),
            Vec3::new(0.0, top, 0.0),
        ],
    );
    f.push(
        shade,
        [
            Vec3::new(w, 0.0, 0.0),
            Vec3::new(w, top, 0.0),
            Vec3::new(w, top, w),
            Vec3::new(w, 0.0, w),
        ],
    );
    f.push(
        shade,
        [
            Vec3::new(w, top, w),
            Vec3::new(0.0, top, w),
            Vec3::new(0.0, 0.0, w),
            Vec3::new(w, 0.0, w),
        ],
    );

    f.quads
}

/// Ground plane centred under the observer.
pub fn ground_quad(observer: &Observer) -> Quad {
    let x = observer.position.x as f32;
    let z = observer.position.y as f32;
    let r = GROUND_HALF_EXTENT;
    Quad::new(
        GROUND_SHADE,
        [
            Vec3::new(x - r, 0.0, z - r),
            Vec3::new(x - r, 0.0, z + r),
            Vec3::new(x + r, 0.0, z + r),
            Vec3::new(x + r, 0.0, z - r),
        ],
    )
}
