use std::fmt::Write as _;

use cityscape_kernel::{Observer, WorldState};
use glam::Vec3;

use crate::quad::{Quad, building_quads, ground_quad};

/// Eye height above the ground plane.
const EYE_HEIGHT: f32 = 1.5;

/// Camera/view configuration for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, EYE_HEIGHT, 0.0),
            target: Vec3::new(1.0, EYE_HEIGHT, 0.0),
            up: Vec3::Y,
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl RenderView {
    /// First-person view from the observer's position and look angles.
    ///
    /// The target's height is the pitch angle itself, not a point on a sphere.
    pub fn from_observer(observer: &Observer) -> Self {
        let x = observer.position.x as f32;
        let z = observer.position.y as f32;
        let yaw = observer.look.yaw as f32;
        Self {
            eye: Vec3::new(x, EYE_HEIGHT, z),
            target: Vec3::new(x + yaw.cos(), observer.look.pitch as f32, z - yaw.sin()),
            ..Self::default()
        }
    }
}

/// Everything a backend needs to draw one tick.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub tick: u64,
    /// Ground first, then each building in row-major window order.
    pub quads: Vec<Quad>,
    pub buildings: usize,
    pub open_doors: usize,
}

impl Frame {
    /// Build the frame from the current window and observer.
    pub fn capture(world: &WorldState) -> Self {
        let footprint = world.config().footprint;
        let mut quads = vec![ground_quad(world.observer())];
        let mut buildings = 0;
        let mut open_doors = 0;
        for cell in world.grid().cells() {
            quads.extend(building_quads(cell, footprint));
            buildings += 1;
            open_doors += usize::from(cell.open);
        }
        tracing::trace!(tick = world.tick(), quads = quads.len(), "frame captured");
        Self {
            tick: world.tick(),
            quads,
            buildings,
            open_doors,
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads a captured frame and a view configuration, then
/// produces output. It never sees the world itself.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame with the given view.
    fn render(&self, frame: &Frame, view: &RenderView) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable summary of a frame. Useful for CLI output,
/// logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Also list every quad's first vertex and shade.
    pub verbose: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &Frame, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Frame (tick={}) ===", frame.tick);
        let _ = writeln!(
            out,
            "Buildings: {} Quads: {} Open doors: {}",
            frame.buildings,
            frame.quads.len(),
            frame.open_doors
        );
        let _ = writeln!(
            out,
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}",
            view.eye.x, view.eye.y, view.eye.z, view.target.x, view.target.y, view.target.z, view.fov_degrees
        );
        if self.verbose {
            for q in &frame.quads {
                let p = q.vertices[0];
                let _ = writeln!(out, "  quad ({:.2}, {:.2}, {:.2}) shade={:.2}", p.x, p.y, p.z, q.shade);
            }
        }
        out
    }
}
