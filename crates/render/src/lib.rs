//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderer cannot mutate world truth directly.
//! - Render state derives from world state and view.
//!
//! Frames are flat lists of shaded quads in world space. A GPU backend
//! consumes the same `Frame` through the `Renderer` trait; the debug text
//! renderer is the only backend shipped here.

mod quad;
mod renderer;

pub use quad::{GROUND_HALF_EXTENT, GROUND_SHADE, Quad, STORY_HEIGHT, building_quads, ground_quad};
pub use renderer::{DebugTextRenderer, Frame, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "cityscape-render v0.1.0"
}
