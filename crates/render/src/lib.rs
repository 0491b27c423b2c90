//! Rendering adapter: backend-agnostic view of the scene.
//!
//! # Invariants
//! - Renderers read the world; they never mutate it.
//! - Draw order is the scene's pre-order traversal (back to front).

mod draw_list;
mod renderer;

pub use draw_list::DrawList;
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
