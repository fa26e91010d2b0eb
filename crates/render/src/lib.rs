//! Rendering adapter: renderer-agnostic interface over frame snapshots.
//!
//! # Invariants
//! - Renderers read [`FrameSnapshot`](headway_kernel::FrameSnapshot) copies and
//!   never touch simulation state.
//! - Every backend draws the same scene: ground grid, body cube, heading line,
//!   turret aim line, pointer marker, debug text.

mod renderer;

pub use renderer::{DebugTextRenderer, Renderer, SceneStyle};

pub fn crate_info() -> &'static str {
    concat!("headway-render v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
