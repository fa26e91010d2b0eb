//! wgpu render backend for the body-and-turret scene.
//!
//! Everything is drawn as colored line segments: the ground grid, the body
//! cube wireframe, the heading line, the turret aim line and a marker where
//! the pointer meets the ground.
//!
//! # Invariants
//! - Renderer never mutates simulation state.
//! - Line geometry is built on the CPU from a [`FrameSnapshot`](headway_kernel::FrameSnapshot)
//!   each frame and is testable without a GPU.

mod gpu;
mod lines;
mod shaders;

pub use gpu::WgpuRenderer;
pub use lines::{LineScene, LineVertex};
