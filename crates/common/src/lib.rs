//! Shared types for the headway demonstrator.
//!
//! # Invariants
//! - Types here carry no simulation state; they describe inputs, the camera,
//!   and ray geometry that every other crate agrees on.
//! - Nothing in this crate depends on a window, GPU, or input backend.

pub mod camera;
pub mod geometry;
pub mod intent;

pub use camera::{CameraParams, Projection, Viewport};
pub use geometry::{Aabb, Ray, RayHit};
pub use intent::{FrameIntents, IntentSource, ThrottleIntent, TurnIntent};
