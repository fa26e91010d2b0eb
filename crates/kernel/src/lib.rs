//! Orientation core: body heading, kinematic integration, pointer picking,
//! turret aim, and the frame loop that ties them together.
//!
//! # Invariants
//! - The body is owned by [`Simulation`]; renderers only receive [`FrameSnapshot`] copies.
//! - Forward vectors are always derived from the heading, never stored independently.
//! - Degenerate inputs (missed pick, zero aim offset, collapsed quaternion)
//!   resolve to defined fallbacks, never NaN.

pub mod aim;
pub mod body;
pub mod config;
pub mod frame_loop;
pub mod heading;
pub mod integrator;
pub mod pointer;

pub use aim::{AimState, TurretAimer};
pub use body::BodyState;
pub use config::{ConfigError, SimConfig, WindowConfig};
pub use frame_loop::{FrameSnapshot, LoopPhase, Simulation};
pub use heading::{Heading, HeadingModel, PlanarHeading, QuatHeading};
pub use integrator::integrate;
pub use pointer::{PointerProjection, PointerProjector};

pub fn crate_info() -> &'static str {
    concat!("headway-kernel v", env!("CARGO_PKG_VERSION"))
}
