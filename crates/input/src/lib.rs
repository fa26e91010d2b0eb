//! Input sampling: raw button and pointer state mapped to per-tick intents.
//!
//! # Invariants
//! - The simulation consumes [`FrameIntents`](headway_common::FrameIntents), never raw events.
//! - Reset is edge-triggered; turn and throttle are level-triggered.

pub mod action;
pub mod sampler;

pub use action::Action;
pub use sampler::InputSampler;

pub fn crate_info() -> &'static str {
    concat!("headway-input v", env!("CARGO_PKG_VERSION"))
}
