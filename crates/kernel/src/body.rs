use crate::heading::{Heading, HeadingModel};
use crate::integrator;
use glam::Vec3;
use headway_common::{ThrottleIntent, TurnIntent};
use serde::{Deserialize, Serialize};

/// The rigid body the player drives. Owned by the simulation; the renderer
/// only ever sees copies of it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyState {
    pub position: Vec3,
    pub heading: Heading,
}

impl BodyState {
    /// A body at the origin with the model's initial heading.
    pub fn new(model: HeadingModel) -> Self {
        Self {
            position: Vec3::ZERO,
            heading: Heading::new(model),
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.heading.forward()
    }

    pub fn turn(&mut self, intent: TurnIntent, rate_deg: f32) {
        self.heading.apply_turn(intent, rate_deg);
    }

    pub fn drive(&mut self, throttle: ThrottleIntent, speed: f32) {
        self.position = integrator::integrate(self.position, self.forward(), throttle, speed);
    }

    /// Back to the origin with the reset heading. Calling it again changes nothing.
    pub fn reset(&mut self, reset_heading_deg: f32) {
        self.position = Vec3::ZERO;
        self.heading.reset(reset_heading_deg);
    }
}
