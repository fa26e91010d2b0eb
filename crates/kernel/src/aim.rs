use crate::heading::{planar_bearing, wrap_degrees};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Ground-plane offsets shorter than this carry no usable bearing.
const AIM_EPSILON: f32 = 1e-4;

/// Turret bearing for one frame. Pure derived data; never fed back into the body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimState {
    /// Turret pivot: body position raised by the mount height.
    pub origin: Vec3,
    /// Bearing in `[0, 360)`, same convention as the planar heading.
    pub bearing_deg: f32,
    /// Unit vector from the turret pivot to the target, or zero when there is no target.
    pub direction: Vec3,
    /// False when `bearing_deg` is the fallback rather than a measured bearing.
    pub locked: bool,
}

impl AimState {
    /// No target this frame.
    pub fn idle(origin: Vec3, fallback_bearing_deg: f32) -> Self {
        Self {
            origin,
            bearing_deg: wrap_degrees(fallback_bearing_deg),
            direction: Vec3::ZERO,
            locked: false,
        }
    }

    /// Bearing relative to a body heading, in `[0, 360)`. Zero means dead ahead.
    pub fn relative_to(&self, heading_deg: f32) -> f32 {
        wrap_degrees(self.bearing_deg - heading_deg)
    }
}

/// Computes the turret bearing from the body position and a world target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurretAimer {
    pub mount_height: f32,
    pub fallback_bearing_deg: f32,
}

impl TurretAimer {
    pub fn new(mount_height: f32, fallback_bearing_deg: f32) -> Self {
        Self {
            mount_height,
            fallback_bearing_deg,
        }
    }

    pub fn turret_origin(&self, body_position: Vec3) -> Vec3 {
        body_position + Vec3::Y * self.mount_height
    }

    /// Aim at `target`.
    ///
    /// The bearing is measured in the ground plane. A target straight above,
    /// straight below, or on the pivot has no bearing and yields the fallback.
    pub fn compute(&self, body_position: Vec3, target: Vec3) -> AimState {
        let origin = self.turret_origin(body_position);
        let offset = target - origin;
        let ground = Vec2::new(offset.x, offset.z);

        if !offset.is_finite() || ground.length() < AIM_EPSILON {
            return AimState {
                direction: offset.normalize_or_zero(),
                ..AimState::idle(origin, self.fallback_bearing_deg)
            };
        }

        AimState {
            origin,
            bearing_deg: planar_bearing(offset),
            direction: offset.normalize(),
            locked: true,
        }
    }

    /// Aim at an optional target; `None` gives the idle aim.
    pub fn compute_or_idle(&self, body_position: Vec3, target: Option<Vec3>) -> AimState {
        match target {
            Some(t) => self.compute(body_position, t),
            None => AimState::idle(self.turret_origin(body_position), self.fallback_bearing_deg),
        }
    }
}

impl Default for TurretAimer {
    fn default() -> Self {
        Self::new(2.5, 0.0)
    }
}
