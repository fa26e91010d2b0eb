use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Near clip distance shared by every projection.
pub const NEAR_PLANE: f32 = 0.01;
/// Far clip distance shared by every projection.
pub const FAR_PLANE: f32 = 1000.0;

/// How the camera maps view space onto the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Projection {
    #[default]
    Perspective,
    /// `fovy` is read as the visible world height instead of an angle.
    Orthographic,
}

/// Look-at camera. Owned by the top-level configuration, read-only to the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraParams {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees (perspective) or world units (orthographic).
    pub fovy: f32,
    pub projection: Projection,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 20.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fovy: 60.0,
            projection: Projection::Perspective,
        }
    }
}

impl CameraParams {
    /// Unit vector from the camera towards its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            Projection::Perspective => {
                Mat4::perspective_rh(self.fovy.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
            }
            Projection::Orthographic => {
                let top = self.fovy * 0.5;
                let right = top * aspect;
                Mat4::orthographic_rh(-right, right, -top, top, NEAR_PLANE, FAR_PLANE)
            }
        }
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// True when the camera can produce a usable view matrix.
    pub fn is_well_formed(&self) -> bool {
        let fwd = self.target - self.position;
        self.position.is_finite()
            && self.target.is_finite()
            && self.up.is_finite()
            && fwd.length_squared() > f32::EPSILON
            && fwd.cross(self.up).length_squared() > f32::EPSILON
            && self.fovy.is_finite()
            && self.fovy > 0.0
    }
}

/// Size of the drawable area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800, 450)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_down_at_origin() {
        let cam = CameraParams::default();
        assert!(cam.is_well_formed());
        assert!(cam.forward().y < 0.0);
        let vp = cam.view_projection(Viewport::default().aspect());
        assert!(vp.is_finite());
    }

    #[test]
    fn camera_looking_along_up_is_rejected() {
        let cam = CameraParams {
            position: Vec3::new(0.0, 10.0, 0.0),
            target: Vec3::ZERO,
            ..CameraParams::default()
        };
        assert!(!cam.is_well_formed());
    }

    #[test]
    fn orthographic_projection_is_finite() {
        let cam = CameraParams {
            projection: Projection::Orthographic,
            fovy: 40.0,
            ..CameraParams::default()
        };
        assert!(cam.projection_matrix(16.0 / 9.0).is_finite());
    }

    #[test]
    fn viewport_aspect_never_divides_by_zero() {
        assert_eq!(Viewport::new(800, 0).aspect(), 800.0);
        assert!((Viewport::default().aspect() - 800.0 / 450.0).abs() < 1e-6);
    }
}
