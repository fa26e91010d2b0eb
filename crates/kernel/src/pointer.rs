use glam::{Vec2, Vec3};
use headway_common::{Aabb, CameraParams, Projection, Ray, RayHit, Viewport};
use serde::{Deserialize, Serialize};

/// Where the pointer lands in the world this frame.
///
/// Rebuilt every tick. When `hit.hit` is false, `hit.point` is the
/// [`RayHit::MISS`] sentinel (`Vec3::ZERO`) and must not be used.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerProjection {
    /// Pointer position in window pixels.
    pub screen: Vec2,
    pub ray: Ray,
    pub hit: RayHit,
}

impl PointerProjection {
    /// The ground point under the pointer, if the ray reached the pick volume.
    pub fn world_point(&self) -> Option<Vec3> {
        self.hit.hit.then_some(self.hit.point)
    }
}

/// Turns screen coordinates into world rays and picks them against a fixed volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerProjector {
    pick_volume: Aabb,
}

impl PointerProjector {
    pub fn new(pick_volume: Aabb) -> Self {
        Self { pick_volume }
    }

    /// Unproject a pixel through the camera.
    ///
    /// Perspective rays start at the camera position; orthographic rays start
    /// on the near plane and share the camera's forward direction.
    pub fn project(screen: Vec2, camera: &CameraParams, viewport: Viewport) -> Ray {
        let width = viewport.width.max(1) as f32;
        let height = viewport.height.max(1) as f32;
        let ndc_x = 2.0 * screen.x / width - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / height;

        let inverse = camera.view_projection(viewport.aspect()).inverse();
        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));

        match camera.projection {
            Projection::Perspective => Ray::new(camera.position, far - camera.position),
            Projection::Orthographic => Ray::new(near, far - near),
        }
    }

    pub fn intersect(&self, ray: &Ray) -> RayHit {
        self.pick_volume.intersect(ray)
    }

    /// Project and pick in one go.
    pub fn update(&self, screen: Vec2, camera: &CameraParams, viewport: Viewport) -> PointerProjection {
        let ray = Self::project(screen, camera, viewport);
        let hit = self.intersect(&ray);
        PointerProjection { screen, ray, hit }
    }
}

impl Default for PointerProjector {
    fn default() -> Self {
        Self::new(Aabb::ground())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(viewport: Viewport) -> Vec2 {
        Vec2::new(viewport.width as f32 / 2.0, viewport.height as f32 / 2.0)
    }

    #[test]
    fn screen_center_follows_camera_forward() {
        let camera = CameraParams::default();
        let viewport = Viewport::default();
        let ray = PointerProjector::project(center(viewport), &camera, viewport);
        assert!((ray.origin - camera.position).length() < 1e-4);
        assert!((ray.direction - camera.forward()).length() < 1e-3);
    }

    #[test]
    fn screen_center_lands_on_ground_plane() {
        let projector = PointerProjector::default();
        let viewport = Viewport::default();
        let proj = projector.update(center(viewport), &CameraParams::default(), viewport);
        let point = proj.world_point().expect("center of screen should hit the ground");
        // camera (0,20,10) looking at origin crosses y=1 at z=0.5
        assert!((point - Vec3::new(0.0, 1.0, 0.5)).length() < 1e-2);
    }

    #[test]
    fn right_half_of_screen_maps_to_positive_x() {
        let projector = PointerProjector::default();
        let viewport = Viewport::default();
        let proj = projector.update(Vec2::new(600.0, 225.0), &CameraParams::default(), viewport);
        assert!(proj.world_point().unwrap().x > 0.0);
    }

    #[test]
    fn looking_above_horizon_misses() {
        let projector = PointerProjector::default();
        let camera = CameraParams {
            position: Vec3::new(0.0, 5.0, 0.0),
            target: Vec3::new(0.0, 5.0, -10.0),
            ..CameraParams::default()
        };
        let viewport = Viewport::default();
        let proj = projector.update(Vec2::new(400.0, 0.0), &camera, viewport);
        assert!(!proj.hit.hit);
        assert_eq!(proj.hit.point, Vec3::ZERO);
        assert!(proj.world_point().is_none());
        assert_eq!(proj.screen, Vec2::new(400.0, 0.0));
    }

    #[test]
    fn orthographic_rays_are_parallel() {
        let camera = CameraParams {
            projection: Projection::Orthographic,
            fovy: 30.0,
            ..CameraParams::default()
        };
        let viewport = Viewport::default();
        let a = PointerProjector::project(Vec2::new(100.0, 100.0), &camera, viewport);
        let b = PointerProjector::project(Vec2::new(700.0, 400.0), &camera, viewport);
        assert!((a.direction - b.direction).length() < 1e-4);
        assert!((a.origin - b.origin).length() > 1.0);
    }

    #[test]
    fn zero_sized_viewport_stays_finite() {
        let ray = PointerProjector::project(Vec2::ZERO, &CameraParams::default(), Viewport::new(0, 0));
        assert!(ray.origin.is_finite());
        assert!(ray.direction.is_finite());
    }
}
