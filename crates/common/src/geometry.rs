use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Direction components smaller than this are treated as parallel to a slab.
const PARALLEL_EPSILON: f32 = 1e-8;

/// A half-line in world space. `direction` is unit length when built by [`Ray::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing the direction. A zero direction stays zero.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::ZERO,
        }
    }
}

/// Result of a ray query.
///
/// `point`, `normal` and `distance` are only meaningful when `hit` is true.
/// A miss always reports [`RayHit::MISS`]: zero point, zero normal, zero distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RayHit {
    pub hit: bool,
    pub distance: f32,
    pub point: Vec3,
    pub normal: Vec3,
}

impl RayHit {
    pub const MISS: Self = Self {
        hit: false,
        distance: 0.0,
        point: Vec3::ZERO,
        normal: Vec3::ZERO,
    };
}

impl Default for RayHit {
    fn default() -> Self {
        Self::MISS
    }
}

/// Axis-aligned box. Zero thickness on an axis is allowed and describes a
/// bounded plane, which is how the ground pick volume is modelled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The `[-20,20] x {1} x [-20,20]` pick plane the pointer is projected onto.
    pub fn ground() -> Self {
        Self::new(Vec3::new(-20.0, 1.0, -20.0), Vec3::new(20.0, 1.0, 20.0))
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    /// Slab test.
    ///
    /// A ray starting inside the box hits where it leaves, with the normal
    /// pointing back into the box.
    pub fn intersect(&self, ray: &Ray) -> RayHit {
        let dir = ray.direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return RayHit::MISS;
        }

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        let mut near_normal = Vec3::ZERO;
        let mut far_normal = Vec3::ZERO;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let d = dir[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < PARALLEL_EPSILON {
                if origin < lo || origin > hi {
                    return RayHit::MISS;
                }
                continue;
            }

            let mut unit = Vec3::ZERO;
            unit[axis] = 1.0;

            let inv = 1.0 / d;
            let t_lo = (lo - origin) * inv;
            let t_hi = (hi - origin) * inv;
            // Moving up the axis enters through the min face, whose outward normal points down.
            let (t0, t1, entry, exit) = if d > 0.0 {
                (t_lo, t_hi, -unit, unit)
            } else {
                (t_hi, t_lo, unit, -unit)
            };

            if t0 > t_near {
                t_near = t0;
                near_normal = entry;
            }
            if t1 < t_far {
                t_far = t1;
                far_normal = exit;
            }
            if t_near > t_far {
                return RayHit::MISS;
            }
        }

        if t_far < 0.0 {
            return RayHit::MISS;
        }

        let (distance, normal) = if t_near >= 0.0 {
            (t_near, near_normal)
        } else {
            (t_far, -far_normal)
        };

        RayHit {
            hit: true,
            distance,
            point: ray.origin + dir * distance,
            normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_normalizes_direction() {
        let r = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(r.direction, Vec3::Z);
        assert_eq!(r.origin, Vec3::ZERO);
    }

    #[test]
    fn downward_ray_hits_ground_plane() {
        let ground = Aabb::ground();
        let ray = Ray::new(Vec3::new(3.0, 10.0, -4.0), Vec3::NEG_Y);
        let hit = ground.intersect(&ray);
        assert!(hit.hit);
        assert!((hit.point - Vec3::new(3.0, 1.0, -4.0)).length() < 1e-5);
        assert!((hit.distance - 9.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn slanted_ray_hits_ground_plane() {
        let ground = Aabb::ground();
        let ray = Ray::new(Vec3::new(0.0, 20.0, 10.0), Vec3::new(0.0, -19.0, -10.0));
        let hit = ground.intersect(&ray);
        assert!(hit.hit);
        assert!((hit.point.y - 1.0).abs() < 1e-4);
        assert!(hit.point.z.abs() < 1e-3);
    }

    #[test]
    fn upward_ray_outside_box_misses() {
        let ground = Aabb::ground();
        let ray = Ray::new(Vec3::new(30.0, 0.0, 30.0), Vec3::Y);
        let hit = ground.intersect(&ray);
        assert!(!hit.hit);
        assert_eq!(hit, RayHit::MISS);
        assert_eq!(hit.point, Vec3::ZERO);
    }

    #[test]
    fn ray_pointing_away_misses() {
        let ground = Aabb::ground();
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(!ground.intersect(&ray).hit);
    }

    #[test]
    fn ray_parallel_to_plane_misses() {
        let ground = Aabb::ground();
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::X);
        assert!(!ground.intersect(&ray).hit);
    }

    #[test]
    fn ray_outside_footprint_misses() {
        let ground = Aabb::ground();
        let ray = Ray::new(Vec3::new(25.0, 10.0, 0.0), Vec3::NEG_Y);
        assert!(!ground.intersect(&ray).hit);
    }

    #[test]
    fn zero_direction_misses() {
        let ground = Aabb::ground();
        let ray = Ray {
            origin: Vec3::new(0.0, 1.0, 0.0),
            direction: Vec3::ZERO,
        };
        assert!(!ground.intersect(&ray).hit);
    }

    #[test]
    fn ray_from_inside_solid_box_hits_exit_face() {
        let unit = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let hit = unit.intersect(&ray);
        assert!(hit.hit);
        assert!((hit.distance - 1.0).abs() < 1e-6);
        assert_eq!(hit.normal, Vec3::NEG_X);
    }

    #[test]
    fn box_validity() {
        let ground = Aabb::ground();
        assert!(ground.is_valid());
        let inverted = Aabb::new(Vec3::ONE, Vec3::ZERO);
        assert!(!inverted.is_valid());
    }
}
