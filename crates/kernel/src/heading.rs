use glam::{Quat, Vec3};
use headway_common::TurnIntent;
use serde::{Deserialize, Serialize};

pub const FULL_TURN_DEG: f32 = 360.0;

/// Largest `f32` strictly below a full turn. A planar heading that drops
/// below zero is reset here, keeping the value inside `[0, 360)`.
pub const UPPER_BOUNDARY_DEG: f32 = f32::from_bits(FULL_TURN_DEG.to_bits() - 1);

/// Below this, `sqrt(1 - w^2)` is too small to recover a rotation axis.
const AXIS_EPSILON: f32 = 0.001;

/// Modulo-wrap an arbitrary angle into `[0, 360)`.
///
/// Used for derived bearings. Turning a planar heading does NOT use this;
/// see [`PlanarHeading::apply_turn`].
pub fn wrap_degrees(deg: f32) -> f32 {
    if !deg.is_finite() {
        return 0.0;
    }
    let wrapped = deg.rem_euclid(FULL_TURN_DEG);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= FULL_TURN_DEG { 0.0 } else { wrapped }
}

/// Planar bearing of a vector in the ground plane: `atan2(z, x)` in degrees, in `[0, 360)`.
pub fn planar_bearing(v: Vec3) -> f32 {
    wrap_degrees(v.z.atan2(v.x).to_degrees())
}

/// Which heading representation the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingModel {
    #[default]
    Planar,
    Quaternion,
}

/// Scalar heading in degrees, with its forward vector cached alongside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarHeading {
    degrees: f32,
    forward: Vec3,
}

impl PlanarHeading {
    /// Build from any angle; out-of-range values are modulo-wrapped.
    pub fn from_degrees(degrees: f32) -> Self {
        let degrees = wrap_degrees(degrees);
        Self {
            degrees,
            forward: forward_from_degrees(degrees),
        }
    }

    pub fn degrees(&self) -> f32 {
        self.degrees
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Subtract (left) or add (right) `rate_deg`.
    ///
    /// A left turn is a positive rotation about +Y, which lowers the bearing
    /// `atan2(z, x)`; this keeps the planar and quaternion models in step.
    ///
    /// Crossing a full turn snaps to a boundary instead of wrapping: reaching
    /// 360 or more gives exactly 0, dropping below 0 gives [`UPPER_BOUNDARY_DEG`].
    /// The overshoot is discarded.
    pub fn apply_turn(&mut self, intent: TurnIntent, rate_deg: f32) {
        if intent == TurnIntent::None {
            return;
        }
        let mut next = self.degrees - intent.sign() * rate_deg;
        if !next.is_finite() {
            next = 0.0;
        } else if next >= FULL_TURN_DEG {
            next = 0.0;
        } else if next < 0.0 {
            next = UPPER_BOUNDARY_DEG;
        }
        self.degrees = next;
        self.forward = forward_from_degrees(next);
    }

    /// Rotation that maps +X onto the forward vector.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.degrees.to_radians())
    }
}

impl Default for PlanarHeading {
    fn default() -> Self {
        Self::from_degrees(0.0)
    }
}

fn forward_from_degrees(degrees: f32) -> Vec3 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec3::new(cos, 0.0, sin)
}

/// Accumulated rotation, renormalized after every turn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuatHeading {
    rotation: Quat,
}

impl QuatHeading {
    pub fn identity() -> Self {
        Self {
            rotation: Quat::IDENTITY,
        }
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Left-multiply a turn about world up, then renormalize.
    ///
    /// Left is a positive rotation about +Y, right a negative one.
    pub fn apply_turn(&mut self, intent: TurnIntent, rate_deg: f32) {
        if intent == TurnIntent::None {
            return;
        }
        let delta = Quat::from_axis_angle(Vec3::Y, intent.sign() * rate_deg.to_radians());
        self.rotation = normalize_or_identity(delta * self.rotation);
    }

    pub fn forward(&self) -> Vec3 {
        (self.rotation * Vec3::X).normalize_or(Vec3::X)
    }

    pub fn degrees(&self) -> f32 {
        planar_bearing(self.forward())
    }

    /// Axis and angle (degrees) of the accumulated rotation.
    ///
    /// Near the identity the axis is undefined and +X is returned.
    pub fn axis_angle(&self) -> (Vec3, f32) {
        let q = self.rotation;
        let angle = 2.0 * q.w.clamp(-1.0, 1.0).acos();
        let s = (1.0 - q.w * q.w).max(0.0).sqrt();
        let axis = if s < AXIS_EPSILON {
            Vec3::X
        } else {
            Vec3::new(q.x / s, q.y / s, q.z / s)
        };
        (axis, angle.to_degrees())
    }
}

impl Default for QuatHeading {
    fn default() -> Self {
        Self::identity()
    }
}

fn normalize_or_identity(q: Quat) -> Quat {
    let len = q.length();
    if !len.is_finite() || len < f32::EPSILON {
        tracing::debug!("heading quaternion collapsed, falling back to identity");
        Quat::IDENTITY
    } else {
        q / len
    }
}

/// The body's facing, in whichever representation the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Heading {
    Planar(PlanarHeading),
    Quaternion(QuatHeading),
}

impl Heading {
    /// Initial heading for a model: 0 degrees, or the identity rotation.
    pub fn new(model: HeadingModel) -> Self {
        match model {
            HeadingModel::Planar => Self::Planar(PlanarHeading::default()),
            HeadingModel::Quaternion => Self::Quaternion(QuatHeading::identity()),
        }
    }

    pub fn model(&self) -> HeadingModel {
        match self {
            Self::Planar(_) => HeadingModel::Planar,
            Self::Quaternion(_) => HeadingModel::Quaternion,
        }
    }

    pub fn apply_turn(&mut self, intent: TurnIntent, rate_deg: f32) {
        match self {
            Self::Planar(h) => h.apply_turn(intent, rate_deg),
            Self::Quaternion(h) => h.apply_turn(intent, rate_deg),
        }
    }

    /// Planar headings go to `reset_deg`; quaternion headings go to identity.
    pub fn reset(&mut self, reset_deg: f32) {
        *self = match *self {
            Self::Planar(_) => Self::Planar(PlanarHeading::from_degrees(reset_deg)),
            Self::Quaternion(_) => Self::Quaternion(QuatHeading::identity()),
        };
    }

    pub fn forward(&self) -> Vec3 {
        match self {
            Self::Planar(h) => h.forward(),
            Self::Quaternion(h) => h.forward(),
        }
    }

    /// Bearing of the forward vector in `[0, 360)`.
    pub fn degrees(&self) -> f32 {
        match self {
            Self::Planar(h) => h.degrees(),
            Self::Quaternion(h) => h.degrees(),
        }
    }

    /// Rotation to apply to the body model before drawing.
    pub fn rotation(&self) -> Quat {
        match self {
            Self::Planar(h) => h.rotation(),
            Self::Quaternion(h) => h.rotation(),
        }
    }

    pub fn axis_angle(&self) -> (Vec3, f32) {
        match self {
            Self::Planar(h) => QuatHeading {
                rotation: h.rotation(),
            }
            .axis_angle(),
            Self::Quaternion(h) => h.axis_angle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec_close(a: Vec3, b: Vec3, eps: f32) {
        assert!((a - b).length() <= eps, "{a:?} != {b:?}");
    }

    fn expected_forward(deg: f32) -> Vec3 {
        let r = deg.to_radians();
        Vec3::new(r.cos(), 0.0, r.sin())
    }

    #[test]
    fn upper_boundary_is_just_below_full_turn() {
        assert!(UPPER_BOUNDARY_DEG < FULL_TURN_DEG);
        assert!(UPPER_BOUNDARY_DEG > 359.999);
    }

    #[test]
    fn planar_starts_facing_x() {
        let h = PlanarHeading::default();
        assert_eq!(h.degrees(), 0.0);
        assert_eq!(h.forward(), Vec3::X);
    }

    #[test]
    fn planar_crossing_full_turn_snaps_to_zero() {
        let mut h = PlanarHeading::from_degrees(359.6);
        h.apply_turn(TurnIntent::Right, 0.5);
        assert_eq!(h.degrees(), 0.0);
        assert_eq!(h.forward(), Vec3::X);
    }

    #[test]
    fn planar_dropping_below_zero_snaps_to_upper_boundary() {
        let mut h = PlanarHeading::from_degrees(0.2);
        h.apply_turn(TurnIntent::Left, 0.5);
        assert_eq!(h.degrees(), UPPER_BOUNDARY_DEG);
        h.apply_turn(TurnIntent::Left, 0.5);
        assert!((h.degrees() - 359.5).abs() < 1e-3);
    }

    #[test]
    fn planar_stays_in_range_for_mixed_sequences() {
        let mut h = PlanarHeading::default();
        let pattern = [
            TurnIntent::Left,
            TurnIntent::Right,
            TurnIntent::Right,
            TurnIntent::None,
            TurnIntent::Right,
        ];
        for i in 0..5_000 {
            let rate = 0.37 + (i % 7) as f32 * 1.3;
            h.apply_turn(pattern[i % pattern.len()], rate);
            assert!((0.0..FULL_TURN_DEG).contains(&h.degrees()), "{}", h.degrees());
            assert_vec_close(h.forward(), expected_forward(h.degrees()), 1e-6);
            assert!((h.forward().length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn planar_none_intent_is_noop() {
        let mut h = PlanarHeading::from_degrees(42.0);
        h.apply_turn(TurnIntent::None, 10.0);
        assert_eq!(h.degrees(), 42.0);
    }

    #[test]
    fn planar_rotation_maps_x_to_forward() {
        for deg in [0.0, 30.0, 90.0, 181.0, 270.0, 359.0] {
            let h = PlanarHeading::from_degrees(deg);
            assert_vec_close(h.rotation() * Vec3::X, h.forward(), 1e-5);
        }
    }

    #[test]
    fn from_degrees_wraps_by_modulo() {
        assert!((PlanarHeading::from_degrees(370.0).degrees() - 10.0).abs() < 1e-4);
        assert!((PlanarHeading::from_degrees(-90.0).degrees() - 270.0).abs() < 1e-4);
        assert_eq!(PlanarHeading::from_degrees(f32::NAN).degrees(), 0.0);
    }

    #[test]
    fn quaternion_stays_unit_length() {
        let mut h = QuatHeading::identity();
        for i in 0..20_000 {
            let intent = if i % 3 == 0 {
                TurnIntent::Right
            } else {
                TurnIntent::Left
            };
            h.apply_turn(intent, 0.05_f32.to_degrees());
            assert!((h.rotation().length() - 1.0).abs() <= 1e-5);
        }
    }

    #[test]
    fn quaternion_and_planar_turn_the_same_way() {
        let mut q = QuatHeading::identity();
        let mut p = PlanarHeading::default();
        for _ in 0..180 {
            q.apply_turn(TurnIntent::Right, 0.5);
            p.apply_turn(TurnIntent::Right, 0.5);
        }
        assert!((q.degrees() - 90.0).abs() < 1e-2);
        assert_vec_close(q.forward(), p.forward(), 1e-4);

        let mut p = PlanarHeading::from_degrees(90.0);
        for _ in 0..20 {
            q.apply_turn(TurnIntent::Left, 0.5);
            p.apply_turn(TurnIntent::Left, 0.5);
        }
        assert_eq!(p.degrees(), 80.0);
        assert_vec_close(q.forward(), p.forward(), 1e-4);
    }

    #[test]
    fn left_turn_is_positive_rotation_about_up() {
        let step = 0.05_f32;
        let mut q = QuatHeading::identity();
        q.apply_turn(TurnIntent::Left, step.to_degrees());
        let expected = Quat::from_axis_angle(Vec3::Y, step) * Vec3::X;
        assert_vec_close(q.forward(), expected, 1e-5);
        assert!(q.forward().z < 0.0);

        let mut p = PlanarHeading::from_degrees(90.0);
        p.apply_turn(TurnIntent::Left, 0.5);
        assert_eq!(p.degrees(), 89.5);
    }

    #[test]
    fn quaternion_full_left_turns_return_forward() {
        let mut q = QuatHeading::identity();
        for _ in 0..720 {
            q.apply_turn(TurnIntent::Left, 0.5);
        }
        assert_vec_close(q.forward(), Vec3::X, 1e-3);
    }

    #[test]
    fn axis_angle_recovers_all_components() {
        // Off-vertical axis: every component must come back, not just x and y.
        let axis = Vec3::new(1.0, 2.0, 3.0).normalize();
        let h = QuatHeading {
            rotation: Quat::from_axis_angle(axis, 1.0),
        };
        let (got_axis, got_deg) = h.axis_angle();
        assert_vec_close(got_axis, axis, 1e-4);
        assert!((got_deg - 1.0_f32.to_degrees()).abs() < 1e-3);
    }

    #[test]
    fn axis_angle_near_identity_falls_back_to_x() {
        let (axis, deg) = QuatHeading::identity().axis_angle();
        assert_eq!(axis, Vec3::X);
        assert!(deg.abs() < 1e-3);
    }

    #[test]
    fn collapsed_quaternion_falls_back_to_identity() {
        assert_eq!(normalize_or_identity(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)), Quat::IDENTITY);
        assert_eq!(
            normalize_or_identity(Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0)),
            Quat::IDENTITY
        );
    }

    #[test]
    fn heading_reset_per_model() {
        let mut planar = Heading::new(HeadingModel::Planar);
        planar.apply_turn(TurnIntent::Left, 45.0);
        planar.reset(0.1);
        assert_eq!(planar.degrees(), 0.1);

        let mut quat = Heading::new(HeadingModel::Quaternion);
        quat.apply_turn(TurnIntent::Left, 45.0);
        quat.reset(0.1);
        assert_eq!(quat.rotation(), Quat::IDENTITY);
        assert_eq!(quat.model(), HeadingModel::Quaternion);
    }

    #[test]
    fn planar_axis_angle_is_vertical() {
        let h = Heading::Planar(PlanarHeading::from_degrees(90.0));
        let (axis, deg) = h.axis_angle();
        assert_vec_close(axis, Vec3::NEG_Y, 1e-4);
        assert!((deg - 90.0).abs() < 1e-3);
    }

    #[test]
    fn wrap_degrees_handles_edges() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert!((wrap_degrees(-1.0) - 359.0).abs() < 1e-4);
        assert!(wrap_degrees(-1e-9) < FULL_TURN_DEG);
        assert_eq!(wrap_degrees(f32::INFINITY), 0.0);
    }
}
