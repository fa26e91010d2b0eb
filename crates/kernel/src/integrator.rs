use glam::Vec3;
use headway_common::ThrottleIntent;

/// Advance `position` one tick along `forward`.
///
/// Forward adds `forward * speed`, backward subtracts it, none leaves the
/// position alone. There is no clamping to world bounds.
pub fn integrate(position: Vec3, forward: Vec3, throttle: ThrottleIntent, speed: f32) -> Vec3 {
    position + forward * (throttle.sign() * speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_forward_ticks_cover_one_unit() {
        let mut p = Vec3::ZERO;
        for _ in 0..10 {
            p = integrate(p, Vec3::X, ThrottleIntent::Forward, 0.1);
        }
        assert!((p - Vec3::new(1.0, 0.0, 0.0)).abs().max_element() <= 1e-4);
    }

    #[test]
    fn backward_reverses() {
        let p = integrate(Vec3::new(1.0, 0.0, 1.0), Vec3::Z, ThrottleIntent::Backward, 0.5);
        assert_eq!(p, Vec3::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn forward_then_backward_cancels() {
        let start = Vec3::new(2.0, 1.0, -3.0);
        let forward = Vec3::new(0.6, 0.0, 0.8);
        let p = integrate(start, forward, ThrottleIntent::Forward, 0.25);
        let p = integrate(p, forward, ThrottleIntent::Backward, 0.25);
        assert!((p - start).length() < 1e-6);
    }

    #[test]
    fn none_is_identity() {
        let p = Vec3::new(3.0, 2.0, 1.0);
        assert_eq!(integrate(p, Vec3::X, ThrottleIntent::None, 10.0), p);
    }

    #[test]
    fn no_bounds_clamping() {
        let p = integrate(Vec3::new(1000.0, 0.0, 0.0), Vec3::X, ThrottleIntent::Forward, 1000.0);
        assert_eq!(p.x, 2000.0);
    }
}
