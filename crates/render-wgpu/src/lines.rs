use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use headway_common::CameraParams;
use headway_kernel::FrameSnapshot;
use headway_render::{Renderer, SceneStyle};

/// Half the size of the pointer marker cross, in world units.
const MARKER_HALF: f32 = 0.5;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }
}

fn push_segment(out: &mut Vec<LineVertex>, a: Vec3, b: Vec3, color: [f32; 4]) {
    out.push(LineVertex::new(a, color));
    out.push(LineVertex::new(b, color));
}

/// Ground grid on y = 0, centred on the origin.
fn grid(out: &mut Vec<LineVertex>, slices: u32, spacing: f32, color: [f32; 4]) {
    let half = (slices / 2) as i32;
    let extent = half as f32 * spacing;
    for i in -half..=half {
        let offset = i as f32 * spacing;
        push_segment(out, Vec3::new(-extent, 0.0, offset), Vec3::new(extent, 0.0, offset), color);
        push_segment(out, Vec3::new(offset, 0.0, -extent), Vec3::new(offset, 0.0, extent), color);
    }
}

/// The 12 edges of a cube of edge `size`, placed by `transform`.
fn cube_wireframe(out: &mut Vec<LineVertex>, transform: Mat4, size: f32, color: [f32; 4]) {
    let h = size * 0.5;
    let corner = |i: usize| {
        let local = Vec3::new(
            if i & 1 == 0 { -h } else { h },
            if i & 2 == 0 { -h } else { h },
            if i & 4 == 0 { -h } else { h },
        );
        transform.transform_point3(local)
    };
    for i in 0..8 {
        for bit in [1, 2, 4] {
            if i & bit == 0 {
                push_segment(out, corner(i), corner(i | bit), color);
            }
        }
    }
}

fn marker(out: &mut Vec<LineVertex>, at: Vec3, color: [f32; 4]) {
    push_segment(out, at - Vec3::X * MARKER_HALF, at + Vec3::X * MARKER_HALF, color);
    push_segment(out, at - Vec3::Z * MARKER_HALF, at + Vec3::Z * MARKER_HALF, color);
}

/// Builds the frame's line list. The GPU backend uploads it as-is.
#[derive(Debug, Default, Clone)]
pub struct LineScene {
    pub style: SceneStyle,
}

impl LineScene {
    pub fn new(style: SceneStyle) -> Self {
        Self { style }
    }

    /// Upper bound on vertices per frame, for sizing the vertex buffer.
    pub fn max_vertices(&self) -> usize {
        let grid_lines = 2 * (2 * (self.style.grid_slices as usize / 2) + 1);
        // cube edges, heading, aim, two marker strokes
        (grid_lines + 12 + 1 + 1 + 2) * 2
    }
}

impl Renderer for LineScene {
    type Output = Vec<LineVertex>;

    fn render(&self, frame: &FrameSnapshot, _camera: &CameraParams) -> Vec<LineVertex> {
        let s = &self.style;
        let mut out = Vec::with_capacity(self.max_vertices());

        grid(&mut out, s.grid_slices, s.grid_spacing, s.grid_color);

        let body = Mat4::from_rotation_translation(frame.rotation, frame.position);
        cube_wireframe(&mut out, body, s.body_size, s.body_color);

        push_segment(
            &mut out,
            frame.position,
            frame.position + frame.forward * s.heading_line_length,
            s.heading_color,
        );

        if let Some(target) = frame.pointer.world_point() {
            if frame.aim.locked {
                push_segment(&mut out, frame.aim.origin, target, s.aim_color);
            }
            marker(&mut out, target, s.pointer_color);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use headway_common::{FrameIntents, Viewport};
    use headway_kernel::{SimConfig, Simulation};

    fn frame(pointer: Vec2) -> FrameSnapshot {
        let mut sim = Simulation::new(SimConfig::default());
        let camera = sim.config().camera;
        let mut input = FrameIntents {
            pointer,
            ..FrameIntents::default()
        };
        sim.step(&mut input, &camera, Viewport::default()).unwrap()
    }

    #[test]
    fn grid_has_one_line_per_slice_each_way() {
        let mut out = Vec::new();
        grid(&mut out, 30, 1.0, [1.0; 4]);
        assert_eq!(out.len(), 31 * 2 * 2);
        assert_eq!(out[0].position, [-15.0, 0.0, -15.0]);
        assert!(out.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn cube_has_twelve_edges_of_equal_length() {
        let mut out = Vec::new();
        cube_wireframe(&mut out, Mat4::IDENTITY, 5.0, [1.0; 4]);
        assert_eq!(out.len(), 24);
        for pair in out.chunks(2) {
            let a = Vec3::from_array(pair[0].position);
            let b = Vec3::from_array(pair[1].position);
            assert!(((a - b).length() - 5.0).abs() < 1e-5);
        }
    }

    #[test]
    fn cube_follows_body_transform() {
        let mut out = Vec::new();
        let t = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0));
        cube_wireframe(&mut out, t, 2.0, [1.0; 4]);
        let centre = out
            .iter()
            .map(|v| Vec3::from_array(v.position))
            .fold(Vec3::ZERO, |acc, p| acc + p)
            / out.len() as f32;
        assert!((centre - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn scene_with_pointer_hit_draws_aim_and_marker() {
        let scene = LineScene::default();
        let snap = frame(Vec2::new(400.0, 225.0));
        let lines = scene.render(&snap, &CameraParams::default());
        assert_eq!(lines.len(), scene.max_vertices());

        let aim = scene.style.aim_color;
        assert_eq!(lines.iter().filter(|v| v.color == aim).count(), 2);
    }

    #[test]
    fn scene_without_pointer_hit_skips_aim() {
        let scene = LineScene::default();
        let mut snap = frame(Vec2::ZERO);
        snap.pointer.hit = headway_common::RayHit::MISS;
        let lines = scene.render(&snap, &CameraParams::default());
        assert_eq!(lines.len(), scene.max_vertices() - 3 * 2);
    }

    #[test]
    fn heading_line_points_forward() {
        let scene = LineScene::default();
        let snap = frame(Vec2::ZERO);
        let lines = scene.render(&snap, &CameraParams::default());
        let heading = scene.style.heading_color;
        let seg: Vec<_> = lines.iter().filter(|v| v.color == heading).collect();
        assert_eq!(seg.len(), 2);
        assert_eq!(seg[1].position, [5.0, 0.0, 0.0]);
    }
}
