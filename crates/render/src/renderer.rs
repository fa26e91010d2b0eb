use headway_common::CameraParams;
use headway_kernel::FrameSnapshot;

/// Sizes and colors shared by every backend, so the text and GPU views agree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    /// Edge length of the body cube.
    pub body_size: f32,
    /// Length of the heading line drawn from the body centre.
    pub heading_line_length: f32,
    /// Grid lines per side and their spacing.
    pub grid_slices: u32,
    pub grid_spacing: f32,
    pub clear_color: [f32; 4],
    pub grid_color: [f32; 4],
    pub body_color: [f32; 4],
    pub heading_color: [f32; 4],
    pub aim_color: [f32; 4],
    pub pointer_color: [f32; 4],
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            body_size: 5.0,
            heading_line_length: 5.0,
            grid_slices: 30,
            grid_spacing: 1.0,
            clear_color: [0.96, 0.96, 0.96, 1.0],
            grid_color: [0.55, 0.55, 0.55, 1.0],
            body_color: [0.0, 0.47, 0.95, 1.0],
            heading_color: [0.9, 0.16, 0.22, 1.0],
            aim_color: [0.0, 0.62, 0.18, 1.0],
            pointer_color: [0.0, 0.89, 0.19, 1.0],
        }
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads one frame snapshot and the camera and produces output.
/// It never mutates the simulation; body state is owned by the frame loop.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, frame: &FrameSnapshot, camera: &CameraParams) -> Self::Output;
}

/// Plain-text renderer.
///
/// Produces the same debug lines the desktop overlay draws, with a camera
/// header. Used by the CLI and by tests of the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, frame: &FrameSnapshot, camera: &CameraParams) -> String {
        tracing::trace!(tick = frame.tick, "rendering debug text");
        let mut out = String::new();
        out.push_str(&format!("=== Frame {} ===\n", frame.tick));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fovy={:.0} {:?}\n",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.target.x,
            camera.target.y,
            camera.target.z,
            camera.fovy,
            camera.projection,
        ));
        out.push_str(&format!("Pointer: {}\n", frame.pointer_label()));
        for line in frame.debug_lines() {
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}
