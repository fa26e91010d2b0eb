use crate::aim::{AimState, TurretAimer};
use crate::body::BodyState;
use crate::config::SimConfig;
use crate::heading::HeadingModel;
use crate::pointer::{PointerProjection, PointerProjector};
use glam::{Quat, Vec3};
use headway_common::{CameraParams, IntentSource, Viewport};
use serde::{Deserialize, Serialize};

/// Lifecycle of the frame loop. `Terminating` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopPhase {
    Running,
    Terminating,
}

/// Immutable picture of one tick, handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub model: HeadingModel,
    pub position: Vec3,
    /// Bearing of the body in `[0, 360)`.
    pub heading_deg: f32,
    pub forward: Vec3,
    /// Rotation to apply to the body cube before drawing.
    pub rotation: Quat,
    pub aim: AimState,
    /// Turret bearing minus body heading, in `[0, 360)`.
    pub relative_aim_deg: f32,
    pub pointer: PointerProjection,
}

impl FrameSnapshot {
    /// Text lines for the debug overlay, top to bottom.
    pub fn debug_lines(&self) -> Vec<String> {
        let p = self.position;
        let f = self.forward;
        let d = self.aim.direction;
        let r = self.rotation;
        let target = match self.pointer.world_point() {
            Some(w) => format!("{{{:.2}, {:.2}, {:.2}}}", w.x, w.y, w.z),
            None => "none".to_string(),
        };
        vec![
            format!("tick: {} ({:?})", self.tick, self.model),
            format!("body position: {{{:.2}, {:.2}, {:.2}}}", p.x, p.y, p.z),
            format!("body forward: {{{:.2}, {:.2}, {:.2}}}", f.x, f.y, f.z),
            format!("body heading: {:.2} deg", self.heading_deg),
            format!(
                "body rotation: {{{:.2} | {:.2} | {:.2} | {:.2}}}",
                r.w, r.x, r.y, r.z
            ),
            format!(
                "turret bearing: {:.2} deg (relative {:.2}){}",
                self.aim.bearing_deg,
                self.relative_aim_deg,
                if self.aim.locked { "" } else { " [no target]" }
            ),
            format!("turret to pointer: {{{:.2}, {:.2}, {:.2}}}", d.x, d.y, d.z),
            format!("pointer world: {target}"),
        ]
    }

    /// Label drawn next to the cursor.
    pub fn pointer_label(&self) -> String {
        format!("{:.2}|{:.2}", self.pointer.screen.x, self.pointer.screen.y)
    }
}

/// The per-tick orchestrator: sample, project, turn, drive, aim, snapshot.
///
/// Owns the body exclusively. Runs one update per rendered frame; pacing is
/// the caller's job.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    body: BodyState,
    projector: PointerProjector,
    aimer: TurretAimer,
    phase: LoopPhase,
    close_requested: bool,
    tick: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let body = BodyState::new(config.heading_model);
        let projector = PointerProjector::new(config.ground_box);
        let aimer = TurretAimer::new(config.turret_mount_height, config.fallback_bearing_deg);
        tracing::debug!(model = ?config.heading_model, "simulation created");
        Self {
            config,
            body,
            projector,
            aimer,
            phase: LoopPhase::Running,
            close_requested: false,
            tick: 0,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn body(&self) -> &BodyState {
        &self.body
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Ticks completed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Ask the loop to stop. Takes effect at the top of the next tick.
    pub fn request_close(&mut self) {
        if !self.close_requested {
            tracing::debug!(tick = self.tick, "close requested");
        }
        self.close_requested = true;
    }

    /// Run one tick.
    ///
    /// Returns `None` once the loop is terminating; the caller should then
    /// tear down its window.
    pub fn step(
        &mut self,
        input: &mut impl IntentSource,
        camera: &CameraParams,
        viewport: Viewport,
    ) -> Option<FrameSnapshot> {
        if self.close_requested && self.phase == LoopPhase::Running {
            self.phase = LoopPhase::Terminating;
            tracing::info!(tick = self.tick, "frame loop terminating");
        }
        if self.phase == LoopPhase::Terminating {
            return None;
        }

        let intents = input.sample();
        let pointer = self.projector.update(intents.pointer, camera, viewport);

        self.body.turn(intents.turn, self.config.turn_rate_deg);
        self.body.drive(intents.throttle, self.config.drive_speed);
        if intents.reset {
            self.body.reset(self.config.reset_heading_deg);
            tracing::debug!(tick = self.tick, "body reset");
        }

        let aim = self
            .aimer
            .compute_or_idle(self.body.position, pointer.world_point());

        self.tick += 1;
        tracing::trace!(
            tick = self.tick,
            heading = self.body.heading.degrees(),
            bearing = aim.bearing_deg,
            "tick"
        );

        Some(self.snapshot(aim, pointer))
    }

    /// Run `ticks` ticks against the same input and return the last snapshot.
    pub fn run(
        &mut self,
        input: &mut impl IntentSource,
        camera: &CameraParams,
        viewport: Viewport,
        ticks: u64,
    ) -> Option<FrameSnapshot> {
        let mut last = None;
        for _ in 0..ticks {
            match self.step(input, camera, viewport) {
                Some(snapshot) => last = Some(snapshot),
                None => break,
            }
        }
        last
    }

    fn snapshot(&self, aim: AimState, pointer: PointerProjection) -> FrameSnapshot {
        let heading_deg = self.body.heading.degrees();
        FrameSnapshot {
            tick: self.tick,
            model: self.body.heading.model(),
            position: self.body.position,
            heading_deg,
            forward: self.body.forward(),
            rotation: self.body.heading.rotation(),
            aim,
            relative_aim_deg: aim.relative_to(heading_deg),
            pointer,
        }
    }
}
