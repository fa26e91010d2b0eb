use std::time::{Duration, Instant};

/// Schedules redraws at a target rate and measures the achieved rate.
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame_time: Duration,
    next_frame: Instant,
    window_start: Instant,
    frames_in_window: u32,
    fps: u32,
}

impl FramePacer {
    pub fn new(target_fps: u32, now: Instant) -> Self {
        Self {
            frame_time: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            next_frame: now,
            window_start: now,
            frames_in_window: 0,
            fps: 0,
        }
    }

    pub fn frame_time(&self) -> Duration {
        self.frame_time
    }

    /// When the next frame should start.
    pub fn deadline(&self) -> Instant {
        self.next_frame
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_frame
    }

    /// Record a presented frame and schedule the next one.
    ///
    /// A late frame reschedules from `now` instead of bursting to catch up.
    pub fn frame_presented(&mut self, now: Instant) {
        self.next_frame += self.frame_time;
        if self.next_frame < now {
            self.next_frame = now + self.frame_time;
        }

        self.frames_in_window += 1;
        if now.duration_since(self.window_start) >= Duration::from_secs(1) {
            self.fps = self.frames_in_window;
            self.frames_in_window = 0;
            self.window_start = now;
        }
    }

    /// Frames presented during the last full second.
    pub fn fps(&self) -> u32 {
        self.fps
    }
}
