use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which way the body is asked to turn this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnIntent {
    Left,
    Right,
    #[default]
    None,
}

impl TurnIntent {
    /// Resolve two held buttons into one intent. Holding both cancels out.
    pub fn from_held(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, false) => Self::Left,
            (false, true) => Self::Right,
            _ => Self::None,
        }
    }

    /// Rotation sign about world up: +1 for left, -1 for right, 0 otherwise.
    ///
    /// Left is counter-clockwise seen from above, which swings +X towards -Z.
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => 1.0,
            Self::Right => -1.0,
            Self::None => 0.0,
        }
    }
}

/// Which way the body is asked to drive this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThrottleIntent {
    Forward,
    Backward,
    #[default]
    None,
}

impl ThrottleIntent {
    /// Resolve two held buttons into one intent. Holding both cancels out.
    pub fn from_held(forward: bool, backward: bool) -> Self {
        match (forward, backward) {
            (true, false) => Self::Forward,
            (false, true) => Self::Backward,
            _ => Self::None,
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
            Self::None => 0.0,
        }
    }
}

/// Everything the simulation reads from the input layer for one tick.
///
/// `reset` is edge-triggered: it is true only on the tick the reset button
/// went down, never while it is held.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameIntents {
    pub turn: TurnIntent,
    pub throttle: ThrottleIntent,
    pub reset: bool,
    /// Pointer position in window pixels, origin top-left.
    pub pointer: Vec2,
}

/// A source of per-tick intents. The frame loop samples it exactly once per tick.
pub trait IntentSource {
    fn sample(&mut self) -> FrameIntents;
}

/// A fixed set of intents replayed every tick. Used by headless drivers.
impl IntentSource for FrameIntents {
    fn sample(&mut self) -> FrameIntents {
        *self
    }
}
