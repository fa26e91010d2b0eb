use crate::action::Action;
use glam::Vec2;
use headway_common::{FrameIntents, IntentSource, ThrottleIntent, TurnIntent};

const ACTION_COUNT: usize = Action::ALL.len();

/// Accumulates button and pointer events between ticks and turns them into
/// one [`FrameIntents`] per tick.
///
/// Held state persists across samples. A press of [`Action::Reset`] is
/// latched until the next sample, so a press and release that both land
/// between two ticks still resets once.
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    held: [bool; ACTION_COUNT],
    pressed_since_sample: [bool; ACTION_COUNT],
    pointer: Vec2,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a button going down. Key repeat (a press while already held) is ignored.
    pub fn press(&mut self, action: Action) {
        let i = action.index();
        if !self.held[i] {
            self.pressed_since_sample[i] = true;
            tracing::trace!(action = action.label(), "pressed");
        }
        self.held[i] = true;
    }

    pub fn release(&mut self, action: Action) {
        self.held[action.index()] = false;
    }

    /// Convenience for backends that report a pressed/released flag.
    pub fn set(&mut self, action: Action, down: bool) {
        if down {
            self.press(action);
        } else {
            self.release(action);
        }
    }

    pub fn set_pointer(&mut self, pointer: Vec2) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }

    /// Release everything, e.g. when the window loses focus and key-up events
    /// would otherwise be lost. Pending edges are dropped too.
    pub fn release_all(&mut self) {
        self.held = [false; ACTION_COUNT];
        self.pressed_since_sample = [false; ACTION_COUNT];
    }
}

impl IntentSource for InputSampler {
    fn sample(&mut self) -> FrameIntents {
        let intents = FrameIntents {
            turn: TurnIntent::from_held(
                self.is_held(Action::TurnLeft),
                self.is_held(Action::TurnRight),
            ),
            throttle: ThrottleIntent::from_held(
                self.is_held(Action::ThrottleForward),
                self.is_held(Action::ThrottleBackward),
            ),
            reset: self.pressed_since_sample[Action::Reset.index()],
            pointer: self.pointer,
        };
        self.pressed_since_sample = [false; ACTION_COUNT];
        intents
    }
}
