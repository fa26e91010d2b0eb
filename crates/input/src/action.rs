/// A button-level action the body controls understand.
///
/// Backends translate their own key codes into actions; the sampler and the
/// simulation never see backend key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    TurnLeft,
    TurnRight,
    ThrottleForward,
    ThrottleBackward,
    /// Return the body to the origin with its reset heading.
    Reset,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::TurnLeft,
        Action::TurnRight,
        Action::ThrottleForward,
        Action::ThrottleBackward,
        Action::Reset,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TurnLeft => "turn left",
            Self::TurnRight => "turn right",
            Self::ThrottleForward => "throttle forward",
            Self::ThrottleBackward => "throttle backward",
            Self::Reset => "reset",
        }
    }
}
