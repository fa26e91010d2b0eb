use headway_input::Action;
use winit::keyboard::KeyCode;

/// What a physical key does in the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyBinding {
    Action(Action),
    Close,
}

pub fn binding_for(key: KeyCode) -> Option<KeyBinding> {
    let action = match key {
        KeyCode::KeyA | KeyCode::ArrowLeft => Action::TurnLeft,
        KeyCode::KeyD | KeyCode::ArrowRight => Action::TurnRight,
        KeyCode::KeyW | KeyCode::ArrowUp => Action::ThrottleForward,
        KeyCode::KeyS | KeyCode::ArrowDown => Action::ThrottleBackward,
        KeyCode::KeyR => Action::Reset,
        KeyCode::Escape => return Some(KeyBinding::Close),
        _ => return None,
    };
    Some(KeyBinding::Action(action))
}

/// One line per binding, for the startup log.
pub const HELP: &str = "A/Left turn left | D/Right turn right | W/Up forward | S/Down back | R reset | Esc quit";
