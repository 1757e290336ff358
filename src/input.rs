use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Keys the lessons care about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// 0-9 from either the main row or the keypad.
    Digit(u8),
    Escape,
    Other,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Digit0 | KeyCode::Numpad0 => Key::Digit(0),
            KeyCode::Digit1 | KeyCode::Numpad1 => Key::Digit(1),
            KeyCode::Digit2 | KeyCode::Numpad2 => Key::Digit(2),
            KeyCode::Digit3 | KeyCode::Numpad3 => Key::Digit(3),
            KeyCode::Digit4 | KeyCode::Numpad4 => Key::Digit(4),
            KeyCode::Digit5 | KeyCode::Numpad5 => Key::Digit(5),
            KeyCode::Digit6 | KeyCode::Numpad6 => Key::Digit(6),
            KeyCode::Digit7 | KeyCode::Numpad7 => Key::Digit(7),
            KeyCode::Digit8 | KeyCode::Numpad8 => Key::Digit(8),
            KeyCode::Digit9 | KeyCode::Numpad9 => Key::Digit(9),
            KeyCode::Escape => Key::Escape,
            _ => Key::Other,
        }
    }
}

impl From<PhysicalKey> for Key {
    fn from(key: PhysicalKey) -> Self {
        match key {
            PhysicalKey::Code(code) => code.into(),
            PhysicalKey::Unidentified(_) => Key::Other,
        }
    }
}

/// Window input delivered to a lesson.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    /// The window was asked to close.
    Quit,
    KeyDown(Key),
    MouseDown,
}

impl Input {
    /// Translates the window events lessons react to. Key repeats and
    /// releases are dropped.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CloseRequested => Some(Input::Quit),
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                Some(Input::KeyDown(event.physical_key.into()))
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => Some(Input::MouseDown),
            _ => None,
        }
    }
}
