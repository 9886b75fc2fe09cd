use std::fmt;

/// Keyboard key identifier.
///
/// Sources map platform keycodes into these variants where possible.
/// For unsupported keys, use `Key::Unknown(u32)` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Common control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    /// Key not represented here, carrying its platform code.
    Unknown(u32),
}

const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

const DIGITS: [Key; 10] = [
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
];

impl Key {
    /// Browser-style `keyCode` for this key (`Space` is 32, `A` is 65, ...).
    pub fn code(self) -> u32 {
        match self {
            Key::Backspace => 8,
            Key::Tab => 9,
            Key::Enter => 13,
            Key::Shift => 16,
            Key::Control => 17,
            Key::Alt => 18,
            Key::Escape => 27,
            Key::Space => 32,
            Key::ArrowLeft => 37,
            Key::ArrowUp => 38,
            Key::ArrowRight => 39,
            Key::ArrowDown => 40,
            Key::Unknown(code) => code,
            other => {
                if let Some(i) = DIGITS.iter().position(|k| *k == other) {
                    48 + i as u32
                } else if let Some(i) = LETTERS.iter().position(|k| *k == other) {
                    65 + i as u32
                } else {
                    0
                }
            }
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

impl MouseButton {
    /// Zero-based button index (left 0, middle 1, right 2).
    pub fn index(self) -> u16 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
            MouseButton::Other(i) => i,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Pointer move event in screen pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

/// Pointer button event.
///
/// Coordinates are screen pixels; converting to world space is the camera's job.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub x: f32,
    pub y: f32,
    pub modifiers: Modifiers,
}

/// Platform-agnostic input events delivered between frames.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// Key code as reported by the source (see [`Key::code`]).
        code: u32,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),
}

impl InputEvent {
    pub fn key_pressed(key: Key) -> Self {
        Self::key(key, KeyState::Pressed)
    }

    pub fn key_released(key: Key) -> Self {
        Self::key(key, KeyState::Released)
    }

    fn key(key: Key, state: KeyState) -> Self {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), code: key.code() }
    }

    pub fn pointer_pressed(button: MouseButton, x: f32, y: f32) -> Self {
        Self::pointer(button, MouseButtonState::Pressed, x, y)
    }

    pub fn pointer_released(button: MouseButton, x: f32, y: f32) -> Self {
        Self::pointer(button, MouseButtonState::Released, x, y)
    }

    fn pointer(button: MouseButton, state: MouseButtonState, x: f32, y: f32) -> Self {
        InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, modifiers: Modifiers::default() })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_is_code_32() {
        assert_eq!(Key::Space.code(), 32);
    }

    #[test]
    fn letters_and_digits_map_to_ascii_codes() {
        assert_eq!(Key::A.code(), 65);
        assert_eq!(Key::Z.code(), 90);
        assert_eq!(Key::Digit7.code(), 55);
        assert_eq!(Key::ArrowDown.code(), 40);
    }

    #[test]
    fn unknown_key_keeps_its_code() {
        assert_eq!(Key::Unknown(999).code(), 999);
    }

    #[test]
    fn key_pressed_carries_code() {
        match InputEvent::key_pressed(Key::ArrowLeft) {
            InputEvent::Key { code, state, .. } => {
                assert_eq!(code, 37);
                assert_eq!(state, KeyState::Pressed);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn button_indices_follow_browser_order() {
        assert_eq!(MouseButton::Left.index(), 0);
        assert_eq!(MouseButton::Middle.index(), 1);
        assert_eq!(MouseButton::Right.index(), 2);
        assert_eq!(MouseButton::Other(4).index(), 4);
    }
}
