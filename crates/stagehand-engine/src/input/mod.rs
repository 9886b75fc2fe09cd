//! Input subsystem.
//!
//! Public API is platform-agnostic. Event sources (the headless runtime's
//! scripted queue, or a windowing layer) translate their events into `InputEvent`s.

mod script;
mod types;

pub use script::{InputSource, NoInput, ScriptedInput};
pub use types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};
