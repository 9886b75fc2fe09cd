//! Routes engine input events to the caller's reducers.
//!
//! Each bound event produces exactly one commit attempt, synchronously and in
//! arrival order. Pointer positions are converted to world coordinates first.

use stagehand_engine::coords::Vec2;
use stagehand_engine::input::{InputEvent, Key, KeyState, MouseButtonState};

use crate::backend::Backend;
use crate::error::{Origin, Result};
use crate::functions::{KeyHandler, PointerHandler};
use crate::store::StateStore;

/// Keyboard event payload handed to key reducers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    /// Numeric key code, `32` for space.
    pub code: u32,
}

/// Pointer event payload handed to mouse reducers.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerInput {
    /// Zero-based button index, `0` for the primary button.
    pub button: u16,
    /// World-space position.
    pub position: Vec2,
}

/// Holds the bound reducers. Classes without a reducer are never bound.
pub struct EventDispatcher<S> {
    key_down: Option<KeyHandler<S>>,
    key_up: Option<KeyHandler<S>>,
    mouse_down: Option<PointerHandler<S>>,
    mouse_up: Option<PointerHandler<S>>,
}

impl<S> Default for EventDispatcher<S> {
    fn default() -> Self {
        Self { key_down: None, key_up: None, mouse_down: None, mouse_up: None }
    }
}

impl<S> EventDispatcher<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_key_down(&mut self, handler: Option<KeyHandler<S>>) {
        self.key_down = handler;
    }

    pub fn bind_key_up(&mut self, handler: Option<KeyHandler<S>>) {
        self.key_up = handler;
    }

    pub fn bind_mouse_down(&mut self, handler: Option<PointerHandler<S>>) {
        self.mouse_down = handler;
    }

    pub fn bind_mouse_up(&mut self, handler: Option<PointerHandler<S>>) {
        self.mouse_up = handler;
    }

    pub fn is_bound(&self, origin: Origin) -> bool {
        match origin {
            Origin::KeyDown => self.key_down.is_some(),
            Origin::KeyUp => self.key_up.is_some(),
            Origin::MouseDown => self.mouse_down.is_some(),
            Origin::MouseUp => self.mouse_up.is_some(),
            Origin::Setup | Origin::PreUpdatePull | Origin::Update => false,
        }
    }

    /// Runs the reducer bound to `event`, if any, and commits its result.
    ///
    /// Returns `Ok(true)` when a reducer ran and its state was committed,
    /// `Ok(false)` for unbound or unsupported events.
    pub fn dispatch<B: Backend>(
        &mut self,
        backend: &B,
        store: &mut StateStore<S>,
        event: &InputEvent,
    ) -> Result<bool> {
        let (origin, next) = match event {
            InputEvent::Key { key, state, code, .. } => {
                let (origin, handler) = match state {
                    KeyState::Pressed => (Origin::KeyDown, self.key_down.as_mut()),
                    KeyState::Released => (Origin::KeyUp, self.key_up.as_mut()),
                };
                let Some(handler) = handler else {
                    log::debug!("ignoring {origin} for {key}: nothing bound");
                    return Ok(false);
                };
                let input = KeyInput { key: *key, code: *code };
                (origin, handler(&**store.current(), &input))
            }
            InputEvent::PointerButton(pointer) => {
                let (origin, handler) = match pointer.state {
                    MouseButtonState::Pressed => (Origin::MouseDown, self.mouse_down.as_mut()),
                    MouseButtonState::Released => (Origin::MouseUp, self.mouse_up.as_mut()),
                };
                let Some(handler) = handler else {
                    log::debug!("ignoring {origin}: nothing bound");
                    return Ok(false);
                };
                let input = PointerInput {
                    button: pointer.button.index(),
                    position: backend.screen_to_world(Vec2::new(pointer.x, pointer.y)),
                };
                (origin, handler(&**store.current(), &input))
            }
            InputEvent::PointerMoved(_) => return Ok(false),
        };

        store.replace(next, origin)?;
        Ok(true)
    }
}
