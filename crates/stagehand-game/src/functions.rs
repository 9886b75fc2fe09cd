//! The caller's game logic: setup, per-frame update and input reducers.

use crate::dispatch::{KeyInput, PointerInput};
use crate::state::GameState;

/// Produces the initial state from an empty one.
pub type SetupFn<S> = Box<dyn FnMut(GameState<S>) -> Option<GameState<S>>>;
/// Maps the pulled state to the next one, given elapsed time and frame step in seconds.
pub type UpdateFn<S> = Box<dyn FnMut(&GameState<S>, f32, f32) -> Option<GameState<S>>>;
pub type KeyHandler<S> = Box<dyn FnMut(&GameState<S>, &KeyInput) -> Option<GameState<S>>>;
pub type PointerHandler<S> = Box<dyn FnMut(&GameState<S>, &PointerInput) -> Option<GameState<S>>>;

/// Bundle of callbacks describing a game.
///
/// Only `setup` is required. Every callback returns the next state; returning
/// `None` is a programming error and aborts the transition.
///
/// ```rust,ignore
/// let functions = GameFunctions::new(|s| Some(s.with_entity("ball", ball())))
///     .update(|s, _time, _dt| Some(s.clone()))
///     .on_key_down(|s, key| Some(s.clone().with_sack(s.sack + key.code)))
///     .debug(true);
/// ```
pub struct GameFunctions<S> {
    pub(crate) setup: SetupFn<S>,
    pub(crate) update: Option<UpdateFn<S>>,
    pub(crate) key_down: Option<KeyHandler<S>>,
    pub(crate) key_up: Option<KeyHandler<S>>,
    pub(crate) mouse_down: Option<PointerHandler<S>>,
    pub(crate) mouse_up: Option<PointerHandler<S>>,
    pub(crate) debug: bool,
}

impl<S> GameFunctions<S> {
    pub fn new(setup: impl FnMut(GameState<S>) -> Option<GameState<S>> + 'static) -> Self {
        Self {
            setup: Box::new(setup),
            update: None,
            key_down: None,
            key_up: None,
            mouse_down: None,
            mouse_up: None,
            debug: false,
        }
    }

    pub fn update(mut self, f: impl FnMut(&GameState<S>, f32, f32) -> Option<GameState<S>> + 'static) -> Self {
        self.update = Some(Box::new(f));
        self
    }

    pub fn on_key_down(mut self, f: impl FnMut(&GameState<S>, &KeyInput) -> Option<GameState<S>> + 'static) -> Self {
        self.key_down = Some(Box::new(f));
        self
    }

    pub fn on_key_up(mut self, f: impl FnMut(&GameState<S>, &KeyInput) -> Option<GameState<S>> + 'static) -> Self {
        self.key_up = Some(Box::new(f));
        self
    }

    pub fn on_mouse_down(
        mut self,
        f: impl FnMut(&GameState<S>, &PointerInput) -> Option<GameState<S>> + 'static,
    ) -> Self {
        self.mouse_down = Some(Box::new(f));
        self
    }

    pub fn on_mouse_up(
        mut self,
        f: impl FnMut(&GameState<S>, &PointerInput) -> Option<GameState<S>> + 'static,
    ) -> Self {
        self.mouse_up = Some(Box::new(f));
        self
    }

    /// Turns on physics debug drawing in the engine.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
