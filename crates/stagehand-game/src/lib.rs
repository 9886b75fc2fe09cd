//! Stagehand game layer: declarative game state on top of `stagehand-engine`.
//!
//! A game is pure data plus pure functions. The caller describes the world as a
//! [`GameState`] of [`Entity`] values and supplies `setup`, `update` and input
//! reducers through [`GameFunctions`]; the engine owns the mutable objects that
//! get drawn and simulated. Every frame the two are reconciled: engine motion is
//! pulled into a new state, `update` runs on it, and the result is pushed back.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use stagehand_game::prelude::*;
//!
//! let functions = GameFunctions::new(|s: GameState<u32>| {
//!     Some(s.with_entity("ball", Entity::circle(10.0, Color::from_hex(0xff0000)).at(100.0, 100.0).root()))
//! })
//! .on_key_down(|s, key| Some(s.clone().with_sack(s.sack + u32::from(key.code == 32))));
//!
//! let (state, _report) = Application::new().frames(600).run(functions, &mut NoInput, &mut NullRenderer)?;
//! ```
//!
//! # Driving a different engine
//!
//! Implement [`Backend`] for it and drive [`Game`] directly:
//! `setup` once, then `handle_input` per event and `frame` per tick.

pub mod app;
pub mod backend;
pub mod builder;
pub mod dispatch;
pub mod entity;
pub mod error;
pub mod functions;
pub mod game;
pub mod graph;
pub mod reconciler;
pub mod state;
pub mod store;

pub use app::Application;
pub use backend::Backend;
pub use entity::{Entity, EntityKind, Shape, TextSpec};
pub use error::{MissingStateError, Origin};
pub use functions::GameFunctions;
pub use game::{Game, Phase};
pub use state::{GameState, Scene};

/// Everything a game definition needs.
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::backend::Backend;
    pub use crate::dispatch::{KeyInput, PointerInput};
    pub use crate::entity::{Entity, EntityKind, Shape, TextSpec};
    pub use crate::error::{MissingStateError, Origin};
    pub use crate::functions::GameFunctions;
    pub use crate::game::{Game, Phase};
    pub use crate::state::{GameState, Scene};
    pub use crate::store::HISTORY_CAPACITY;

    // Engine primitives games touch directly.
    pub use stagehand_engine::coords::{Rect, Vec2};
    pub use stagehand_engine::input::{InputEvent, Key, MouseButton, NoInput, ScriptedInput};
    pub use stagehand_engine::paint::Color;
    pub use stagehand_engine::render::{NullRenderer, Renderer};
    pub use stagehand_engine::runtime::RunReport;
}
