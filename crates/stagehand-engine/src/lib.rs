//! Stagehand engine crate.
//!
//! Owns the imperative side of a stagehand game: a retained object stage with
//! arcade physics, the draw stream it emits, input and time types, and the
//! headless frame loop that drives higher layers.

pub mod coords;
pub mod core;
pub mod input;
pub mod logging;
pub mod paint;
pub mod render;
pub mod runtime;
pub mod scene;
pub mod stage;
pub mod time;
