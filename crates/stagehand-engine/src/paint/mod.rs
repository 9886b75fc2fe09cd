//! Colour model shared between entities, the stage and renderers.
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::Color;
