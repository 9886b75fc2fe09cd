//! Coordinate and geometry types shared by the stage, physics and draw list.
//!
//! Canonical space:
//! - World units (one unit per logical pixel at zoom 1)
//! - Origin top-left
//! - +X right, +Y down
//! - Angles in degrees, clockwise (screen space)

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
