use crate::coords::{Rect, Vec2};
use crate::paint::Color;

use super::physics::Body;

/// Generational handle to a stage object.
///
/// A destroyed object's slot can be reused; the generation makes stale ids
/// miss instead of aliasing the new occupant.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ObjectId {
    pub(super) index: u32,
    pub(super) generation: u32,
}

/// What an object draws.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    Circle { radius: f32, fill: Color },
    /// Width and height live in [`StageObject::size`].
    Rect { fill: Color },
    Text { content: String, font_family: String, font_size: f32, color: Color },
    /// Groups children whose positions are relative to the container.
    Container { children: Vec<ObjectId> },
}

/// A retained, mutable stage object.
#[derive(Debug, Clone, PartialEq)]
pub struct StageObject {
    pub kind: ObjectKind,
    /// Position relative to the parent container, or world position at top level.
    pub position: Vec2,
    /// Rotation in degrees about `position`.
    pub angle: f32,
    pub depth: i32,
    /// Display size. Containers start at zero until sized explicitly.
    pub size: Vec2,
    /// Normalized display origin; `(0.5, 0.5)` centers the object on `position`.
    pub origin: Vec2,
    pub parent: Option<ObjectId>,
    pub body: Option<Body>,
}

// Headless text has no font metrics; these approximate a monospace face.
const GLYPH_ADVANCE: f32 = 0.6;
const LINE_HEIGHT: f32 = 1.2;

pub(super) fn measure_text(content: &str, font_size: f32) -> Vec2 {
    let columns = content.lines().map(|l| l.chars().count()).max().unwrap_or(0);
    let rows = content.lines().count().max(1);
    Vec2::new(columns as f32 * font_size * GLYPH_ADVANCE, rows as f32 * font_size * LINE_HEIGHT)
}

impl StageObject {
    pub(super) fn new(kind: ObjectKind, position: Vec2) -> Self {
        let (size, origin) = match &kind {
            ObjectKind::Circle { radius, .. } => (Vec2::new(radius * 2.0, radius * 2.0), Vec2::new(0.5, 0.5)),
            ObjectKind::Rect { .. } => (Vec2::zero(), Vec2::new(0.5, 0.5)),
            ObjectKind::Text { content, font_size, .. } => (measure_text(content, *font_size), Vec2::zero()),
            ObjectKind::Container { .. } => (Vec2::zero(), Vec2::new(0.5, 0.5)),
        };
        Self { kind, position, angle: 0.0, depth: 0, size, origin, parent: None, body: None }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, ObjectKind::Container { .. })
    }

    pub fn children(&self) -> &[ObjectId] {
        match &self.kind {
            ObjectKind::Container { children } => children,
            _ => &[],
        }
    }

    /// Top-left of the display rectangle relative to `position`.
    #[inline]
    pub fn display_offset(&self) -> Vec2 {
        -self.origin.scale(self.size)
    }

    /// Axis-aligned bounds of this primitive in parent space, rotation included.
    pub(super) fn primitive_bounds(&self) -> Rect {
        let local = Rect::from_origin_size(self.display_offset(), self.size);
        Rect::bounding(local.corners().map(|c| c.rotated(self.angle) + self.position))
            .unwrap_or(Rect::at(self.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_is_centered_on_position() {
        let obj = StageObject::new(ObjectKind::Circle { radius: 5.0, fill: Color::white() }, Vec2::new(10.0, 10.0));
        assert_eq!(obj.primitive_bounds(), Rect::new(5.0, 5.0, 10.0, 10.0));
    }

    #[test]
    fn rotated_square_bounds_grow() {
        let mut obj = StageObject::new(ObjectKind::Rect { fill: Color::white() }, Vec2::zero());
        obj.size = Vec2::new(10.0, 10.0);
        obj.angle = 45.0;
        let b = obj.primitive_bounds();
        let half_diag = 50.0f32.sqrt();
        assert!((b.size.x - 2.0 * half_diag).abs() < 1e-3);
        assert!((b.origin.x + half_diag).abs() < 1e-3);
    }

    #[test]
    fn text_is_measured_from_top_left() {
        let obj = StageObject::new(
            ObjectKind::Text {
                content: "abcd".into(),
                font_family: "mono".into(),
                font_size: 10.0,
                color: Color::white(),
            },
            Vec2::new(1.0, 2.0),
        );
        assert_eq!(obj.size, Vec2::new(24.0, 12.0));
        assert_eq!(obj.primitive_bounds().origin, Vec2::new(1.0, 2.0));
    }
}
