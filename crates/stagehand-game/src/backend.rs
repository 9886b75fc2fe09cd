//! The object-mutation interface the game layer drives.
//!
//! Everything the core needs from a rendering/physics engine goes through
//! [`Backend`]. The engine owns the objects; the core only holds handles.

use std::fmt::Debug;

use stagehand_engine::coords::{Rect, Vec2};
use stagehand_engine::paint::Color;
use stagehand_engine::stage::{ObjectId, Stage};

use crate::entity::{Shape, TextSpec};

/// Engine capabilities required by scene construction and reconciliation.
///
/// Handles are cheap copyable ids. Operations on a handle the engine no longer
/// knows about must be harmless no-ops.
pub trait Backend {
    type Handle: Copy + Eq + Debug;

    // ── construction ──────────────────────────────────────────────────────

    fn create_shape(&mut self, shape: &Shape, position: Vec2, angle: f32, depth: i32) -> Self::Handle;
    fn create_text(&mut self, text: &TextSpec, position: Vec2, angle: f32, depth: i32) -> Self::Handle;
    /// Groups `children` (positions relative to the container) at `position`.
    fn create_container(&mut self, position: Vec2, depth: i32, children: &[Self::Handle]) -> Self::Handle;
    /// Destroys the object and everything it contains.
    fn destroy(&mut self, handle: Self::Handle);

    // ── geometry ──────────────────────────────────────────────────────────

    /// Visual bounds in world space.
    fn bounds(&self, handle: Self::Handle) -> Rect;
    fn set_size(&mut self, handle: Self::Handle, size: Vec2);
    /// Local position, `None` once the handle is stale.
    fn position(&self, handle: Self::Handle) -> Option<Vec2>;
    fn set_position(&mut self, handle: Self::Handle, position: Vec2);
    fn set_angle(&mut self, handle: Self::Handle, degrees: f32);
    fn set_text(&mut self, handle: Self::Handle, content: &str);

    // ── physics ───────────────────────────────────────────────────────────

    fn enable_body(&mut self, handle: Self::Handle);
    fn has_body(&self, handle: Self::Handle) -> bool {
        self.velocity(handle).is_some()
    }
    /// World-space top-left of the body, `None` without a body.
    fn body_position(&self, handle: Self::Handle) -> Option<Vec2>;
    fn set_body_offset(&mut self, handle: Self::Handle, offset: Vec2);
    fn set_collide_world_bounds(&mut self, handle: Self::Handle, collide: bool);
    fn set_allow_gravity(&mut self, handle: Self::Handle, allow: bool);
    /// Live body velocity, `None` without a body.
    fn velocity(&self, handle: Self::Handle) -> Option<Vec2>;
    fn set_velocity(&mut self, handle: Self::Handle, velocity: Vec2);

    // ── scene ─────────────────────────────────────────────────────────────

    fn set_background(&mut self, colour: Color);
    /// Toggles physics debug visualization.
    fn set_debug(&mut self, debug: bool);
    /// Converts a pointer position in screen pixels to world space.
    fn screen_to_world(&self, point: Vec2) -> Vec2;
}

impl Backend for Stage {
    type Handle = ObjectId;

    fn create_shape(&mut self, shape: &Shape, position: Vec2, angle: f32, depth: i32) -> ObjectId {
        let id = match *shape {
            Shape::Circle { radius, colour } => self.add_circle(position, radius, colour),
            Shape::Rectangle { width, height, colour } => {
                self.add_rect(position, Vec2::new(width, height), colour)
            }
        };
        self.set_angle(id, angle);
        self.set_depth(id, depth);
        id
    }

    fn create_text(&mut self, text: &TextSpec, position: Vec2, angle: f32, depth: i32) -> ObjectId {
        let id = self.add_text(
            position,
            text.content.as_str(),
            text.font_family.as_str(),
            text.font_size,
            text.colour,
        );
        self.set_angle(id, angle);
        self.set_depth(id, depth);
        id
    }

    fn create_container(&mut self, position: Vec2, depth: i32, children: &[ObjectId]) -> ObjectId {
        let id = self.add_container(position, children);
        self.set_depth(id, depth);
        id
    }

    fn destroy(&mut self, handle: ObjectId) {
        Stage::destroy(self, handle);
    }

    fn bounds(&self, handle: ObjectId) -> Rect {
        Stage::bounds(self, handle).unwrap_or_default()
    }

    fn set_size(&mut self, handle: ObjectId, size: Vec2) {
        Stage::set_size(self, handle, size);
    }

    fn position(&self, handle: ObjectId) -> Option<Vec2> {
        Stage::position(self, handle)
    }

    fn set_position(&mut self, handle: ObjectId, position: Vec2) {
        Stage::set_position(self, handle, position);
    }

    fn set_angle(&mut self, handle: ObjectId, degrees: f32) {
        Stage::set_angle(self, handle, degrees);
    }

    fn set_text(&mut self, handle: ObjectId, content: &str) {
        Stage::set_text(self, handle, content);
    }

    fn enable_body(&mut self, handle: ObjectId) {
        Stage::enable_body(self, handle);
    }

    fn has_body(&self, handle: ObjectId) -> bool {
        self.body(handle).is_some()
    }

    fn body_position(&self, handle: ObjectId) -> Option<Vec2> {
        Stage::body_position(self, handle)
    }

    fn set_body_offset(&mut self, handle: ObjectId, offset: Vec2) {
        Stage::set_body_offset(self, handle, offset);
    }

    fn set_collide_world_bounds(&mut self, handle: ObjectId, collide: bool) {
        Stage::set_collide_world_bounds(self, handle, collide);
    }

    fn set_allow_gravity(&mut self, handle: ObjectId, allow: bool) {
        Stage::set_allow_gravity(self, handle, allow);
    }

    fn velocity(&self, handle: ObjectId) -> Option<Vec2> {
        Stage::velocity(self, handle)
    }

    fn set_velocity(&mut self, handle: ObjectId, velocity: Vec2) {
        Stage::set_velocity(self, handle, velocity);
    }

    fn set_background(&mut self, colour: Color) {
        self.camera_mut().background = Some(colour);
    }

    fn set_debug(&mut self, debug: bool) {
        Stage::set_debug(self, debug);
    }

    fn screen_to_world(&self, point: Vec2) -> Vec2 {
        self.camera().screen_to_world(point)
    }
}
