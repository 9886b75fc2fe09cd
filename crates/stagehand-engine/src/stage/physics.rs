//! Arcade physics: axis-aligned bodies, gravity, velocity integration and
//! world-bounds clamping. Bodies do not collide with each other.

use crate::coords::{Rect, Vec2};

/// Sides of a body that touched the world bounds during the last step.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Blocked {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Rigid body attached to a top-level stage object.
///
/// The body rectangle sits at the object's display top-left plus `offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub offset: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub allow_gravity: bool,
    pub collide_world_bounds: bool,
    pub blocked: Blocked,
}

impl Body {
    pub(super) fn new(size: Vec2) -> Self {
        Self {
            offset: Vec2::zero(),
            size,
            velocity: Vec2::zero(),
            allow_gravity: false,
            collide_world_bounds: false,
            blocked: Blocked::default(),
        }
    }

    pub fn on_floor(&self) -> bool {
        self.blocked.down
    }
}

/// Global simulation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsWorld {
    pub bounds: Rect,
    /// Acceleration applied to bodies with `allow_gravity`, in units/s².
    pub gravity: Vec2,
}

impl PhysicsWorld {
    /// Advances one body by `dt` seconds and returns its new object position.
    ///
    /// `display_offset` is the vector from the object position to its display
    /// top-left, so the body rectangle is `position + display_offset + body.offset`.
    pub(super) fn integrate(&self, body: &mut Body, position: Vec2, display_offset: Vec2, dt: f32) -> Vec2 {
        body.blocked = Blocked::default();

        if body.allow_gravity {
            body.velocity = body.velocity + self.gravity * dt;
        }

        let mut position = position + body.velocity * dt;

        if body.collide_world_bounds {
            let top_left = position + display_offset + body.offset;
            let bottom_right = top_left + body.size;
            let (min, max) = (self.bounds.min(), self.bounds.max());

            if top_left.x < min.x {
                position.x += min.x - top_left.x;
                body.velocity.x = body.velocity.x.max(0.0);
                body.blocked.left = true;
            } else if bottom_right.x > max.x {
                position.x -= bottom_right.x - max.x;
                body.velocity.x = body.velocity.x.min(0.0);
                body.blocked.right = true;
            }

            if top_left.y < min.y {
                position.y += min.y - top_left.y;
                body.velocity.y = body.velocity.y.max(0.0);
                body.blocked.up = true;
            } else if bottom_right.y > max.y {
                position.y -= bottom_right.y - max.y;
                body.velocity.y = body.velocity.y.min(0.0);
                body.blocked.down = true;
            }
        }

        position
    }
}
