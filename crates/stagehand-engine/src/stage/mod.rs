//! Retained stage: the imperative object world games are drawn from.
//!
//! Responsibilities:
//! - own every drawable object behind generational `ObjectId`s
//! - group objects into containers (children positioned relative to the parent)
//! - simulate arcade bodies on top-level objects (`step`)
//! - emit a paint-ordered `DrawList` each frame (`draw`)
//!
//! Stale or unknown ids are ignored by setters and yield `None` from getters.

mod camera;
mod object;
mod physics;

pub use camera::Camera;
pub use object::{ObjectId, ObjectKind, StageObject};
pub use physics::{Blocked, Body, PhysicsWorld};

use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::scene::{Border, DrawList, ZIndex};

/// Stage construction parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct StageConfig {
    /// World rectangle bodies collide with.
    pub bounds: Rect,
    pub gravity: Vec2,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, 800.0, 600.0),
            gravity: Vec2::new(0.0, 300.0),
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u32,
    object: Option<StageObject>,
}

const DEBUG_BODY: Color = Color::from_premul(1.0, 0.0, 1.0, 1.0);

/// Owner of all stage objects, the physics world and the camera.
#[derive(Debug)]
pub struct Stage {
    slots: Vec<Slot>,
    free: Vec<u32>,
    world: PhysicsWorld,
    camera: Camera,
    debug: bool,
}

impl Stage {
    pub fn new(config: StageConfig) -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            world: PhysicsWorld { bounds: config.bounds, gravity: config.gravity },
            camera: Camera::default(),
            debug: false,
        }
    }

    // ── object creation ───────────────────────────────────────────────────

    pub fn add_circle(&mut self, position: Vec2, radius: f32, fill: Color) -> ObjectId {
        self.insert(StageObject::new(ObjectKind::Circle { radius, fill }, position))
    }

    pub fn add_rect(&mut self, position: Vec2, size: Vec2, fill: Color) -> ObjectId {
        let mut obj = StageObject::new(ObjectKind::Rect { fill }, position);
        obj.size = size;
        self.insert(obj)
    }

    pub fn add_text(
        &mut self,
        position: Vec2,
        content: impl Into<String>,
        font_family: impl Into<String>,
        font_size: f32,
        color: Color,
    ) -> ObjectId {
        let kind = ObjectKind::Text {
            content: content.into(),
            font_family: font_family.into(),
            font_size,
            color,
        };
        self.insert(StageObject::new(kind, position))
    }

    /// Creates a container at `position` and moves `children` into it.
    ///
    /// Children keep their positions, which are now read relative to the container.
    /// A child already inside another container is detached from it first.
    pub fn add_container(&mut self, position: Vec2, children: &[ObjectId]) -> ObjectId {
        let live: Vec<ObjectId> = children.iter().copied().filter(|c| self.contains(*c)).collect();
        let id = self.insert(StageObject::new(ObjectKind::Container { children: live.clone() }, position));
        for child in live {
            self.detach(child);
            if let Some(obj) = self.get_mut(child) {
                obj.parent = Some(id);
            }
        }
        id
    }

    fn insert(&mut self, object: StageObject) -> ObjectId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.object = Some(object);
                ObjectId { index, generation: slot.generation }
            }
            None => {
                self.slots.push(Slot { generation: 0, object: Some(object) });
                ObjectId { index: (self.slots.len() - 1) as u32, generation: 0 }
            }
        }
    }

    /// Destroys an object and, for containers, every descendant.
    pub fn destroy(&mut self, id: ObjectId) {
        if !self.contains(id) {
            return;
        }
        self.detach(id);
        self.destroy_subtree(id);
    }

    fn destroy_subtree(&mut self, id: ObjectId) {
        let slot = &mut self.slots[id.index as usize];
        let Some(object) = slot.object.take() else { return };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);

        if let ObjectKind::Container { children } = object.kind {
            for child in children {
                self.destroy_subtree(child);
            }
        }
    }

    /// Removes `id` from its parent's child list.
    fn detach(&mut self, id: ObjectId) {
        let Some(parent) = self.get(id).and_then(|o| o.parent) else { return };
        if let Some(ObjectKind::Container { children }) = self.get_mut(parent).map(|p| &mut p.kind) {
            children.retain(|c| *c != id);
        }
        if let Some(obj) = self.get_mut(id) {
            obj.parent = None;
        }
    }

    // ── access ────────────────────────────────────────────────────────────

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: ObjectId) -> Option<&StageObject> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.object.as_ref())
    }

    fn get_mut(&mut self, id: ObjectId) -> Option<&mut StageObject> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.object.as_mut())
    }

    /// Number of live objects, nested ones included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.object.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live top-level objects in slot order.
    pub fn roots(&self) -> impl Iterator<Item = (ObjectId, &StageObject)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            let obj = s.object.as_ref()?;
            obj.parent.is_none().then_some((ObjectId { index: i as u32, generation: s.generation }, obj))
        })
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Toggles physics debug overlays in [`draw`](Self::draw).
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    // ── transform ─────────────────────────────────────────────────────────

    pub fn position(&self, id: ObjectId) -> Option<Vec2> {
        self.get(id).map(|o| o.position)
    }

    pub fn set_position(&mut self, id: ObjectId, position: Vec2) {
        if let Some(obj) = self.get_mut(id) {
            obj.position = position;
        }
    }

    /// Position with every ancestor container's position applied.
    pub fn world_position(&self, id: ObjectId) -> Option<Vec2> {
        let obj = self.get(id)?;
        let parent_origin = match obj.parent {
            Some(parent) => self.world_position(parent)?,
            None => Vec2::zero(),
        };
        Some(parent_origin + obj.position)
    }

    pub fn set_angle(&mut self, id: ObjectId, degrees: f32) {
        if let Some(obj) = self.get_mut(id) {
            obj.angle = degrees;
        }
    }

    pub fn set_depth(&mut self, id: ObjectId, depth: i32) {
        if let Some(obj) = self.get_mut(id) {
            obj.depth = depth;
        }
    }

    /// Overrides the display size. Bodies keep their own size.
    pub fn set_size(&mut self, id: ObjectId, size: Vec2) {
        if let Some(obj) = self.get_mut(id) {
            obj.size = size;
        }
    }

    /// Replaces text content and re-measures. Non-text objects are left alone.
    pub fn set_text(&mut self, id: ObjectId, text: &str) {
        let Some(obj) = self.get_mut(id) else { return };
        if let ObjectKind::Text { content, font_size, .. } = &mut obj.kind {
            if content.as_str() != text {
                *content = text.to_string();
                obj.size = object::measure_text(text, *font_size);
            }
        }
    }

    /// Visual bounds in world space.
    ///
    /// Containers report the union of their descendants (their own rotation is
    /// not applied to children); an empty container is a point at its position.
    pub fn bounds(&self, id: ObjectId) -> Option<Rect> {
        let local = self.local_bounds(id)?;
        let parent_origin = match self.get(id)?.parent {
            Some(parent) => self.world_position(parent)?,
            None => Vec2::zero(),
        };
        Some(local.translated(parent_origin))
    }

    /// Bounds in the coordinate space of the object's parent.
    fn local_bounds(&self, id: ObjectId) -> Option<Rect> {
        let obj = self.get(id)?;
        match &obj.kind {
            ObjectKind::Container { children } => {
                let union = children
                    .iter()
                    .filter_map(|c| self.local_bounds(*c))
                    .reduce(Rect::union);
                Some(match union {
                    Some(r) => r.translated(obj.position),
                    None => Rect::at(obj.position),
                })
            }
            _ => Some(obj.primitive_bounds()),
        }
    }

    // ── physics ───────────────────────────────────────────────────────────

    /// Attaches a body sized to the object's current display size.
    /// Re-enabling keeps the existing body.
    pub fn enable_body(&mut self, id: ObjectId) {
        if let Some(obj) = self.get_mut(id) {
            if obj.body.is_none() {
                obj.body = Some(Body::new(obj.size));
            }
        }
    }

    pub fn body(&self, id: ObjectId) -> Option<&Body> {
        self.get(id)?.body.as_ref()
    }

    fn body_mut(&mut self, id: ObjectId) -> Option<&mut Body> {
        self.get_mut(id)?.body.as_mut()
    }

    /// World-space top-left of the body rectangle.
    pub fn body_position(&self, id: ObjectId) -> Option<Vec2> {
        let obj = self.get(id)?;
        let body = obj.body.as_ref()?;
        Some(self.world_position(id)? + obj.display_offset() + body.offset)
    }

    pub fn set_body_offset(&mut self, id: ObjectId, offset: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.offset = offset;
        }
    }

    pub fn set_collide_world_bounds(&mut self, id: ObjectId, collide: bool) {
        if let Some(body) = self.body_mut(id) {
            body.collide_world_bounds = collide;
        }
    }

    pub fn set_allow_gravity(&mut self, id: ObjectId, allow: bool) {
        if let Some(body) = self.body_mut(id) {
            body.allow_gravity = allow;
        }
    }

    /// Body velocity; `None` when the object has no body.
    pub fn velocity(&self, id: ObjectId) -> Option<Vec2> {
        self.body(id).map(|b| b.velocity)
    }

    pub fn set_velocity(&mut self, id: ObjectId, velocity: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.velocity = velocity;
        }
    }

    /// Advances every top-level body by `dt` seconds.
    ///
    /// Bodies on objects nested inside containers are not simulated.
    pub fn step(&mut self, dt: f32) {
        let world = &self.world;
        for slot in &mut self.slots {
            let Some(obj) = slot.object.as_mut() else { continue };
            if obj.parent.is_some() {
                continue;
            }
            let display_offset = obj.display_offset();
            if let Some(body) = obj.body.as_mut() {
                obj.position = world.integrate(body, obj.position, display_offset, dt);
            }
        }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Records every top-level object (and its descendants) into `list`.
    ///
    /// Descendants are drawn at their root's depth, in child order.
    /// With debug enabled, body rectangles are outlined on the overlay layer.
    pub fn draw(&self, list: &mut DrawList) {
        for (id, obj) in self.roots() {
            self.draw_object(id, Vec2::zero(), ZIndex(obj.depth), list);
        }

        if self.debug {
            for (id, obj) in self.roots() {
                if let (Some(body), Some(top_left)) = (&obj.body, self.body_position(id)) {
                    let rect = Rect::from_origin_size(top_left, body.size);
                    list.push_outline(ZIndex::OVERLAY, rect, Border::new(1.0, DEBUG_BODY));
                }
            }
        }
    }

    fn draw_object(&self, id: ObjectId, parent_origin: Vec2, z: ZIndex, list: &mut DrawList) {
        let Some(obj) = self.get(id) else { return };
        let position = parent_origin + obj.position;
        let top_left = position + obj.display_offset();

        match &obj.kind {
            ObjectKind::Circle { radius, fill } => {
                let center = top_left + obj.size * 0.5;
                list.push_solid_circle(z, center, *radius, *fill);
            }
            ObjectKind::Rect { fill } => {
                list.push_rect(z, Rect::from_origin_size(top_left, obj.size), obj.angle, Some(*fill), None);
            }
            ObjectKind::Text { content, font_family, font_size, color } => {
                list.push_text(z, content.as_str(), font_family.as_str(), *font_size, *color, top_left);
            }
            ObjectKind::Container { children } => {
                for child in children {
                    self.draw_object(*child, position, z, list);
                }
            }
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(StageConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCmd;

    fn red() -> Color {
        Color::from_hex(0xff0000)
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn destroyed_ids_go_stale() {
        let mut stage = Stage::default();
        let a = stage.add_circle(Vec2::zero(), 1.0, red());
        stage.destroy(a);
        let b = stage.add_circle(Vec2::zero(), 1.0, red());
        assert!(!stage.contains(a));
        assert!(stage.contains(b));
        assert_eq!(stage.position(a), None);
    }

    #[test]
    fn destroying_container_destroys_children() {
        let mut stage = Stage::default();
        let child = stage.add_circle(Vec2::zero(), 1.0, red());
        let container = stage.add_container(Vec2::zero(), &[child]);
        assert_eq!(stage.len(), 2);
        stage.destroy(container);
        assert!(stage.is_empty());
    }

    #[test]
    fn destroying_child_detaches_it() {
        let mut stage = Stage::default();
        let child = stage.add_circle(Vec2::zero(), 1.0, red());
        let container = stage.add_container(Vec2::zero(), &[child]);
        stage.destroy(child);
        assert!(stage.get(container).unwrap().children().is_empty());
    }

    #[test]
    fn container_adopts_children() {
        let mut stage = Stage::default();
        let child = stage.add_rect(Vec2::new(5.0, 0.0), Vec2::new(2.0, 2.0), red());
        let container = stage.add_container(Vec2::new(100.0, 100.0), &[child]);
        assert_eq!(stage.get(child).unwrap().parent, Some(container));
        assert_eq!(stage.world_position(child), Some(Vec2::new(105.0, 100.0)));
        assert_eq!(stage.roots().count(), 1);
    }

    // ── bounds ────────────────────────────────────────────────────────────

    #[test]
    fn container_bounds_union_children_in_world_space() {
        let mut stage = Stage::default();
        let a = stage.add_rect(Vec2::new(0.0, 0.0), Vec2::new(20.0, 20.0), red());
        let b = stage.add_circle(Vec2::new(30.0, 0.0), 5.0, red());
        let c = stage.add_container(Vec2::new(100.0, 100.0), &[a, b]);
        assert_eq!(stage.bounds(c), Some(Rect::new(90.0, 90.0, 45.0, 20.0)));
        assert_eq!(stage.bounds(b), Some(Rect::new(125.0, 95.0, 10.0, 10.0)));
    }

    #[test]
    fn empty_container_bounds_is_its_position() {
        let mut stage = Stage::default();
        let c = stage.add_container(Vec2::new(7.0, 8.0), &[]);
        assert_eq!(stage.bounds(c), Some(Rect::new(7.0, 8.0, 0.0, 0.0)));
    }

    // ── physics ───────────────────────────────────────────────────────────

    #[test]
    fn sized_container_body_follows_display_origin() {
        let mut stage = Stage::default();
        let a = stage.add_rect(Vec2::new(10.0, 0.0), Vec2::new(20.0, 20.0), red());
        let c = stage.add_container(Vec2::new(100.0, 100.0), &[a]);
        stage.set_size(c, Vec2::new(20.0, 20.0));
        stage.enable_body(c);
        // Centered origin: body top-left is position - size/2.
        assert_eq!(stage.body_position(c), Some(Vec2::new(90.0, 90.0)));
        stage.set_body_offset(c, Vec2::new(10.0, 0.0));
        assert_eq!(stage.body_position(c), Some(Vec2::new(100.0, 90.0)));
    }

    #[test]
    fn step_moves_bodies_and_ignores_static_objects() {
        let mut stage = Stage::new(StageConfig {
            bounds: Rect::new(0.0, 0.0, 100.0, 100.0),
            gravity: Vec2::new(0.0, 100.0),
        });
        let dynamic = stage.add_circle(Vec2::new(50.0, 10.0), 5.0, red());
        let fixed = stage.add_circle(Vec2::new(20.0, 10.0), 5.0, red());
        stage.enable_body(dynamic);
        stage.set_allow_gravity(dynamic, true);
        stage.set_collide_world_bounds(dynamic, true);

        for _ in 0..200 {
            stage.step(0.05);
        }

        assert_eq!(stage.position(fixed), Some(Vec2::new(20.0, 10.0)));
        let resting = stage.position(dynamic).unwrap();
        assert_eq!(resting.x, 50.0);
        assert!((resting.y - 95.0).abs() < 1e-3);
        assert!(stage.body(dynamic).unwrap().on_floor());
        assert_eq!(stage.velocity(fixed), None);
    }

    #[test]
    fn set_text_remeasures() {
        let mut stage = Stage::default();
        let t = stage.add_text(Vec2::zero(), "ab", "mono", 10.0, red());
        stage.set_text(t, "abcd");
        assert_eq!(stage.get(t).unwrap().size.x, 24.0);
    }

    // ── drawing ───────────────────────────────────────────────────────────

    #[test]
    fn draw_translates_children_and_uses_root_depth() {
        let mut stage = Stage::default();
        let dot = stage.add_circle(Vec2::new(5.0, 5.0), 2.0, red());
        let group = stage.add_container(Vec2::new(10.0, 10.0), &[dot]);
        stage.set_depth(group, 3);

        let mut list = DrawList::new();
        stage.draw(&mut list);
        let item = &list.items()[0];
        assert_eq!(item.key.z, ZIndex(3));
        match &item.cmd {
            DrawCmd::Circle(c) => assert_eq!(c.center, Vec2::new(15.0, 15.0)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn debug_outlines_bodies_on_overlay() {
        let mut stage = Stage::default();
        let ball = stage.add_circle(Vec2::new(10.0, 10.0), 5.0, red());
        stage.enable_body(ball);

        let mut list = DrawList::new();
        stage.draw(&mut list);
        assert_eq!(list.len(), 1);

        stage.set_debug(true);
        list.clear();
        stage.draw(&mut list);
        assert_eq!(list.len(), 2);
        let overlay = list.iter_in_paint_order().last().unwrap();
        assert_eq!(overlay.key.z, ZIndex::OVERLAY);
        match &overlay.cmd {
            DrawCmd::Rect(r) => assert_eq!(r.rect, Rect::new(5.0, 5.0, 10.0, 10.0)),
            other => panic!("unexpected {other:?}"),
        }
    }
}
