//! Declarative entity descriptors.
//!
//! An [`Entity`] describes one renderable/simulatable thing. Entities are plain
//! values: changing one means building a modified copy with the `with_*`
//! helpers, never editing a committed snapshot.

use serde::{Deserialize, Serialize};
use stagehand_engine::coords::Vec2;
use stagehand_engine::paint::Color;

/// Geometric primitive of a shape entity, tagged by `classification`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "classification", rename_all = "snake_case")]
pub enum Shape {
    Circle { radius: f32, colour: Color },
    Rectangle { width: f32, height: f32, colour: Color },
}

impl Shape {
    pub fn colour(&self) -> Color {
        match self {
            Shape::Circle { colour, .. } | Shape::Rectangle { colour, .. } => *colour,
        }
    }
}

/// Text primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpec {
    pub content: String,
    #[serde(default = "TextSpec::default_font_family")]
    pub font_family: String,
    #[serde(default = "TextSpec::default_font_size")]
    pub font_size: f32,
    #[serde(default = "Color::white")]
    pub colour: Color,
}

impl TextSpec {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_family: Self::default_font_family(),
            font_size: Self::default_font_size(),
            colour: Color::white(),
        }
    }

    pub fn font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }

    pub fn colour(mut self, colour: Color) -> Self {
        self.colour = colour;
        self
    }

    fn default_font_family() -> String {
        "monospace".to_string()
    }

    fn default_font_size() -> f32 {
        16.0
    }
}

/// What an entity draws, if anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    Shape(Shape),
    Text(TextSpec),
    /// Groups `components` without drawing anything itself.
    Container,
    /// No primitive; behaves like a container.
    #[default]
    Generic,
}

/// One entity in the declarative world description.
///
/// Only `is_root` entities get a tracked engine object. Everything else exists
/// as a descendant reachable through some root's `components`; component
/// positions are relative to their parent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entity {
    /// Label for components inside a composite. Root entities are named by their key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub position: Vec2,
    /// Degrees, clockwise.
    pub angle: f32,
    pub z: i32,
    pub velocity: Vec2,
    pub is_root: bool,
    pub is_static: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Entity>,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(kind: EntityKind) -> Self {
        Self { kind, ..Self::default() }
    }

    pub fn circle(radius: f32, colour: Color) -> Self {
        Self::new(EntityKind::Shape(Shape::Circle { radius, colour }))
    }

    pub fn rectangle(width: f32, height: f32, colour: Color) -> Self {
        Self::new(EntityKind::Shape(Shape::Rectangle { width, height, colour }))
    }

    pub fn text(spec: TextSpec) -> Self {
        Self::new(EntityKind::Text(spec))
    }

    pub fn container() -> Self {
        Self::new(EntityKind::Container)
    }

    // ── with-field builders ───────────────────────────────────────────────

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn at(self, x: f32, y: f32) -> Self {
        self.with_position(Vec2::new(x, y))
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_angle(mut self, degrees: f32) -> Self {
        self.angle = degrees;
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_component(mut self, component: Entity) -> Self {
        self.components.push(component);
        self
    }

    /// Marks the entity as a tracked root.
    pub fn root(mut self) -> Self {
        self.is_root = true;
        self
    }

    /// Marks the entity as static: it is drawn but never simulated.
    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Replaces the text content; other kinds are returned unchanged.
    pub fn with_text(mut self, content: impl Into<String>) -> Self {
        if let EntityKind::Text(spec) = &mut self.kind {
            spec.content = content.into();
        }
        self
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            EntityKind::Text(spec) => Some(&spec.content),
            _ => None,
        }
    }

    /// True when physics is activated for this entity at scene construction.
    pub fn is_dynamic_root(&self) -> bool {
        self.is_root && !self.is_static
    }
}
