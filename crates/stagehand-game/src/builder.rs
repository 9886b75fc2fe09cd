//! Scene-graph construction.
//!
//! Turns one entity descriptor into engine objects, recursively:
//! - an entity with components becomes a container at the entity position
//!   holding its own primitive (at the container origin) followed by its
//!   components, each built the same way
//! - an entity without components is its primitive, or an empty container
//!   when it draws nothing
//! - a root entity that is not static gets a physics body fitted to its
//!   visual bounds, colliding with the world bounds and subject to gravity

use stagehand_engine::coords::Vec2;

use crate::backend::Backend;
use crate::entity::{Entity, EntityKind};
use crate::graph::Node;

/// Builds `entity` and returns the node tree for it. `label` names the root node.
pub fn build<B: Backend>(backend: &mut B, label: &str, entity: &Entity) -> Node<B::Handle> {
    let node = if entity.components.is_empty() {
        build_leaf(backend, label, entity)
    } else {
        build_composite(backend, label, entity)
    };

    if entity.is_dynamic_root() {
        activate_physics(backend, node.handle, entity.velocity);
    }
    node
}

fn build_leaf<B: Backend>(backend: &mut B, label: &str, entity: &Entity) -> Node<B::Handle> {
    let primitive = create_primitive(backend, entity, entity.position);
    let handle = match primitive {
        Some(p) => p,
        None => backend.create_container(entity.position, entity.z, &[]),
    };
    Node { label: label.to_string(), handle, primitive, children: Vec::new() }
}

fn build_composite<B: Backend>(backend: &mut B, label: &str, entity: &Entity) -> Node<B::Handle> {
    let children: Vec<Node<B::Handle>> = entity
        .components
        .iter()
        .enumerate()
        .map(|(i, child)| {
            let child_label = match &child.name {
                Some(name) => name.clone(),
                None => format!("{label}/{i}"),
            };
            build(backend, &child_label, child)
        })
        .collect();

    let primitive = create_primitive(backend, entity, Vec2::zero());

    let mut members = Vec::with_capacity(children.len() + 1);
    members.extend(primitive);
    members.extend(children.iter().map(|c| c.handle));
    let handle = backend.create_container(entity.position, entity.z, &members);

    Node { label: label.to_string(), handle, primitive, children }
}

fn create_primitive<B: Backend>(backend: &mut B, entity: &Entity, position: Vec2) -> Option<B::Handle> {
    match &entity.kind {
        EntityKind::Shape(shape) => Some(backend.create_shape(shape, position, entity.angle, entity.z)),
        EntityKind::Text(text) => Some(backend.create_text(text, position, entity.angle, entity.z)),
        EntityKind::Container | EntityKind::Generic => None,
    }
}

/// Fits a body to the object's visual bounds and turns on world collision and gravity.
///
/// The body starts with the entity's declared velocity.
fn activate_physics<B: Backend>(backend: &mut B, handle: B::Handle, velocity: Vec2) {
    let bounds = backend.bounds(handle);
    backend.set_size(handle, bounds.size);
    backend.enable_body(handle);
    backend.set_velocity(handle, velocity);

    if let Some(body_origin) = backend.body_position(handle) {
        backend.set_body_offset(handle, bounds.min() - body_origin);
    }
    backend.set_collide_world_bounds(handle, true);
    backend.set_allow_gravity(handle, true);
    log::trace!("enabled body for {handle:?} at {bounds:?}");
}
