//! The immutable game state tree.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stagehand_engine::paint::Color;

use crate::entity::Entity;

/// Scene-wide properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// Camera clear colour, applied once at scene construction.
    pub background: Option<Color>,
}

/// One snapshot of the whole game.
///
/// `S` is the caller's own payload (scores, timers, flags). The store never
/// looks inside it.
///
/// Entities are keyed by unique name. The map is ordered so that scene
/// construction and syncing visit entities deterministically; the order has no
/// other meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState<S> {
    #[serde(default)]
    pub entities: BTreeMap<String, Entity>,
    #[serde(default)]
    pub scene: Scene,
    pub sack: S,
}

impl<S> GameState<S> {
    pub fn new(sack: S) -> Self {
        Self { entities: BTreeMap::new(), scene: Scene::default(), sack }
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Adds or replaces the entity stored under `name`.
    pub fn with_entity(mut self, name: impl Into<String>, entity: Entity) -> Self {
        self.entities.insert(name.into(), entity);
        self
    }

    pub fn without_entity(mut self, name: &str) -> Self {
        self.entities.remove(name);
        self
    }

    /// Rebuilds the entity under `name` through `f`. Missing names are a no-op.
    pub fn map_entity(mut self, name: &str, f: impl FnOnce(Entity) -> Entity) -> Self {
        if let Some(entity) = self.entities.remove(name) {
            self.entities.insert(name.to_string(), f(entity));
        }
        self
    }

    pub fn with_background(mut self, colour: Color) -> Self {
        self.scene.background = Some(colour);
        self
    }

    pub fn with_sack(mut self, sack: S) -> Self {
        self.sack = sack;
        self
    }

    /// Names of root entities, in map order.
    pub fn root_names(&self) -> impl Iterator<Item = &str> {
        self.entities.iter().filter(|(_, e)| e.is_root).map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stagehand_engine::coords::Vec2;

    #[test]
    fn map_entity_rebuilds_in_place_of_old_value() {
        let state = GameState::new(())
            .with_entity("ball", Entity::circle(5.0, Color::white()).root());
        let before = state.clone();
        let after = state.map_entity("ball", |e| e.at(3.0, 4.0));

        assert_eq!(before.entity("ball").unwrap().position, Vec2::zero());
        assert_eq!(after.entity("ball").unwrap().position, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn map_entity_missing_name_is_noop() {
        let state = GameState::new(0u32).map_entity("ghost", |e| e.root());
        assert!(state.entities.is_empty());
    }

    #[test]
    fn root_names_skip_components_and_non_roots() {
        let state = GameState::new(())
            .with_entity("a", Entity::container().root())
            .with_entity("b", Entity::container())
            .with_entity("c", Entity::container().root().fixed());
        assert_eq!(state.root_names().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn state_round_trips_through_json_with_user_payload() {
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        struct Sack {
            score: u32,
        }

        let state = GameState::new(Sack { score: 7 })
            .with_background(Color::from_hex(0x102030))
            .with_entity("wall", Entity::rectangle(10.0, 100.0, Color::white()).root().fixed());
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState<Sack> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
