//! Per-frame two-way sync between engine objects and the state tree.
//!
//! Each frame runs three phases in order:
//! 1. pull: live positions (and velocities of bodies) are read back from the
//!    engine into a fresh state, committed as `pre-update pull`
//! 2. update: the user callback maps that state to the next one
//! 3. push: the result is committed as `update` and written to the engine
//!
//! Only root entities have handles; everything else is carried through
//! untouched. Roots whose names vanished from the committed state are
//! destroyed after the push.

use std::rc::Rc;

use crate::backend::Backend;
use crate::error::{Origin, Result};
use crate::functions::UpdateFn;
use crate::graph::SceneGraph;
use crate::state::GameState;
use crate::store::StateStore;

/// Runs the pull → update → push cycle.
pub struct Reconciler<S> {
    update: Option<UpdateFn<S>>,
}

impl<S: Clone> Reconciler<S> {
    /// Without an update callback the pulled state is committed as the update result.
    pub fn new(update: Option<UpdateFn<S>>) -> Self {
        Self { update }
    }

    /// Syncs one frame. `time` is the elapsed time and `delta` the frame step, in seconds.
    ///
    /// A missing state from `update` aborts before anything is pushed; the
    /// pulled snapshot stays current.
    pub fn frame<B: Backend>(
        &mut self,
        backend: &mut B,
        graph: &mut SceneGraph<B::Handle>,
        store: &mut StateStore<S>,
        time: f32,
        delta: f32,
    ) -> Result<Rc<GameState<S>>> {
        let pulled = pull(&*backend, graph, store.current());
        let pulled = store.replace(Some(pulled), Origin::PreUpdatePull)?;

        let next = match self.update.as_mut() {
            Some(update) => update(&*pulled, time, delta),
            None => Some(GameState::clone(&pulled)),
        };
        let committed = store.replace(next, Origin::Update)?;

        push(backend, graph, &committed);
        dispose_removed(backend, graph, &committed);
        Ok(committed)
    }
}

/// Builds a copy of `state` with positions and body velocities read from the engine.
///
/// A handle the engine no longer knows keeps the entity's declared values.
pub fn pull<S: Clone, B: Backend>(
    backend: &B,
    graph: &SceneGraph<B::Handle>,
    state: &GameState<S>,
) -> GameState<S> {
    let entities = state
        .entities
        .iter()
        .map(|(name, entity)| {
            let entity = match graph.handle(name) {
                Some(handle) => {
                    let mut synced = entity.clone();
                    if let Some(position) = backend.position(handle) {
                        synced = synced.with_position(position);
                    }
                    if let Some(velocity) = backend.velocity(handle) {
                        synced = synced.with_velocity(velocity);
                    }
                    synced
                }
                None => entity.clone(),
            };
            (name.clone(), entity)
        })
        .collect();

    GameState { entities, scene: state.scene.clone(), sack: state.sack.clone() }
}

/// Writes position, body velocity, angle and text content of every tracked entity.
pub fn push<S, B: Backend>(backend: &mut B, graph: &SceneGraph<B::Handle>, state: &GameState<S>) {
    for (name, entity) in &state.entities {
        let Some(node) = graph.get(name) else { continue };

        backend.set_position(node.handle, entity.position);
        if backend.has_body(node.handle) {
            backend.set_velocity(node.handle, entity.velocity);
        }
        backend.set_angle(node.handle, entity.angle);
        if let (Some(content), Some(primitive)) = (entity.text_content(), node.primitive) {
            backend.set_text(primitive, content);
        }
    }
}

/// Destroys the objects of every root no longer present in `state`.
///
/// Returns how many roots were removed.
pub fn dispose_removed<S, B: Backend>(
    backend: &mut B,
    graph: &mut SceneGraph<B::Handle>,
    state: &GameState<S>,
) -> usize {
    let gone: Vec<String> = graph
        .names()
        .filter(|name| !state.entities.contains_key(*name))
        .map(str::to_string)
        .collect();

    for name in &gone {
        if let Some(node) = graph.remove(name) {
            backend.destroy(node.handle);
            log::debug!("disposed `{name}`: no longer in state");
        }
    }
    gone.len()
}
