//! Lifecycle controller: one-time scene construction, then per-frame sync and
//! input dispatch.

use std::rc::Rc;

use anyhow::Context;
use stagehand_engine::core::{App, AppControl, FrameCtx};
use stagehand_engine::input::InputEvent;
use stagehand_engine::stage::Stage;

use crate::backend::Backend;
use crate::builder::build;
use crate::dispatch::EventDispatcher;
use crate::error::{Origin, Result};
use crate::functions::{GameFunctions, KeyHandler, PointerHandler, SetupFn};
use crate::graph::SceneGraph;
use crate::reconciler::Reconciler;
use crate::state::GameState;
use crate::store::StateStore;

/// Where a game is in its lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Uninitialized,
    /// Setup committed and the scene graph exists; no frame has run yet.
    SceneBuilt,
    Running,
}

/// Input reducers waiting for setup to bind them.
struct PendingHandlers<S> {
    key_down: Option<KeyHandler<S>>,
    key_up: Option<KeyHandler<S>>,
    mouse_down: Option<PointerHandler<S>>,
    mouse_up: Option<PointerHandler<S>>,
}

/// A running declarative game bound to one engine.
///
/// The game owns the state store, the scene graph and the dispatcher; the
/// engine is lent to each call.
pub struct Game<S, B: Backend> {
    phase: Phase,
    debug: bool,
    setup: SetupFn<S>,
    pending: Option<PendingHandlers<S>>,
    store: StateStore<S>,
    graph: SceneGraph<B::Handle>,
    /// Objects built for top-level entities that are not roots. Drawn, never synced.
    untracked: Vec<B::Handle>,
    reconciler: Reconciler<S>,
    dispatcher: EventDispatcher<S>,
}

impl<S: Clone + Default, B: Backend> Game<S, B> {
    pub fn new(functions: GameFunctions<S>) -> Self {
        let GameFunctions { setup, update, key_down, key_up, mouse_down, mouse_up, debug } = functions;
        Self {
            phase: Phase::Uninitialized,
            debug,
            setup,
            pending: Some(PendingHandlers { key_down, key_up, mouse_down, mouse_up }),
            store: StateStore::new(GameState::default()),
            graph: SceneGraph::new(),
            untracked: Vec::new(),
            reconciler: Reconciler::new(update),
            dispatcher: EventDispatcher::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The current committed state.
    pub fn state(&self) -> &Rc<GameState<S>> {
        self.store.current()
    }

    /// The last `n` committed states, oldest first.
    pub fn history(&self, n: usize) -> Vec<Rc<GameState<S>>> {
        self.store.history_of(n)
    }

    pub fn scene_graph(&self) -> &SceneGraph<B::Handle> {
        &self.graph
    }

    /// Runs the setup callback and builds the scene.
    ///
    /// Every top-level entity is built; only roots are registered for syncing.
    /// On error nothing is built and the game stays uninitialized.
    pub fn setup(&mut self, backend: &mut B) -> Result<()> {
        if self.phase != Phase::Uninitialized {
            log::warn!("setup called twice; ignoring");
            return Ok(());
        }

        backend.set_debug(self.debug);
        let initial = (self.setup)(GameState::default());
        let state = self.store.replace(initial, Origin::Setup)?;

        for (name, entity) in &state.entities {
            let node = build(backend, name, entity);
            if entity.is_root {
                self.graph.insert(node);
            } else {
                self.untracked.push(node.handle);
            }
        }
        if let Some(colour) = state.scene.background {
            backend.set_background(colour);
        }

        if let Some(pending) = self.pending.take() {
            self.dispatcher.bind_key_down(pending.key_down);
            self.dispatcher.bind_key_up(pending.key_up);
            self.dispatcher.bind_mouse_down(pending.mouse_down);
            self.dispatcher.bind_mouse_up(pending.mouse_up);
        }

        self.phase = Phase::SceneBuilt;
        log::info!(
            "scene built: {} root handles, {} untracked",
            self.graph.len(),
            self.untracked.len()
        );
        Ok(())
    }

    /// Syncs one frame. `time` and `delta` are in seconds.
    pub fn frame(&mut self, backend: &mut B, time: f32, delta: f32) -> Result<()> {
        if self.phase == Phase::Uninitialized {
            log::warn!("frame before setup; ignoring");
            return Ok(());
        }
        self.reconciler.frame(backend, &mut self.graph, &mut self.store, time, delta)?;
        self.phase = Phase::Running;
        Ok(())
    }

    /// Dispatches one input event. Returns whether a reducer handled it.
    pub fn handle_input(&mut self, backend: &B, event: &InputEvent) -> Result<bool> {
        if self.phase == Phase::Uninitialized {
            log::warn!("input before setup; ignoring {event:?}");
            return Ok(false);
        }
        self.dispatcher.dispatch(backend, &mut self.store, event)
    }

    /// Destroys every object the game built.
    pub fn dispose(mut self, backend: &mut B) {
        let mut destroyed = 0;
        for node in self.graph.drain() {
            backend.destroy(node.handle);
            destroyed += 1;
        }
        for handle in self.untracked.drain(..) {
            backend.destroy(handle);
            destroyed += 1;
        }
        log::debug!("disposed game ({destroyed} top-level objects)");
    }
}

impl<S: Clone + Default> App for Game<S, Stage> {
    fn on_start(&mut self, stage: &mut Stage) -> anyhow::Result<AppControl> {
        self.setup(stage).context("game setup failed")?;
        Ok(AppControl::Continue)
    }

    fn on_input(&mut self, stage: &mut Stage, event: &InputEvent) -> anyhow::Result<AppControl> {
        self.handle_input(stage, event)?;
        Ok(AppControl::Continue)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> anyhow::Result<AppControl> {
        let (time, delta) = (ctx.elapsed(), ctx.dt());
        self.frame(ctx.stage, time, delta)?;
        Ok(AppControl::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::KeyInput;
    use crate::entity::Entity;
    use crate::error::MissingStateError;
    use stagehand_engine::coords::Vec2;
    use stagehand_engine::input::{Key, ScriptedInput};
    use stagehand_engine::paint::Color;
    use stagehand_engine::render::NullRenderer;
    use stagehand_engine::runtime::{Runtime, RuntimeConfig};
    use stagehand_engine::stage::StageConfig;

    fn ball_game() -> GameFunctions<u32> {
        GameFunctions::new(|s: GameState<u32>| {
            Some(
                s.with_entity("ball", Entity::circle(10.0, Color::from_hex(0xff0000)).at(100.0, 100.0).root())
                    .with_background(Color::from_hex(0x202020)),
            )
        })
    }

    // ── setup ─────────────────────────────────────────────────────────────

    #[test]
    fn setup_builds_ball_with_world_bounds_body() {
        let mut stage = Stage::default();
        let mut game: Game<u32, Stage> = Game::new(ball_game());

        game.setup(&mut stage).unwrap();

        assert_eq!(game.phase(), Phase::SceneBuilt);
        let ball = game.scene_graph().handle("ball").expect("ball is tracked");
        assert!(stage.body(ball).unwrap().collide_world_bounds);
        assert_eq!(stage.camera().background, Some(Color::from_hex(0x202020)));
        assert_eq!(game.history(10).len(), 1);
    }

    #[test]
    fn failed_setup_stays_uninitialized() {
        let mut stage = Stage::default();
        let mut game: Game<u32, Stage> = Game::new(GameFunctions::new(|_| None));

        let err = game.setup(&mut stage).unwrap_err();

        assert_eq!(err, MissingStateError { origin: Origin::Setup });
        assert_eq!(game.phase(), Phase::Uninitialized);
        assert!(stage.is_empty());
    }

    #[test]
    fn only_roots_are_tracked() {
        let mut stage = Stage::default();
        let mut game: Game<u32, Stage> = Game::new(GameFunctions::new(|s: GameState<u32>| {
            Some(
                s.with_entity("root", Entity::container().root().with_component(Entity::circle(2.0, Color::white())))
                    .with_entity("scenery", Entity::rectangle(5.0, 5.0, Color::white())),
            )
        }));

        game.setup(&mut stage).unwrap();

        assert_eq!(game.scene_graph().names().collect::<Vec<_>>(), vec!["root"]);
        assert_eq!(game.scene_graph().get("root").unwrap().children.len(), 1);
        // container + circle + scenery rectangle
        assert_eq!(stage.len(), 3);
    }

    #[test]
    fn debug_flag_reaches_the_stage() {
        let mut stage = Stage::default();
        let mut game: Game<u32, Stage> = Game::new(ball_game().debug(true));
        game.setup(&mut stage).unwrap();
        assert!(stage.debug());
    }

    // ── frames and input ──────────────────────────────────────────────────

    #[test]
    fn frames_and_input_before_setup_are_ignored() {
        let mut stage = Stage::default();
        let mut game: Game<u32, Stage> = Game::new(ball_game().on_key_down(|s, _| Some(s.clone())));

        game.frame(&mut stage, 0.0, 0.016).unwrap();
        let handled = game.handle_input(&stage, &InputEvent::key_pressed(Key::Space)).unwrap();

        assert!(!handled);
        assert_eq!(game.phase(), Phase::Uninitialized);
        assert_eq!(game.history(10).len(), 0);
    }

    #[test]
    fn first_frame_moves_to_running_and_pulls_physics() {
        let mut stage = Stage::default();
        let mut game: Game<u32, Stage> = Game::new(ball_game());
        game.setup(&mut stage).unwrap();

        stage.step(0.1);
        game.frame(&mut stage, 0.1, 0.1).unwrap();

        assert_eq!(game.phase(), Phase::Running);
        let ball = game.state().entity("ball").unwrap();
        assert!(ball.position.y > 100.0);
        assert!(ball.velocity.y > 0.0);
    }

    #[test]
    fn velocity_declared_at_setup_moves_the_body() {
        let mut stage = Stage::new(StageConfig { gravity: Vec2::zero(), ..StageConfig::default() });
        let mut game: Game<u32, Stage> = Game::new(GameFunctions::new(|s: GameState<u32>| {
            Some(s.with_entity(
                "ball",
                Entity::circle(10.0, Color::white()).at(100.0, 100.0).root().with_velocity(Vec2::new(90.0, 0.0)),
            ))
        }));
        game.setup(&mut stage).unwrap();

        for i in 1..=10 {
            stage.step(0.1);
            game.frame(&mut stage, i as f32 * 0.1, 0.1).unwrap();
        }

        let ball = game.state().entity("ball").unwrap();
        assert!((ball.position.x - 190.0).abs() < 1e-3);
        assert_eq!(ball.velocity, Vec2::new(90.0, 0.0));
    }

    #[test]
    fn dispose_destroys_everything() {
        let mut stage = Stage::default();
        let mut game: Game<u32, Stage> = Game::new(GameFunctions::new(|s: GameState<u32>| {
            Some(
                s.with_entity("ball", Entity::circle(3.0, Color::white()).root())
                    .with_entity("scenery", Entity::rectangle(5.0, 5.0, Color::white())),
            )
        }));
        game.setup(&mut stage).unwrap();

        game.dispose(&mut stage);
        assert!(stage.is_empty());
    }

    // ── runtime integration ───────────────────────────────────────────────

    #[test]
    fn space_twice_through_the_runtime_counts_two() {
        let mut stage = Stage::default();
        let mut game: Game<u32, Stage> = Game::new(ball_game().on_key_down(|s: &GameState<u32>, key: &KeyInput| {
            let sack = if key.code == 32 { s.sack + 1 } else { s.sack };
            Some(s.clone().with_sack(sack))
        }));
        let mut input = ScriptedInput::new()
            .at(1, InputEvent::key_pressed(Key::Space))
            .at(1, InputEvent::key_released(Key::Space))
            .at(3, InputEvent::key_pressed(Key::Space));
        let config = RuntimeConfig { max_frames: Some(5), ..RuntimeConfig::default() };

        let report = Runtime::run(&config, &mut stage, &mut game, &mut input, &mut NullRenderer).unwrap();

        assert_eq!(report.frames, 5);
        assert_eq!(game.state().sack, 2);
        assert!(game.state().entity("ball").unwrap().position != Vec2::new(100.0, 100.0));
    }

    #[test]
    fn update_returning_nothing_stops_the_runtime() {
        let mut stage = Stage::default();
        let mut game: Game<u32, Stage> = Game::new(ball_game().update(|_, _, _| None));
        let config = RuntimeConfig { max_frames: Some(3), ..RuntimeConfig::default() };

        let err = Runtime::run(&config, &mut stage, &mut game, &mut ScriptedInput::new(), &mut NullRenderer)
            .unwrap_err();

        let missing = err.downcast_ref::<MissingStateError>().expect("typed cause");
        assert_eq!(missing.origin, Origin::Update);
    }
}
