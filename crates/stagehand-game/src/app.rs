use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};

use stagehand_engine::coords::{Rect, Vec2};
use stagehand_engine::input::InputSource;
use stagehand_engine::render::Renderer;
use stagehand_engine::runtime::{RunReport, Runtime, RuntimeConfig, Timestep};
use stagehand_engine::stage::{Stage, StageConfig};

use crate::functions::GameFunctions;
use crate::game::Game;
use crate::state::GameState;

/// Top-level game builder.
///
/// Configure the world and the frame loop, then hand over the game's
/// callbacks with [`run`](Self::run):
///
/// ```rust,ignore
/// let (state, report) = Application::new()
///     .world_bounds(640.0, 480.0)
///     .gravity(0.0, 400.0)
///     .frames(600)
///     .run(functions, &mut ScriptedInput::new(), &mut NullRenderer)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Application {
    stage: StageConfig,
    runtime: RuntimeConfig,
}

impl Application {
    pub fn new() -> Self {
        Self::default()
    }

    /// World rectangle bodies collide with, anchored at the origin.
    pub fn world_bounds(mut self, width: f32, height: f32) -> Self {
        self.stage.bounds = Rect::new(0.0, 0.0, width, height);
        self
    }

    pub fn gravity(mut self, x: f32, y: f32) -> Self {
        self.stage.gravity = Vec2::new(x, y);
        self
    }

    /// Advance every frame by exactly `seconds`, with no pacing.
    pub fn fixed_timestep(mut self, seconds: f32) -> Self {
        self.runtime.timestep = Timestep::Fixed(Duration::from_secs_f32(seconds));
        self
    }

    /// Use wall-clock time, pacing frames to at most 60 per second.
    pub fn real_time(mut self) -> Self {
        self.runtime.timestep = Timestep::RealTime { frame_budget: Duration::from_secs_f64(1.0 / 60.0) };
        self
    }

    /// Stop after `n` frames.
    pub fn frames(mut self, n: u64) -> Self {
        self.runtime.max_frames = Some(n);
        self
    }

    pub fn stage_config(&self) -> &StageConfig {
        &self.stage
    }

    pub fn runtime_config(&self) -> &RuntimeConfig {
        &self.runtime
    }

    // ── entry point ───────────────────────────────────────────────────────

    /// Builds a stage, runs the game until the frame limit, then tears it down.
    ///
    /// Returns the last committed state and the runtime's report.
    pub fn run<S, I, R>(
        self,
        functions: GameFunctions<S>,
        input: &mut I,
        renderer: &mut R,
    ) -> Result<(Rc<GameState<S>>, RunReport)>
    where
        S: Clone + Default,
        I: InputSource,
        R: Renderer,
    {
        if self.runtime.max_frames.is_none() {
            log::warn!("no frame limit set; the game runs until an error stops it");
        }

        let mut stage = Stage::new(self.stage);
        let mut game: Game<S, Stage> = Game::new(functions);

        let report = Runtime::run(&self.runtime, &mut stage, &mut game, input, renderer)
            .context("stagehand runtime error")?;

        let state = Rc::clone(game.state());
        game.dispose(&mut stage);
        log::info!("game finished after {} frames ({:.2}s simulated)", report.frames, report.elapsed);
        Ok((state, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use stagehand_engine::input::NoInput;
    use stagehand_engine::paint::Color;
    use stagehand_engine::render::NullRenderer;
    use stagehand_engine::runtime::ExitReason;

    #[test]
    fn builder_sets_stage_and_runtime() {
        let app = Application::new().world_bounds(320.0, 200.0).gravity(0.0, 0.0).fixed_timestep(0.5).frames(4);

        assert_eq!(app.stage_config().bounds, Rect::new(0.0, 0.0, 320.0, 200.0));
        assert_eq!(app.stage_config().gravity, Vec2::zero());
        assert_eq!(app.runtime_config().timestep, Timestep::Fixed(Duration::from_millis(500)));
        assert_eq!(app.runtime_config().max_frames, Some(4));
    }

    #[test]
    fn ball_comes_to_rest_on_the_floor() {
        let functions = GameFunctions::new(|s: GameState<()>| {
            Some(s.with_entity("ball", Entity::circle(10.0, Color::white()).at(50.0, 50.0).root()))
        });

        let (state, report) = Application::new()
            .world_bounds(100.0, 100.0)
            .frames(240)
            .run(functions, &mut NoInput, &mut NullRenderer)
            .unwrap();

        assert_eq!(report.exit, ExitReason::FrameLimit);
        let ball = state.entity("ball").unwrap();
        assert!((ball.position.y - 90.0).abs() < 1e-3);
        assert_eq!(ball.velocity.y, 0.0);
    }

    #[test]
    fn setup_failure_surfaces_as_error() {
        let functions = GameFunctions::<()>::new(|_| None);
        let err = Application::new().frames(1).run(functions, &mut NoInput, &mut NullRenderer).unwrap_err();
        assert!(format!("{err:#}").contains("`setup` returned no game state"));
    }
}
