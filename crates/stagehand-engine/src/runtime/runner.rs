use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::core::{App, AppControl, FrameCtx};
use crate::input::InputSource;
use crate::render::Renderer;
use crate::scene::DrawList;
use crate::stage::Stage;
use crate::time::FrameClock;

/// How frame time advances.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Timestep {
    /// Every frame advances by exactly this step, with no pacing. Reproducible.
    Fixed(Duration),
    /// Wall-clock time; the loop sleeps so frames take at least `frame_budget`.
    RealTime { frame_budget: Duration },
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub timestep: Timestep,
    /// Stop after this many frames. `None` runs until the app exits.
    pub max_frames: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            timestep: Timestep::Fixed(Duration::from_secs_f64(1.0 / 60.0)),
            max_frames: None,
        }
    }
}

/// Why the loop stopped.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExitReason {
    FrameLimit,
    AppRequested,
}

/// Summary returned once the loop stops.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RunReport {
    /// Frames whose `on_frame` callback ran.
    pub frames: u64,
    /// Simulated seconds.
    pub elapsed: f32,
    pub exit: ExitReason,
}

/// Entry point for the frame loop.
pub struct Runtime;

impl Runtime {
    /// Drives `app` until it exits or the frame limit is reached.
    ///
    /// Per frame: pending input → `on_input`, `stage.step(dt)`, `on_frame`,
    /// `stage.draw`, `renderer.render`. Callbacks run to completion one at a time.
    pub fn run<A, I, R>(
        config: &RuntimeConfig,
        stage: &mut Stage,
        app: &mut A,
        input: &mut I,
        renderer: &mut R,
    ) -> Result<RunReport>
    where
        A: App,
        I: InputSource,
        R: Renderer,
    {
        let mut report = RunReport { frames: 0, elapsed: 0.0, exit: ExitReason::AppRequested };

        if app.on_start(stage).context("app failed to start")? == AppControl::Exit {
            log::info!("app exited during start");
            return Ok(report);
        }

        let (mut clock, budget) = match config.timestep {
            Timestep::Fixed(step) => (FrameClock::fixed(step), None),
            Timestep::RealTime { frame_budget } => (FrameClock::new(), Some(frame_budget)),
        };
        let mut list = DrawList::new();

        loop {
            let frame_index = clock.frame_index();
            if config.max_frames.is_some_and(|max| frame_index >= max) {
                report.exit = ExitReason::FrameLimit;
                break;
            }
            let started = Instant::now();

            let mut control = AppControl::Continue;
            for event in input.poll(frame_index) {
                control = app
                    .on_input(stage, &event)
                    .with_context(|| format!("input handling failed before frame {frame_index}"))?;
                if control == AppControl::Exit {
                    break;
                }
            }
            if control == AppControl::Exit {
                break;
            }

            let time = clock.tick();
            stage.step(time.dt);

            let control = {
                let mut ctx = FrameCtx { stage: &mut *stage, time };
                app.on_frame(&mut ctx)
                    .with_context(|| format!("frame {frame_index} failed"))?
            };
            report.frames += 1;
            report.elapsed = time.elapsed;

            list.clear();
            stage.draw(&mut list);
            renderer
                .render(stage.camera(), &mut list)
                .with_context(|| format!("rendering frame {frame_index} failed"))?;

            if control == AppControl::Exit {
                break;
            }

            if let Some(budget) = budget {
                if let Some(rest) = budget.checked_sub(started.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }

        log::debug!("runtime stopped after {} frames ({:?})", report.frames, report.exit);
        Ok(report)
    }
}
