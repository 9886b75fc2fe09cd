mod ascii;
mod level;

use anyhow::{Context, Result};

use stagehand_engine::coords::Rect;
use stagehand_engine::input::{InputEvent, Key, MouseButton, ScriptedInput};
use stagehand_engine::logging::{init_logging, LoggingConfig};
use stagehand_game::Application;

use crate::ascii::AsciiRenderer;

const FRAMES: u64 = 600;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let debug = std::env::args().any(|a| a == "--debug");
    let level = level::load()?;

    // A kick, a second kick mid-air, then a click that drops the ball on the left.
    let mut input = ScriptedInput::new()
        .at(90, InputEvent::key_pressed(Key::Space))
        .at(92, InputEvent::key_released(Key::Space))
        .at(120, InputEvent::key_pressed(Key::Space))
        .at(300, InputEvent::pointer_pressed(MouseButton::Left, 40.0, 30.0))
        .at(301, InputEvent::pointer_released(MouseButton::Left, 40.0, 30.0));

    let mut renderer = AsciiRenderer::new(Rect::new(0.0, 0.0, level::WORLD_WIDTH, level::WORLD_HEIGHT), 64, 24)
        .every(120);

    let (state, report) = Application::new()
        .world_bounds(level::WORLD_WIDTH, level::WORLD_HEIGHT)
        .gravity(0.0, 400.0)
        .fixed_timestep(1.0 / 60.0)
        .frames(FRAMES)
        .run(level::functions(level, debug), &mut input, &mut renderer)
        .context("bouncing ball demo failed")?;

    println!("final frame\n{}", renderer.last_frame());
    println!(
        "{} frames, {:.2}s simulated: {} kicks, {} bounces since the last kick",
        report.frames, report.elapsed, state.sack.kicks, state.sack.bounces
    );
    Ok(())
}
