use anyhow::Result;

use crate::input::InputEvent;
use crate::stage::Stage;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// Errors returned from any callback stop the runtime and are propagated to
/// the caller of [`Runtime::run`](crate::runtime::Runtime::run).
pub trait App {
    /// Called once before the first frame, with an empty stage.
    fn on_start(&mut self, stage: &mut Stage) -> Result<AppControl> {
        let _ = stage;
        Ok(AppControl::Continue)
    }

    /// Called for each input event, in arrival order, between frames.
    fn on_input(&mut self, stage: &mut Stage, event: &InputEvent) -> Result<AppControl> {
        let _ = (stage, event);
        Ok(AppControl::Continue)
    }

    /// Called once per frame, after the physics step and before drawing.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> Result<AppControl>;
}
