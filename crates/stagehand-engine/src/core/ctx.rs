use crate::stage::Stage;
use crate::time::FrameTime;

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub stage: &'a mut Stage,
    pub time:  FrameTime,
}

impl FrameCtx<'_> {
    /// Seconds since the runtime started, including this frame.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.time.elapsed
    }

    /// Seconds since the previous frame.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.time.dt
    }
}
