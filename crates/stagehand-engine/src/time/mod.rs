//! Time subsystem.
//!
//! Provides frame timing without coupling to the runtime.
//! - one `FrameClock` per run loop
//! - call `tick()` once per frame to obtain `FrameTime`
//! - a fixed-step clock gives reproducible runs (tests, replays, headless demos)

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
