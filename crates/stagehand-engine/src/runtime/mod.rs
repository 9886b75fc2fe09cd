//! Frame loop.
//!
//! Owns the frame clock and drives an `App` against a `Stage`: input, physics,
//! the app's frame callback, then drawing, once per frame.

mod runner;

pub use runner::{ExitReason, RunReport, Runtime, RuntimeConfig, Timestep};
