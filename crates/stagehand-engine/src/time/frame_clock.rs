use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Time since the clock started, in seconds, including this frame's `dt`.
    pub elapsed: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

#[derive(Debug, Clone)]
enum Source {
    Wall { last: Instant, dt_min: Duration, dt_max: Duration },
    Fixed { step: Duration },
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Wall-clock delta time is clamped to avoid pathological values when the
/// process is paused by the debugger or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    source: Source,
    elapsed: Duration,
    frame_index: u64,
}

impl FrameClock {
    /// Creates a wall-clock with default clamps.
    ///
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum prevents simulation explosions after long stalls
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a wall-clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            source: Source::Wall { last: Instant::now(), dt_min, dt_max },
            elapsed: Duration::ZERO,
            frame_index: 0,
        }
    }

    /// Creates a deterministic clock advancing by `step` every tick.
    pub fn fixed(step: Duration) -> Self {
        Self {
            source: Source::Fixed { step },
            elapsed: Duration::ZERO,
            frame_index: 0,
        }
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let dt = match &mut self.source {
            Source::Wall { last, dt_min, dt_max } => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(*last).clamp(*dt_min, *dt_max);
                *last = now;
                dt
            }
            Source::Fixed { step } => *step,
        };

        self.elapsed += dt;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: self.elapsed.as_secs_f32(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_deterministic() {
        let mut clock = FrameClock::fixed(Duration::from_millis(20));
        let a = clock.tick();
        let b = clock.tick();
        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
        assert!((a.dt - 0.02).abs() < 1e-6);
        assert!((b.elapsed - 0.04).abs() < 1e-6);
    }

    #[test]
    fn wall_clock_dt_is_clamped() {
        let mut clock = FrameClock::with_clamps(Duration::from_millis(5), Duration::from_millis(10));
        let ft = clock.tick();
        assert!(ft.dt >= 0.005 - 1e-6);
        assert!(ft.dt <= 0.010 + 1e-6);
    }
}
