//! Error types for state transitions.

use std::fmt;

use thiserror::Error;

/// Identifies which callback or phase produced a state transition.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Origin {
    Setup,
    /// Per-frame read-back of engine positions and velocities.
    PreUpdatePull,
    /// The user `update` callback, committed ahead of the push to the engine.
    Update,
    KeyDown,
    KeyUp,
    MouseDown,
    MouseUp,
}

impl Origin {
    pub fn as_str(self) -> &'static str {
        match self {
            Origin::Setup => "setup",
            Origin::PreUpdatePull => "pre-update pull",
            Origin::Update => "update",
            Origin::KeyDown => "key down",
            Origin::KeyUp => "key up",
            Origin::MouseDown => "mouse down",
            Origin::MouseUp => "mouse up",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state-producing callback returned no state.
///
/// Treated as a bug in the caller's code: it aborts the transition that
/// triggered it and is never retried.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("`{origin}` returned no game state; every callback must return the next state")]
pub struct MissingStateError {
    pub origin: Origin,
}

pub type Result<T, E = MissingStateError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_callback() {
        let err = MissingStateError { origin: Origin::KeyDown };
        assert_eq!(
            err.to_string(),
            "`key down` returned no game state; every callback must return the next state"
        );
    }
}
