//! Canonical state holder with a bounded history.

use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::{MissingStateError, Origin, Result};
use crate::state::GameState;

/// Number of snapshots kept for debugging and time travel.
pub const HISTORY_CAPACITY: usize = 300;

/// Holds the current snapshot and the most recent committed ones.
///
/// Snapshots are shared `Rc`s: the current state and the newest history entry
/// are the same allocation, and nothing hands out mutable access to either.
#[derive(Debug)]
pub struct StateStore<S> {
    current: Rc<GameState<S>>,
    history: VecDeque<Rc<GameState<S>>>,
    capacity: usize,
}

impl<S> StateStore<S> {
    /// Creates a store whose current state is `initial`. History starts empty.
    pub fn new(initial: GameState<S>) -> Self {
        Self::with_capacity(initial, HISTORY_CAPACITY)
    }

    pub fn with_capacity(initial: GameState<S>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            current: Rc::new(initial),
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Commits `next` as the current state.
    ///
    /// `None` fails with [`MissingStateError`] naming `origin` and leaves the
    /// store untouched. Otherwise the state is appended to history, evicting
    /// the oldest entry once the capacity is exceeded.
    pub fn replace(&mut self, next: Option<GameState<S>>, origin: Origin) -> Result<Rc<GameState<S>>> {
        let Some(next) = next else {
            log::error!("{origin} returned no game state");
            return Err(MissingStateError { origin });
        };

        let next = Rc::new(next);
        self.current = Rc::clone(&next);
        self.history.push_back(Rc::clone(&next));
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }

        log::trace!("committed state from {origin} ({} in history)", self.history.len());
        Ok(next)
    }

    pub fn current(&self) -> &Rc<GameState<S>> {
        &self.current
    }

    /// The last `n` snapshots, oldest first. Returns fewer when history is shorter.
    pub fn history_of(&self, n: usize) -> Vec<Rc<GameState<S>>> {
        let skip = self.history.len().saturating_sub(n);
        self.history.iter().skip(skip).cloned().collect()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
