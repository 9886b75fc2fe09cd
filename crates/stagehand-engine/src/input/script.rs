use std::collections::BTreeMap;

use super::types::InputEvent;

/// Supplies the input events that arrive before a given frame.
///
/// The runtime polls once per frame, before the physics step, and delivers the
/// returned events in order.
pub trait InputSource {
    fn poll(&mut self, frame_index: u64) -> Vec<InputEvent>;
}

/// Source that never produces events.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self, _frame_index: u64) -> Vec<InputEvent> {
        Vec::new()
    }
}

/// Pre-recorded input keyed by frame index.
///
/// Events scheduled for the same frame are delivered in insertion order.
///
/// ```rust,ignore
/// let input = ScriptedInput::new()
///     .at(0, InputEvent::key_pressed(Key::Space))
///     .at(0, InputEvent::key_released(Key::Space))
///     .at(30, InputEvent::pointer_pressed(MouseButton::Left, 100.0, 80.0));
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    queue: BTreeMap<u64, Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, frame_index: u64, event: InputEvent) -> Self {
        self.push(frame_index, event);
        self
    }

    pub fn push(&mut self, frame_index: u64, event: InputEvent) {
        self.queue.entry(frame_index).or_default().push(event);
    }

    /// Number of events not yet delivered.
    pub fn pending(&self) -> usize {
        self.queue.values().map(Vec::len).sum()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, frame_index: u64) -> Vec<InputEvent> {
        // Anything scheduled for a frame that has already passed is flushed too.
        let later = self.queue.split_off(&(frame_index + 1));
        let due = std::mem::replace(&mut self.queue, later);
        due.into_values().flatten().collect()
    }
}
