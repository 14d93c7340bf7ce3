use crate::input::{InputError, InputEvent, InputSource, Result};
use std::collections::VecDeque;

/// Scripted input source for tests. Each `read` pops one batch; once the
/// script is drained the source reports `Disconnected`, which the dispatch
/// loop treats as a clean stop.
pub struct MockInputSource {
    batches: VecDeque<Vec<InputEvent>>,
}

impl MockInputSource {
    pub fn new(batches: Vec<Vec<InputEvent>>) -> Self {
        MockInputSource {
            batches: batches.into(),
        }
    }

    /// One batch per event, in order
    pub fn from_events(events: Vec<InputEvent>) -> Self {
        Self::new(events.into_iter().map(|e| vec![e]).collect())
    }
}

impl InputSource for MockInputSource {
    fn read(&mut self) -> Result<Vec<InputEvent>> {
        self.batches.pop_front().ok_or(InputError::Disconnected)
    }
}
