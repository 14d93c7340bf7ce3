use crate::midi::{MidiEngine, MidiMessage, Result};
use std::sync::{Arc, Mutex};

/// Recording mock sink. Clones share the message log, so a test can keep a
/// handle while the boxed sink is owned by the dispatch loop.
#[derive(Clone, Default)]
pub struct MockMidiEngine {
    sent: Arc<Mutex<Vec<MidiMessage>>>,
}

impl MockMidiEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent to this sink so far, in send order
    pub fn sent_messages(&self) -> Vec<MidiMessage> {
        self.sent.lock().expect("mock sink mutex poisoned").clone()
    }

    pub fn list_devices() -> Vec<String> {
        vec!["Mock Device 1".to_string(), "Mock Device 2".to_string()]
    }
}

impl MidiEngine for MockMidiEngine {
    fn send(&mut self, msg: MidiMessage) -> Result<()> {
        self.sent.lock().expect("mock sink mutex poisoned").push(msg);
        Ok(())
    }
}
