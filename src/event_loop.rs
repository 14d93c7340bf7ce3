// event_loop.rs

use crate::actions::Edge;
use crate::bindings::BindingTable;
use crate::input::{InputError, InputEvent, InputSource};
use crate::midi::MidiEngine;
use log::{error, info, trace};

/// The dispatch loop: consumes input events and fires the bound actions.
///
/// Stateless per event; there is no previous-state tracking. The input
/// source is trusted to emit one event per physical state change, so a
/// source that re-emits identical-state events re-fires the action on
/// every one of them.
pub struct EventLoop {
    bindings: BindingTable,
    sinks: Vec<Box<dyn MidiEngine>>,
}

impl EventLoop {
    pub fn new(bindings: BindingTable, sinks: Vec<Box<dyn MidiEngine>>) -> Self {
        EventLoop { bindings, sinks }
    }

    /// Runs until the source closes (clean stop) or fails (fatal).
    ///
    /// Blocks on every read; a source with no further events blocks
    /// indefinitely.
    pub fn run(&mut self, source: &mut dyn InputSource) -> Result<(), InputError> {
        info!(
            "Dispatch loop started: {} bindings, {} sinks",
            self.bindings.len(),
            self.sinks.len()
        );
        loop {
            let events = match source.read() {
                Ok(events) => events,
                Err(InputError::Disconnected) => {
                    info!("Input source closed, dispatch loop stopping");
                    return Ok(());
                }
                Err(e) => {
                    error!("Input source read failed: {}", e);
                    return Err(e);
                }
            };

            for event in &events {
                self.dispatch(event);
            }
        }
    }

    fn dispatch(&mut self, event: &InputEvent) {
        let action = match self.bindings.lookup(&event.code) {
            Some(action) => action,
            None => {
                trace!("Ignoring unbound input '{}'", event.code);
                return;
            }
        };

        let edge = if event.is_pressed() {
            Edge::Pressed
        } else {
            Edge::Released
        };
        trace!("Input '{}' -> {:?} ({:?})", event.code, action, edge);

        // A failing sink drops the rest of this emission but not the loop.
        if let Err(e) = action.fire(edge, &mut self.sinks) {
            error!("MIDI send failed for input '{}': {}", event.code, e);
        }
    }
}
