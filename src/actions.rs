//! Action resolution and MIDI emission.
//!
//! An action name from the binding file resolves to one of three kinds:
//! a single note, a chord, or a custom action registered by the hosting
//! process. Resolution is strict first-match: note table, then chord table,
//! then custom registry. Chords resolve their member notes eagerly so a
//! typo in the definition document fails at startup, not on first press.

use crate::midi::{self, MidiEngine, MidiMessage};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Velocity used for every note-on emission
pub const NOTE_ON_VELOCITY: u8 = 80;

/// All emissions go out on this channel
pub const DEFAULT_CHANNEL: u8 = 0;

/// Which edge of a button transition an event represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Pressed,
    Released,
}

/// Handler for one edge of a custom action, given the full sink set.
///
/// Handlers are shared (`Arc`) so one registry entry can back several
/// bindings.
pub type CustomHandler =
    Arc<dyn Fn(&mut [Box<dyn MidiEngine>]) -> midi::Result<()> + Send + Sync>;

/// A custom action with an optional handler per edge. An absent handler
/// means that edge is silently absorbed.
#[derive(Clone, Default)]
pub struct CustomAction {
    pub pressed: Option<CustomHandler>,
    pub released: Option<CustomHandler>,
}

impl CustomAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_press<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut [Box<dyn MidiEngine>]) -> midi::Result<()> + Send + Sync + 'static,
    {
        self.pressed = Some(Arc::new(handler));
        self
    }

    pub fn on_release<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut [Box<dyn MidiEngine>]) -> midi::Result<()> + Send + Sync + 'static,
    {
        self.released = Some(Arc::new(handler));
        self
    }
}

/// A fully resolved action, ready to fire
pub enum Action {
    /// Single MIDI note
    Note(u8),
    /// Ordered chord members, resolved at build time
    Chord(Vec<u8>),
    /// Host-registered handlers
    Custom(CustomAction),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Note(n) => write!(f, "Note({})", n),
            Action::Chord(notes) => write!(f, "Chord({:?})", notes),
            Action::Custom(custom) => write!(
                f,
                "Custom(pressed: {}, released: {})",
                custom.pressed.is_some(),
                custom.released.is_some()
            ),
        }
    }
}

#[derive(Debug)]
pub enum ActionError {
    /// A chord references a note name missing from the note table
    UnknownNote { chord: String, note: String },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::UnknownNote { chord, note } => {
                write!(f, "chord '{}' references unknown note '{}'", chord, note)
            }
        }
    }
}

impl Error for ActionError {}

/// Resolves an action name against the note table, the chord table and the
/// custom registry, in that order. `Ok(None)` means the name matched
/// nothing; the caller decides what to do with the unresolved entry.
pub fn resolve(
    action_name: &str,
    name_to_number: &HashMap<String, u8>,
    chords: &HashMap<String, Vec<String>>,
    custom_actions: &HashMap<String, CustomAction>,
) -> Result<Option<Action>, ActionError> {
    if let Some(&number) = name_to_number.get(action_name) {
        return Ok(Some(Action::Note(number)));
    }

    if let Some(members) = chords.get(action_name) {
        let mut numbers = Vec::with_capacity(members.len());
        for member in members {
            let number = name_to_number
                .get(member)
                .ok_or_else(|| ActionError::UnknownNote {
                    chord: action_name.to_string(),
                    note: member.clone(),
                })?;
            numbers.push(*number);
        }
        return Ok(Some(Action::Chord(numbers)));
    }

    if let Some(custom) = custom_actions.get(action_name) {
        return Ok(Some(Action::Custom(custom.clone())));
    }

    Ok(None)
}

impl Action {
    /// Emits this action for one edge to every sink.
    ///
    /// Chord members go out in member order, each to every sink before the
    /// next member. A failing sink aborts the remaining sends of this
    /// emission; there is no per-sink isolation.
    pub fn fire(&self, edge: Edge, sinks: &mut [Box<dyn MidiEngine>]) -> midi::Result<()> {
        match self {
            Action::Note(note) => send_note(*note, edge, sinks),
            Action::Chord(notes) => {
                for note in notes {
                    send_note(*note, edge, sinks)?;
                }
                Ok(())
            }
            Action::Custom(custom) => {
                let handler = match edge {
                    Edge::Pressed => &custom.pressed,
                    Edge::Released => &custom.released,
                };
                match handler {
                    Some(handler) => handler(sinks),
                    None => Ok(()),
                }
            }
        }
    }
}

fn send_note(note: u8, edge: Edge, sinks: &mut [Box<dyn MidiEngine>]) -> midi::Result<()> {
    let msg = match edge {
        Edge::Pressed => MidiMessage::NoteOn {
            channel: DEFAULT_CHANNEL,
            note,
            velocity: NOTE_ON_VELOCITY,
        },
        Edge::Released => MidiMessage::NoteOff {
            channel: DEFAULT_CHANNEL,
            note,
        },
    };
    for sink in sinks.iter_mut() {
        sink.send(msg.clone())?;
    }
    Ok(())
}
