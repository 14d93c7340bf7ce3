//! Note-name to MIDI-number tables and the note/chord definition document.

use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const NOTES_PER_OCTAVE: usize = 12;

/// Octaves are numbered 0..=8; octave 0 starts at MIDI note 12.
const C0_MIDI_NO: u8 = 12;
const OCTAVES: u8 = 9;

/// Errors from note-table construction or definition-document loading
#[derive(Debug)]
pub enum NoteError {
    /// The note-name alphabet did not contain exactly 12 names
    InvalidNameCount(usize),
    /// The definition document could not be read or parsed
    Document(String),
}

impl fmt::Display for NoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteError::InvalidNameCount(n) => {
                write!(f, "expected {} note names, got {}", NOTES_PER_OCTAVE, n)
            }
            NoteError::Document(msg) => write!(f, "note definition error: {}", msg),
        }
    }
}

impl Error for NoteError {}

impl From<std::io::Error> for NoteError {
    fn from(e: std::io::Error) -> Self {
        NoteError::Document(e.to_string())
    }
}

impl From<serde_json::Error> for NoteError {
    fn from(e: serde_json::Error) -> Self {
        NoteError::Document(e.to_string())
    }
}

/// The note/chord definition document (`notes.json`)
#[derive(Debug, Deserialize)]
pub struct NoteDefinitions {
    /// Ordered list of exactly 12 note names, one per semitone
    pub solfeggio_names: Vec<String>,
    /// Chord name to ordered member note names
    #[serde(default)]
    pub chords: HashMap<String, Vec<String>>,
}

impl NoteDefinitions {
    pub fn load(path: &Path) -> Result<Self, NoteError> {
        let file = File::open(path)
            .map_err(|e| NoteError::Document(format!("cannot open {}: {}", path.display(), e)))?;
        let definitions = serde_json::from_reader(BufReader::new(file))?;
        Ok(definitions)
    }
}

/// Builds the bidirectional note-name / note-number tables.
///
/// Covers octaves 0..=8 for the 12 given names, with octave 0 anchored at
/// MIDI note 12. With `keep_octave` the composed name carries the octave
/// suffix and the reverse map holds full MIDI numbers. Without it, names
/// collide across octaves and each insertion overwrites the previous one in
/// ascending order, so octave 8 wins and the reverse values are reduced to
/// 0..=11. That overwrite order is part of the contract, not an accident.
pub fn build_note_tables(
    note_names: &[String],
    keep_octave: bool,
) -> Result<(HashMap<u8, String>, HashMap<String, u8>), NoteError> {
    if note_names.len() != NOTES_PER_OCTAVE {
        return Err(NoteError::InvalidNameCount(note_names.len()));
    }

    let mut number_to_name = HashMap::new();
    let mut name_to_number = HashMap::new();
    for octave in 0..OCTAVES {
        for (index, name) in note_names.iter().enumerate() {
            let number = C0_MIDI_NO + octave * NOTES_PER_OCTAVE as u8 + index as u8;
            let full_name = if keep_octave {
                format!("{}{}", name, octave)
            } else {
                name.clone()
            };
            number_to_name.insert(number, full_name.clone());
            let value = if keep_octave {
                number
            } else {
                number % NOTES_PER_OCTAVE as u8
            };
            name_to_number.insert(full_name, value);
        }
    }
    Ok((number_to_name, name_to_number))
}
