//! The binding table: normalized input identifier to resolved action.
//!
//! Built once at startup from the INI binding file and never mutated
//! afterwards. Identifier comparison is case-insensitive; identifiers are
//! lower-cased at build time and again at lookup.

use crate::actions::{self, Action, ActionError, CustomAction};
use config::{Config, File, FileFormat};
use log::{debug, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum BindingError {
    /// The binding file is missing or not a flat key/value section
    Config(String),
    /// An entry resolved to a chord with an undefined member note
    Action(ActionError),
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::Config(msg) => write!(f, "binding config error: {}", msg),
            BindingError::Action(e) => write!(f, "binding error: {}", e),
        }
    }
}

impl Error for BindingError {}

impl From<ActionError> for BindingError {
    fn from(e: ActionError) -> Self {
        BindingError::Action(e)
    }
}

impl From<config::ConfigError> for BindingError {
    fn from(e: config::ConfigError) -> Self {
        BindingError::Config(e.to_string())
    }
}

/// Reads the `[gamepad]` section of the binding file as a flat
/// input-identifier to action-name map.
pub fn load_raw_mapping(path: &Path) -> Result<HashMap<String, String>, BindingError> {
    let settings = Config::builder()
        .add_source(File::from(path.to_path_buf()).format(FileFormat::Ini))
        .build()?;
    let raw = settings.get::<HashMap<String, String>>("gamepad")?;
    Ok(raw)
}

/// Immutable map from lower-cased input identifier to resolved action
pub struct BindingTable {
    bindings: HashMap<String, Action>,
}

impl BindingTable {
    /// Resolves every entry of the raw mapping. Entries whose action name
    /// matches nothing are dropped, not errors; a chord with an undefined
    /// member note fails the whole build.
    pub fn build(
        raw_mapping: &HashMap<String, String>,
        name_to_number: &HashMap<String, u8>,
        chords: &HashMap<String, Vec<String>>,
        custom_actions: &HashMap<String, CustomAction>,
    ) -> Result<Self, BindingError> {
        let mut bindings = HashMap::new();
        for (input_id, action_name) in raw_mapping {
            match actions::resolve(action_name, name_to_number, chords, custom_actions)? {
                Some(action) => {
                    debug!("Bound input '{}' to {:?}", input_id, action);
                    bindings.insert(input_id.to_lowercase(), action);
                }
                None => {
                    warn!(
                        "No note, chord or custom action named '{}'; dropping binding for '{}'",
                        action_name, input_id
                    );
                }
            }
        }
        Ok(BindingTable { bindings })
    }

    /// Case-insensitive lookup by raw input identifier
    pub fn lookup(&self, input_id: &str) -> Option<&Action> {
        self.bindings.get(&input_id.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
