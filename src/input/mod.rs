//! Gamepad input sources for padmaprs
//!
//! An input source delivers discrete button events, each carrying a stable
//! identifier and a state value. Sources are trusted to emit one event per
//! physical state change; the dispatch loop does no edge detection of its
//! own, so a source that repeats identical-state events makes the bound
//! action re-fire.
//!
//! The main components are:
//! - [`InputSource`] trait for blocking event reads
//! - [`GilrsSource`] for real gamepads via gilrs
//! - [`MockInputSource`] for testing
//!
pub mod gilrs_source;
pub mod mock_source;

pub use gilrs_source::GilrsSource;
pub use mock_source::MockInputSource;

use std::error::Error;
use std::fmt;

/// One discrete input event: a stable identifier plus a raw state value.
/// Any non-zero state counts as pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub code: String,
    pub state: i32,
}

impl InputEvent {
    pub fn new(code: impl Into<String>, state: i32) -> Self {
        InputEvent {
            code: code.into(),
            state,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.state != 0
    }
}

/// Custom error type for input-source operations
#[derive(Debug)]
pub enum InputError {
    /// Error while reading from the device
    Device(String),
    /// The source has no more events and will never produce any
    Disconnected,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Device(msg) => write!(f, "input device error: {}", msg),
            InputError::Disconnected => write!(f, "input source disconnected"),
        }
    }
}

impl Error for InputError {}

/// Result type for input-source operations
pub type Result<T> = std::result::Result<T, InputError>;

/// Trait defining the interface for input-event sources
pub trait InputSource {
    /// Blocks until at least one event is available and returns the batch.
    /// With no further events this blocks indefinitely; liveness depends on
    /// the device producing events or closing.
    fn read(&mut self) -> Result<Vec<InputEvent>>;
}

// Set default source type
pub type DefaultInputSource = GilrsSource;
