//! MIDI output for padmaprs
//!
//! This module provides the outbound half of MIDI communication:
//! - Core MIDI message types and error handling
//! - Real MIDI device output via midir
//! - A recording mock implementation for testing
//!
//! The main components are:
//! - [`MidiEngine`] trait for sending MIDI messages to one sink
//! - [`MidirEngine`] for real MIDI device output
//! - [`MockMidiEngine`] for testing
//!
mod engine;
pub mod midir_engine;
pub mod mock_engine;

// Re-export main types from engine
pub use engine::{MidiEngine, MidiError, MidiMessage, Result};

// Re-export concrete implementations
pub use midir_engine::MidirEngine;
pub use mock_engine::MockMidiEngine;

// Set default engine type
pub type DefaultMidiEngine = MidirEngine;
