pub mod actions;
pub mod bindings;
pub mod cli;
pub mod event_loop;
pub mod input;
pub mod logging;
pub mod midi;
pub mod notes;

pub use cli::{validate_device, Args};

#[cfg(not(feature = "test-mock"))]
pub fn handle_device_list() -> Vec<String> {
    midi::MidirEngine::list_devices()
}

#[cfg(feature = "test-mock")]
pub fn handle_device_list() -> Vec<String> {
    midi::MockMidiEngine::list_devices()
}
