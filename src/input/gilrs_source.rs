use crate::input::{InputError, InputEvent, InputSource, Result};
use gilrs::{Button, Event, EventType, Gilrs};
use log::{debug, info, warn};

/// Gamepad source backed by gilrs, read in blocking mode.
///
/// Button events are reported under evdev-style codes (`BTN_SOUTH`,
/// `BTN_TL`, ...) so binding files keyed on kernel button names keep
/// working. Axis movement is ignored; only button transitions become
/// events.
pub struct GilrsSource {
    gilrs: Gilrs,
}

impl GilrsSource {
    pub fn new() -> Result<Self> {
        let gilrs = Gilrs::new().map_err(|e| InputError::Device(e.to_string()))?;
        for (_id, gamepad) in gilrs.gamepads() {
            info!("Found gamepad: {}", gamepad.name());
        }
        Ok(GilrsSource { gilrs })
    }
}

/// Map a gilrs button position to the evdev-style code the kernel reports
/// for it. Unknown buttons map to `None` and are dropped.
fn button_code(button: Button) -> Option<&'static str> {
    match button {
        // Face buttons
        Button::South => Some("BTN_SOUTH"),
        Button::East => Some("BTN_EAST"),
        Button::North => Some("BTN_NORTH"),
        Button::West => Some("BTN_WEST"),

        // Shoulder buttons and triggers
        Button::LeftTrigger => Some("BTN_TL"),
        Button::RightTrigger => Some("BTN_TR"),
        Button::LeftTrigger2 => Some("BTN_TL2"),
        Button::RightTrigger2 => Some("BTN_TR2"),

        // Menu buttons
        Button::Select => Some("BTN_SELECT"),
        Button::Start => Some("BTN_START"),
        Button::Mode => Some("BTN_MODE"),

        // Stick clicks
        Button::LeftThumb => Some("BTN_THUMBL"),
        Button::RightThumb => Some("BTN_THUMBR"),

        // D-Pad
        Button::DPadUp => Some("BTN_DPAD_UP"),
        Button::DPadDown => Some("BTN_DPAD_DOWN"),
        Button::DPadLeft => Some("BTN_DPAD_LEFT"),
        Button::DPadRight => Some("BTN_DPAD_RIGHT"),

        Button::C => Some("BTN_C"),
        Button::Z => Some("BTN_Z"),

        _ => {
            warn!("Unknown gilrs button: {:?}", button);
            None
        }
    }
}

impl InputSource for GilrsSource {
    fn read(&mut self) -> Result<Vec<InputEvent>> {
        loop {
            let Event { id, event, .. } = match self.gilrs.next_event_blocking(None) {
                Some(event) => event,
                None => continue,
            };

            match event {
                EventType::ButtonPressed(button, _) => {
                    if let Some(code) = button_code(button) {
                        return Ok(vec![InputEvent::new(code, 1)]);
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(code) = button_code(button) {
                        return Ok(vec![InputEvent::new(code, 0)]);
                    }
                }
                EventType::Connected => info!("Gamepad {} connected", id),
                EventType::Disconnected => warn!("Gamepad {} disconnected", id),
                other => debug!("Ignoring gamepad event {:?}", other),
            }
        }
    }
}
