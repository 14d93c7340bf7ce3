use crate::midi::{MidiEngine, MidiError, MidiMessage, Result};
use log::{debug, info};
use midir::{MidiOutput, MidiOutputConnection};

/// Output sink backed by a real midir port
pub struct MidirEngine {
    output: MidiOutputConnection,
    port_name: String,
}

impl MidirEngine {
    /// Connects to the first output port whose name contains `device_name`.
    /// Port names are backend-formatted (client:port), hence the substring
    /// match rather than an exact comparison.
    pub fn new(device_name: &str) -> Result<Self> {
        let midi_out = MidiOutput::new("padmaprs-out")?;

        let out_ports = midi_out.ports();
        let out_port = out_ports
            .iter()
            .find(|p| {
                midi_out
                    .port_name(p)
                    .unwrap_or_default()
                    .contains(device_name)
            })
            .ok_or_else(|| {
                MidiError::ConnectionError(format!(
                    "MIDI output device '{}' not found",
                    device_name
                ))
            })?;

        let port_name = midi_out.port_name(out_port)?;
        info!("Connecting to MIDI output port: {}", port_name);
        let output = midi_out.connect(out_port, "padmaprs-output")?;
        Ok(MidirEngine { output, port_name })
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Lists the names of all available MIDI output ports
    pub fn list_devices() -> Vec<String> {
        let mut devices = Vec::new();

        if let Ok(midi_out) = MidiOutput::new("padmaprs-list") {
            for port in midi_out.ports() {
                if let Ok(name) = midi_out.port_name(&port) {
                    devices.push(name);
                }
            }
        }

        devices
    }

    fn message_to_bytes(msg: &MidiMessage) -> [u8; 3] {
        match msg {
            MidiMessage::NoteOn {
                channel,
                note,
                velocity,
            } => [0x90 | (channel & 0x0F), *note, *velocity],
            MidiMessage::NoteOff { channel, note } => [0x80 | (channel & 0x0F), *note, 0],
            MidiMessage::AllNotesOff { channel } => [0xB0 | (channel & 0x0F), 123, 0],
        }
    }
}

impl MidiEngine for MidirEngine {
    fn send(&mut self, msg: MidiMessage) -> Result<()> {
        let bytes = Self::message_to_bytes(&msg);
        debug!("Sending {:?} to {}", msg, self.port_name);
        self.output.send(&bytes)?;
        Ok(())
    }
}
