use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// List available MIDI output devices
    #[arg(long)]
    pub device_list: bool,

    /// MIDI output device to send to (may be given several times)
    #[arg(long = "midi-output", value_name = "DEVICE")]
    pub midi_outputs: Vec<String>,

    /// Path to the note and chord definition file
    #[arg(long, value_name = "FILE", default_value = "notes.json")]
    pub notes: PathBuf,

    /// Path to the gamepad binding file
    #[arg(long, value_name = "FILE", default_value = "input.ini")]
    pub mapping: PathBuf,
}

pub fn validate_device(device_name: &str, devices: &[String]) -> Result<(), String> {
    if !devices.iter().any(|d| d.contains(device_name)) {
        let mut error_msg = format!(
            "Error: MIDI output device '{}' not found in available devices:\n",
            device_name
        );
        for device in devices {
            error_msg.push_str(&format!("  - {}\n", device));
        }
        return Err(error_msg);
    }
    Ok(())
}
