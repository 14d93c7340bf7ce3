use clap::Parser;
use log::{info, warn};
use padmaprs::{
    actions::CustomAction,
    bindings::{load_raw_mapping, BindingTable},
    cli::{validate_device, Args},
    event_loop::EventLoop,
    handle_device_list,
    input::{DefaultInputSource, InputSource},
    midi::{DefaultMidiEngine, MidiEngine, MidiMessage},
    notes::{build_note_tables, NoteDefinitions},
};
use std::collections::HashMap;
use std::process;

fn main() {
    initialize_logging();
    let args = Args::parse();

    if args.device_list {
        list_available_devices(&handle_device_list());
        return;
    }

    let definitions = load_definitions(&args);
    let (_number_to_name, name_to_number) =
        match build_note_tables(&definitions.solfeggio_names, true) {
            Ok(tables) => tables,
            Err(e) => fatal(&format!("Invalid note definitions: {}", e)),
        };

    let custom_actions = builtin_custom_actions();
    let bindings = build_bindings(&args, &name_to_number, &definitions.chords, &custom_actions);
    let sinks = open_sinks(&args);
    let mut source = open_input_source();

    let mut event_loop = EventLoop::new(bindings, sinks);
    if let Err(e) = event_loop.run(&mut source) {
        fatal(&format!("Dispatch loop terminated: {}", e));
    }
}

fn initialize_logging() {
    padmaprs::logging::init_logger().expect("Logger initialization failed");
    info!("Application starting");
}

fn list_available_devices(devices: &[String]) {
    println!("Available MIDI output devices:");
    for device in devices {
        println!("  - {}", device);
    }
}

fn load_definitions(args: &Args) -> NoteDefinitions {
    match NoteDefinitions::load(&args.notes) {
        Ok(definitions) => {
            info!(
                "Loaded {} note names and {} chords from {}",
                definitions.solfeggio_names.len(),
                definitions.chords.len(),
                args.notes.display()
            );
            definitions
        }
        Err(e) => fatal(&format!("Failed to load note definitions: {}", e)),
    }
}

/// Custom actions registered by this binary. Hosting code embedding the
/// library can pass its own registry instead.
fn builtin_custom_actions() -> HashMap<String, CustomAction> {
    let mut custom_actions = HashMap::new();
    custom_actions.insert(
        "panic".to_string(),
        CustomAction::new().on_press(|sinks: &mut [Box<dyn MidiEngine>]| {
            for sink in sinks.iter_mut() {
                sink.send(MidiMessage::AllNotesOff {
                    channel: padmaprs::actions::DEFAULT_CHANNEL,
                })?;
            }
            Ok(())
        }),
    );
    custom_actions
}

fn build_bindings(
    args: &Args,
    name_to_number: &HashMap<String, u8>,
    chords: &HashMap<String, Vec<String>>,
    custom_actions: &HashMap<String, CustomAction>,
) -> BindingTable {
    let raw_mapping = match load_raw_mapping(&args.mapping) {
        Ok(raw) => raw,
        Err(e) => fatal(&format!(
            "Failed to read binding file {}: {}",
            args.mapping.display(),
            e
        )),
    };

    match BindingTable::build(&raw_mapping, name_to_number, chords, custom_actions) {
        Ok(bindings) => {
            info!(
                "Bound {} of {} configured inputs",
                bindings.len(),
                raw_mapping.len()
            );
            bindings
        }
        Err(e) => fatal(&format!("Failed to build binding table: {}", e)),
    }
}

fn open_sinks(args: &Args) -> Vec<Box<dyn MidiEngine>> {
    if args.midi_outputs.is_empty() {
        warn!("No MIDI outputs configured; events will be consumed without emitting anything");
    }

    let devices = handle_device_list();
    let mut sinks: Vec<Box<dyn MidiEngine>> = Vec::new();
    for device_name in &args.midi_outputs {
        if let Err(error_msg) = validate_device(device_name, &devices) {
            fatal(&error_msg);
        }
        match DefaultMidiEngine::new(device_name) {
            Ok(engine) => {
                info!("Successfully connected to MIDI device: {}", device_name);
                println!("Successfully connected to MIDI device: {}", device_name);
                sinks.push(Box::new(engine));
            }
            Err(e) => fatal(&format!(
                "Error connecting to MIDI device {}: {}",
                device_name, e
            )),
        }
    }
    sinks
}

fn open_input_source() -> impl InputSource {
    match DefaultInputSource::new() {
        Ok(source) => source,
        Err(e) => fatal(&format!("Failed to open gamepad input: {}", e)),
    }
}

fn fatal(error_msg: &str) -> ! {
    log::error!("{}", error_msg);
    eprintln!("{}", error_msg);
    process::exit(1);
}
