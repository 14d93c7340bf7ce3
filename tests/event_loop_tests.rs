use padmaprs::actions::CustomAction;
use padmaprs::bindings::BindingTable;
use padmaprs::event_loop::EventLoop;
use padmaprs::input::{InputEvent, MockInputSource};
use padmaprs::midi::{MidiEngine, MidiMessage, MockMidiEngine};
use padmaprs::notes::build_note_tables;
use std::collections::HashMap;

fn solfeggio_names() -> Vec<String> {
    [
        "Do", "Do#", "Re", "Re#", "Mi", "Fa", "Fa#", "Sol", "Sol#", "La", "La#", "Si",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn chords() -> HashMap<String, Vec<String>> {
    let mut chords = HashMap::new();
    chords.insert(
        "Cmaj".to_string(),
        vec!["Do0".to_string(), "Mi0".to_string(), "Sol0".to_string()],
    );
    chords
}

/// Builds a dispatch loop over the given raw mapping and two recording
/// sinks, returning the loop plus handles onto the sinks' message logs.
fn build_loop(
    raw: &HashMap<String, String>,
    custom_actions: &HashMap<String, CustomAction>,
) -> (EventLoop, MockMidiEngine, MockMidiEngine) {
    let (_, name_to_number) = build_note_tables(&solfeggio_names(), true).unwrap();
    let bindings =
        BindingTable::build(raw, &name_to_number, &chords(), custom_actions).unwrap();

    let sink_a = MockMidiEngine::new();
    let sink_b = MockMidiEngine::new();
    let sinks: Vec<Box<dyn MidiEngine>> = vec![Box::new(sink_a.clone()), Box::new(sink_b.clone())];
    (EventLoop::new(bindings, sinks), sink_a, sink_b)
}

fn raw_mapping(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_single_note_press_and_release_reach_every_sink() {
    let raw = raw_mapping(&[("btn_south", "Do4")]);
    let (mut event_loop, sink_a, sink_b) = build_loop(&raw, &HashMap::new());

    let mut source = MockInputSource::from_events(vec![
        InputEvent::new("btn_south", 1),
        InputEvent::new("btn_south", 0),
    ]);
    event_loop.run(&mut source).expect("loop should stop cleanly");

    let expected = vec![
        MidiMessage::NoteOn {
            channel: 0,
            note: 60,
            velocity: 80,
        },
        MidiMessage::NoteOff {
            channel: 0,
            note: 60,
        },
    ];
    assert_eq!(sink_a.sent_messages(), expected);
    assert_eq!(sink_b.sent_messages(), expected);
}

#[test]
fn test_chord_fans_out_in_member_order() {
    let raw = raw_mapping(&[("btn_x", "Cmaj")]);
    let (mut event_loop, sink_a, sink_b) = build_loop(&raw, &HashMap::new());

    let mut source = MockInputSource::from_events(vec![
        InputEvent::new("btn_x", 1),
        InputEvent::new("btn_x", 0),
    ]);
    event_loop.run(&mut source).expect("loop should stop cleanly");

    // 3 members x 2 sinks per edge; each sink sees members in chord order
    let on = |note| MidiMessage::NoteOn {
        channel: 0,
        note,
        velocity: 80,
    };
    let off = |note| MidiMessage::NoteOff { channel: 0, note };
    let expected = vec![on(12), on(16), on(19), off(12), off(16), off(19)];
    assert_eq!(sink_a.sent_messages(), expected);
    assert_eq!(sink_b.sent_messages(), expected);
    assert_eq!(
        sink_a.sent_messages().len() + sink_b.sent_messages().len(),
        12,
        "3 notes x 2 sinks per edge, 2 edges"
    );
}

#[test]
fn test_custom_action_missing_edge_is_absorbed() {
    let mut custom_actions = HashMap::new();
    custom_actions.insert(
        "panic".to_string(),
        CustomAction::new().on_press(|sinks: &mut [Box<dyn MidiEngine>]| {
            for sink in sinks.iter_mut() {
                sink.send(MidiMessage::AllNotesOff { channel: 0 })?;
            }
            Ok(())
        }),
    );
    let raw = raw_mapping(&[("btn_select", "panic")]);
    let (mut event_loop, sink_a, sink_b) = build_loop(&raw, &custom_actions);

    // Release first: no released handler, nothing may be emitted
    let mut source = MockInputSource::from_events(vec![InputEvent::new("btn_select", 0)]);
    event_loop.run(&mut source).unwrap();
    assert!(sink_a.sent_messages().is_empty());
    assert!(sink_b.sent_messages().is_empty());

    // Press fires the handler once, against every sink
    let mut source = MockInputSource::from_events(vec![InputEvent::new("btn_select", 1)]);
    event_loop.run(&mut source).unwrap();
    assert_eq!(
        sink_a.sent_messages(),
        vec![MidiMessage::AllNotesOff { channel: 0 }]
    );
    assert_eq!(
        sink_b.sent_messages(),
        vec![MidiMessage::AllNotesOff { channel: 0 }]
    );
}

#[test]
fn test_dispatch_is_case_insensitive() {
    let raw = raw_mapping(&[("BTN_A", "Do4")]);
    let (mut event_loop, sink_a, _sink_b) = build_loop(&raw, &HashMap::new());

    let mut source = MockInputSource::from_events(vec![InputEvent::new("btn_a", 1)]);
    event_loop.run(&mut source).unwrap();
    assert_eq!(
        sink_a.sent_messages(),
        vec![MidiMessage::NoteOn {
            channel: 0,
            note: 60,
            velocity: 80,
        }]
    );
}

#[test]
fn test_unbound_input_is_ignored() {
    let raw = raw_mapping(&[("btn_south", "Do4")]);
    let (mut event_loop, sink_a, sink_b) = build_loop(&raw, &HashMap::new());

    let mut source = MockInputSource::from_events(vec![
        InputEvent::new("btn_unmapped", 1),
        InputEvent::new("btn_unmapped", 0),
    ]);
    event_loop.run(&mut source).expect("unbound inputs must not error");
    assert!(sink_a.sent_messages().is_empty());
    assert!(sink_b.sent_messages().is_empty());
}

#[test]
fn test_duplicate_state_events_refire() {
    // No edge detection: a source that repeats a press re-fires the action
    let raw = raw_mapping(&[("btn_south", "Do4")]);
    let (mut event_loop, sink_a, _sink_b) = build_loop(&raw, &HashMap::new());

    let mut source = MockInputSource::from_events(vec![
        InputEvent::new("btn_south", 1),
        InputEvent::new("btn_south", 1),
    ]);
    event_loop.run(&mut source).unwrap();
    assert_eq!(sink_a.sent_messages().len(), 2, "one emission per event");
}

#[test]
fn test_batched_events_dispatch_in_order() {
    let raw = raw_mapping(&[("btn_south", "Do4"), ("btn_east", "Re4")]);
    let (mut event_loop, sink_a, _sink_b) = build_loop(&raw, &HashMap::new());

    let mut source = MockInputSource::new(vec![vec![
        InputEvent::new("btn_south", 1),
        InputEvent::new("btn_east", 1),
        InputEvent::new("btn_south", 0),
    ]]);
    event_loop.run(&mut source).unwrap();

    assert_eq!(
        sink_a.sent_messages(),
        vec![
            MidiMessage::NoteOn {
                channel: 0,
                note: 60,
                velocity: 80,
            },
            MidiMessage::NoteOn {
                channel: 0,
                note: 62,
                velocity: 80,
            },
            MidiMessage::NoteOff {
                channel: 0,
                note: 60,
            },
        ]
    );
}
