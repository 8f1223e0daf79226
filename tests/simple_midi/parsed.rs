use pretty_assertions::assert_eq;
use smfcodec::prelude::*;

use crate::SIMPLE;

#[test]
fn test_parse() {
    let parsed = Sequence::decode(SIMPLE).unwrap();

    assert_eq!(parsed.ticks_per_quarter_note(), 96);
    assert_eq!(parsed.timing_mode(), TimingMode::Absolute);
    assert_eq!(parsed.tracks().len(), 1);

    let track = &parsed.tracks()[0];
    assert_eq!(track.len(), 14);

    let mut events = track.events().iter().skip(5);

    note_on(events.next().unwrap(), 0, 2, 48, 96);
    note_on(events.next().unwrap(), 0, 2, 60, 96);
    note_on(events.next().unwrap(), 96, 1, 67, 64);
    note_on(events.next().unwrap(), 192, 0, 76, 32);
    note_off(events.next().unwrap(), 384, 2, 48);
    note_off(events.next().unwrap(), 384, 2, 60);
    note_off(events.next().unwrap(), 384, 1, 67);
    note_off(events.next().unwrap(), 384, 0, 76);

    let last = events.next().unwrap();
    assert!(last.is_end_of_track());
    assert_eq!(last.tick, 384);
    assert!(events.next().is_none());
}

#[test]
fn test_header() {
    let header = Sequence::decode_header(SIMPLE).unwrap();
    assert_eq!(header.format(), FormatType::SingleMultiChannel);
    assert_eq!(header.track_count(), 1);
    assert_eq!(header.ticks_per_quarter_note(), 96);
}

#[test]
fn test_notes() {
    let notes: Vec<NoteSpec> = Sequence::decode(SIMPLE)
        .unwrap()
        .notes()
        .unwrap()
        .into_iter()
        .map(|n| {
            assert!(!n.synthesized_off);
            n.note
        })
        .collect();

    assert_eq!(
        notes,
        vec![
            NoteSpec::new(70, 2, 0, 384, 48, 96),
            NoteSpec::new(70, 2, 0, 384, 60, 96),
            NoteSpec::new(46, 1, 96, 384, 67, 64),
            NoteSpec::new(5, 0, 192, 384, 76, 32),
        ]
    );
}

#[test]
fn test_split() {
    let split = Sequence::decode_and_split(SIMPLE).unwrap();
    let tracks = split.tracks();
    assert_eq!(tracks.len(), 4);

    // the conductor keeps the time signature and the tempo
    assert_eq!(tracks[0].len(), 3);
    assert_eq!(tracks[0].events()[1], Event::meta(0, 0x51, vec![0x07, 0xA1, 0x20]));

    let channels: Vec<Option<u8>> = tracks[1..].iter().map(|t| t.events()[0].channel()).collect();
    assert_eq!(channels, vec![Some(0), Some(1), Some(2)]);

    for track in tracks {
        let last = track.events().last().unwrap();
        assert!(last.is_end_of_track());
        assert_eq!(last.tick, 384);
    }
}

#[test]
fn test_rewrite() {
    let parsed = Sequence::decode(SIMPLE).unwrap();
    assert_eq!(parsed.to_bytes().unwrap(), SIMPLE);
    assert_eq!(Sequence::decode(&parsed.to_bytes().unwrap()).unwrap(), parsed);
}

fn note_on(e: &Event, ticks: u32, channel: u8, key: u8, velocity: u8) {
    assert_eq!(e.tick, ticks);
    assert_eq!(
        e.kind,
        EventKind::NoteOn {
            channel,
            key,
            velocity
        }
    );
}

fn note_off(e: &Event, ticks: u32, channel: u8, key: u8) {
    assert_eq!(e.tick, ticks);
    match e.kind {
        EventKind::NoteOn {
            channel: c,
            key: k,
            velocity,
        } => {
            assert_eq!(velocity, 0);
            assert_eq!((c, k), (channel, key));
        }
        EventKind::NoteOff {
            channel: c,
            key: k,
            velocity: _,
        } => {
            assert_eq!((c, k), (channel, key));
        }
        _ => panic!("expected a note-off, found {:?}", e.kind),
    }
}
