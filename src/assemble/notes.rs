use alloc::{
    collections::{BTreeMap, VecDeque},
    vec::Vec,
};

use super::NoteSpec;
use crate::{
    event::EventKind,
    file::{Sequence, Track},
};

/// A note recovered from a decoded sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractedNote {
    /// Index of the track the note was found in
    pub track: usize,
    /// The note
    pub note: NoteSpec,
    /// True if the track ended before the note was released, in which case
    /// `note.tick_off` is the last tick of the track.
    pub synthesized_off: bool,
}

/// Pairs note-ons with note-offs in every track of an absolute-timed sequence.
///
/// A note-off, or a note-on with velocity zero, releases the oldest held
/// note on the same channel and key. A note takes the program most recently
/// selected on its channel within its track, or 0. Output is ordered by
/// track, then by the position of the note-on.
pub fn extract_notes(sequence: &Sequence) -> Vec<ExtractedNote> {
    sequence
        .tracks()
        .iter()
        .enumerate()
        .flat_map(|(index, track)| NoteAccumulator::new(index).run(track))
        .collect()
}

struct NoteAccumulator {
    track: usize,
    notes: Vec<ExtractedNote>,
    /// Indices into `notes` of held notes, per `(channel, key)`
    held: BTreeMap<(u8, u8), VecDeque<usize>>,
    programs: [u8; 16],
}

impl NoteAccumulator {
    fn new(track: usize) -> Self {
        Self {
            track,
            notes: Vec::new(),
            held: BTreeMap::new(),
            programs: [0; 16],
        }
    }

    fn run(mut self, track: &Track) -> Vec<ExtractedNote> {
        for event in track.events() {
            match event.kind {
                EventKind::ProgramChange { channel, program } => {
                    self.programs[usize::from(channel & 0x0F)] = program;
                }
                EventKind::NoteOn {
                    channel,
                    key,
                    velocity,
                } if velocity > 0 => self.note_on(event.tick, channel, key, velocity),
                EventKind::NoteOn { channel, key, .. }
                | EventKind::NoteOff { channel, key, .. } => {
                    self.note_off(event.tick, channel, key)
                }
                _ => {}
            }
        }
        self.finish(track.end_tick())
    }

    fn note_on(&mut self, tick: u32, channel: u8, key: u8, velocity: u8) {
        let program = self.programs[usize::from(channel & 0x0F)];
        self.held
            .entry((channel, key))
            .or_default()
            .push_back(self.notes.len());
        self.notes.push(ExtractedNote {
            track: self.track,
            note: NoteSpec::new(program, channel, tick, tick, key, velocity),
            synthesized_off: true,
        });
    }

    fn note_off(&mut self, tick: u32, channel: u8, key: u8) {
        let Some(index) = self
            .held
            .get_mut(&(channel, key))
            .and_then(|queue| queue.pop_front())
        else {
            return;
        };
        let note = &mut self.notes[index];
        note.note.tick_off = tick;
        note.synthesized_off = false;
    }

    fn finish(mut self, end: u32) -> Vec<ExtractedNote> {
        for index in self.held.into_values().flatten() {
            let note = &mut self.notes[index];
            #[cfg(feature = "tracing")]
            tracing::warn!(
                track = self.track,
                channel = note.note.channel,
                key = note.note.key,
                tick_on = note.note.tick_on,
                "note still held at end of track"
            );
            note.note.tick_off = end;
        }
        self.notes
    }
}
