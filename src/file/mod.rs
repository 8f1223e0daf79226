#![doc = r#"
Rusty representation of a Standard MIDI File: the [`Sequence`]
"#]

/// Contains the [`SequenceBuilder`](builder::SequenceBuilder) and the
/// chunk types it consumes.
pub mod builder;

mod format;
pub use format::*;

mod header;
pub use header::*;

mod track;
pub use track::*;

pub mod timing;

mod writer;
pub use writer::*;

mod display;

use crate::{
    EncodeError, TimingError,
    assemble::{self, AssembleError, AssembleOptions, ExtractedNote, NoteSpec},
    cancel::{Cancel, NeverCancel},
    event::Event,
    reader::{ReadResult, Reader},
};
use alloc::vec::Vec;
use builder::{SequenceBuilder, chunk::ChunkEvent};

/// How the ticks of a sequence's events are to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimingMode {
    /// Each tick is a position from the start of the track
    #[default]
    Absolute,
    /// Each tick is the gap since the previous event in the same track
    Delta,
}

/// Settings for [`Sequence::encode_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncodeOptions {
    /// How notes are turned into tracks
    pub assemble: AssembleOptions,
    /// How tracks are turned into bytes
    pub write: WriteOptions,
}

#[doc = r#"
A decoded or assembled MIDI file.

Every track shares the sequence's tick rate. Operations never mutate a
sequence; conversions and splits return new values.

# Example
```rust
# use smfcodec::prelude::*;
let note = NoteSpec::new(0, 0, 0, 480, 60, 100);
let bytes = Sequence::encode(&[note], 480).unwrap();

let sequence = Sequence::decode(&bytes).unwrap();
assert_eq!(sequence.ticks_per_quarter_note(), 480);
assert_eq!(sequence.tracks().len(), 1);

let notes = sequence.notes().unwrap();
assert_eq!(notes[0].note, note);
```
"#]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence {
    ticks_per_quarter_note: u16,
    tracks: Vec<Track>,
    timing_mode: TimingMode,
}

impl Sequence {
    /// Create a sequence from its parts
    pub const fn new(
        ticks_per_quarter_note: u16,
        tracks: Vec<Track>,
        timing_mode: TimingMode,
    ) -> Self {
        Self {
            ticks_per_quarter_note,
            tracks,
            timing_mode,
        }
    }

    /// Parse a set of bytes into a sequence with absolute ticks
    pub fn decode(bytes: &[u8]) -> ReadResult<Self> {
        let mut reader = Reader::from_byte_slice(bytes);
        let mut builder = SequenceBuilder::default();

        let header = reader.read_header()?;
        builder.handle_chunk(ChunkEvent::Header(header), 0)?;

        loop {
            let position = reader.buffer_position();
            let Some(chunk) = reader.read_chunk()? else {
                break;
            };
            builder.handle_chunk(chunk, position)?;
        }

        builder.build(reader.buffer_position())
    }

    /// Parse only the header chunk
    pub fn decode_header(bytes: &[u8]) -> ReadResult<Header> {
        Reader::from_byte_slice(bytes).read_header()?.into_header(0)
    }

    /// [`decode`](Self::decode), then [`split`](Self::split) by channel
    pub fn decode_and_split(bytes: &[u8]) -> ReadResult<Self> {
        let decoded = Self::decode(bytes)?;
        Ok(assemble::split_absolute(&decoded))
    }

    /// Assembles notes into a sequence, one track per `(channel, program)`
    pub fn from_notes(
        notes: &[NoteSpec],
        ticks_per_quarter_note: u16,
    ) -> Result<Self, AssembleError> {
        assemble::assemble(
            notes,
            ticks_per_quarter_note,
            &AssembleOptions::default(),
            &NeverCancel,
        )
    }

    /// Assembles notes and serializes the result
    pub fn encode(notes: &[NoteSpec], ticks_per_quarter_note: u16) -> Result<Vec<u8>, EncodeError> {
        Self::encode_with(notes, ticks_per_quarter_note, &EncodeOptions::default(), &NeverCancel)
    }

    /// Assembles notes and serializes the result, checking `cancel` while
    /// notes are processed
    pub fn encode_with<C: Cancel + ?Sized>(
        notes: &[NoteSpec],
        ticks_per_quarter_note: u16,
        options: &EncodeOptions,
        cancel: &C,
    ) -> Result<Vec<u8>, EncodeError> {
        let sequence =
            assemble::assemble(notes, ticks_per_quarter_note, &options.assemble, cancel)?;
        Ok(sequence.to_bytes_with(&options.write)?)
    }

    /// Ticks per quarter note, shared by every track
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        self.ticks_per_quarter_note
    }

    /// The tracks, in file order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Whether event ticks are absolute or deltas
    pub const fn timing_mode(&self) -> TimingMode {
        self.timing_mode
    }

    /// Returns the sequence with absolute ticks
    pub fn to_absolute(&self) -> Result<Self, TimingError> {
        if self.timing_mode == TimingMode::Absolute {
            return Ok(self.clone());
        }
        let tracks = self
            .tracks
            .iter()
            .enumerate()
            .map(|(track, t)| {
                let mut tick: u32 = 0;
                t.events()
                    .iter()
                    .enumerate()
                    .map(|(index, event)| {
                        tick = tick
                            .checked_add(event.tick)
                            .ok_or(TimingError::TickOverflow { track, index })?;
                        Ok::<_, TimingError>(Event::new(tick, event.kind.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Track::new)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(self.ticks_per_quarter_note, tracks, TimingMode::Absolute))
    }

    /// Returns the sequence with delta ticks
    pub fn to_delta(&self) -> Result<Self, TimingError> {
        if self.timing_mode == TimingMode::Delta {
            return Ok(self.clone());
        }
        let tracks = self
            .tracks
            .iter()
            .enumerate()
            .map(|(track, t)| {
                let mut previous: u32 = 0;
                t.events()
                    .iter()
                    .enumerate()
                    .map(|(index, event)| {
                        let delta = event
                            .tick
                            .checked_sub(previous)
                            .ok_or(TimingError::UnorderedEvents { track, index })?;
                        previous = event.tick;
                        Ok::<_, TimingError>(Event::new(delta, event.kind.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()
                    .map(Track::new)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(self.ticks_per_quarter_note, tracks, TimingMode::Delta))
    }

    /// Regroups every event into one track per channel.
    ///
    /// Channel-less events (meta, sysex) go to a leading track. Splitting an
    /// already split sequence returns it unchanged.
    pub fn split(&self) -> Result<Self, TimingError> {
        Ok(assemble::split_absolute(&self.to_absolute()?))
    }

    /// Pairs note-on and note-off events back into notes
    pub fn notes(&self) -> Result<Vec<ExtractedNote>, TimingError> {
        Ok(assemble::extract_notes(&self.to_absolute()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use pretty_assertions::assert_eq;

    fn absolute() -> Sequence {
        Sequence::new(
            96,
            vec![
                Track::new(vec![
                    Event::note_on(10, 0, 60, 1),
                    Event::note_off(20, 0, 60, 1),
                    Event::end_of_track(20),
                ]),
                Track::new(vec![Event::note_on(5, 1, 61, 1), Event::end_of_track(40)]),
            ],
            TimingMode::Absolute,
        )
    }

    #[test]
    fn test_to_delta() {
        let delta = absolute().to_delta().unwrap();
        assert_eq!(delta.timing_mode(), TimingMode::Delta);
        let ticks: Vec<Vec<u32>> = delta
            .tracks()
            .iter()
            .map(|t| t.events().iter().map(|e| e.tick).collect())
            .collect();
        assert_eq!(ticks, vec![vec![10, 10, 0], vec![5, 35]]);
    }

    #[test]
    fn test_delta_round_trip() {
        let seq = absolute();
        assert_eq!(seq.to_delta().unwrap().to_absolute().unwrap(), seq);
        assert_eq!(seq.to_absolute().unwrap(), seq);
    }

    #[test]
    fn test_to_delta_unordered() {
        let seq = Sequence::new(
            96,
            vec![Track::new(vec![Event::note_on(10, 0, 60, 1), Event::note_on(5, 0, 60, 1)])],
            TimingMode::Absolute,
        );
        assert_eq!(
            seq.to_delta(),
            Err(TimingError::UnorderedEvents { track: 0, index: 1 })
        );
    }

    #[test]
    fn test_to_absolute_overflow() {
        let seq = Sequence::new(
            96,
            vec![Track::new(vec![Event::note_on(u32::MAX, 0, 60, 1), Event::note_on(1, 0, 60, 1)])],
            TimingMode::Delta,
        );
        assert_eq!(
            seq.to_absolute(),
            Err(TimingError::TickOverflow { track: 0, index: 1 })
        );
    }

    #[test]
    fn test_decode_header() {
        let header = Sequence::decode_header(b"MThd\0\0\0\x06\0\x01\0\x03\x00\x60").unwrap();
        assert_eq!(header.format(), FormatType::Simultaneous);
        assert_eq!(header.track_count(), 3);
        assert_eq!(header.ticks_per_quarter_note(), 96);
    }
}
