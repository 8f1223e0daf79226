#![doc = r#"
Conversions between flat note records and multi-track sequences.

[`assemble`] groups [`NoteSpec`]s into one track per `(channel, program)`,
[`extract_notes`] pairs note-on and note-off events back into notes, and
[`split_absolute`] regroups the events of a sequence by channel.
"#]

mod notes;
pub use notes::*;

mod split;
pub use split::*;

use alloc::{collections::BTreeMap, vec, vec::Vec};
use thiserror::Error;

use crate::{
    cancel::Cancel,
    event::Event,
    file::{Sequence, TimingMode, Track},
};

/// Highest legal channel
pub const MAX_CHANNEL: u8 = 15;
/// Highest legal key, velocity or program
pub const MAX_DATA: u8 = 127;

#[doc = r#"
One note of a performance, as handed to [`assemble`].

# Example
```rust
# use smfcodec::prelude::*;
// program 0, channel 9, middle C for one beat at 480 ticks per quarter note
let note = NoteSpec::new(0, 9, 0, 480, 60, 100);
assert!(note.validate(0).is_ok());

let backwards = NoteSpec::new(0, 9, 480, 0, 60, 100);
assert!(backwards.validate(3).is_err());
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteSpec {
    /// Instrument, 0-127
    pub program: u8,
    /// Channel, 0-15
    pub channel: u8,
    /// Absolute tick of the note-on
    pub tick_on: u32,
    /// Absolute tick of the note-off, never before `tick_on`
    pub tick_off: u32,
    /// Key, 0-127
    pub key: u8,
    /// Velocity, 0-127. Used for both the note-on and the note-off.
    ///
    /// A note-on with velocity 0 is a release to every MIDI reader, so a
    /// note of velocity 0 is written but never read back as a note.
    pub velocity: u8,
}

impl NoteSpec {
    /// Create a note
    pub const fn new(
        program: u8,
        channel: u8,
        tick_on: u32,
        tick_off: u32,
        key: u8,
        velocity: u8,
    ) -> Self {
        Self {
            program,
            channel,
            tick_on,
            tick_off,
            key,
            velocity,
        }
    }

    /// Checks every field, reporting `index` as the note's position in its input.
    pub fn validate(&self, index: usize) -> Result<(), AssembleError> {
        if self.channel > MAX_CHANNEL {
            return Err(AssembleError::ChannelOutOfRange {
                index,
                value: self.channel.into(),
            });
        }
        if self.key > MAX_DATA {
            return Err(AssembleError::KeyOutOfRange {
                index,
                value: self.key.into(),
            });
        }
        if self.velocity > MAX_DATA {
            return Err(AssembleError::VelocityOutOfRange {
                index,
                value: self.velocity.into(),
            });
        }
        if self.program > MAX_DATA {
            return Err(AssembleError::ProgramOutOfRange {
                index,
                value: self.program.into(),
            });
        }
        if self.tick_off < self.tick_on {
            return Err(AssembleError::NegativeDuration {
                index,
                tick_on: self.tick_on,
                tick_off: self.tick_off,
            });
        }
        Ok(())
    }
}

/// Settings for [`assemble`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssembleOptions {
    /// The cancellation token is polled once every this many notes.
    /// Zero polls on every note.
    pub cancel_check_interval: usize,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            cancel_check_interval: 100,
        }
    }
}

/// Errors returned by [`assemble`]
///
/// Out of range values are reported as `i32` so callers holding wider
/// integers can report their own values through the same variants.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssembleError {
    /// There were no notes to assemble
    #[error("No notes to assemble")]
    EmptyInput,
    /// Channels are 0-15
    #[error("Note {index}: channel {value} is out of range")]
    ChannelOutOfRange {
        /// Position of the note
        index: usize,
        /// The rejected value
        value: i32,
    },
    /// Keys are 0-127
    #[error("Note {index}: key {value} is out of range")]
    KeyOutOfRange {
        /// Position of the note
        index: usize,
        /// The rejected value
        value: i32,
    },
    /// Velocities are 0-127
    #[error("Note {index}: velocity {value} is out of range")]
    VelocityOutOfRange {
        /// Position of the note
        index: usize,
        /// The rejected value
        value: i32,
    },
    /// Programs are 0-127
    #[error("Note {index}: program {value} is out of range")]
    ProgramOutOfRange {
        /// Position of the note
        index: usize,
        /// The rejected value
        value: i32,
    },
    /// The note ends before it starts
    #[error("Note {index}: off tick {tick_off} is before on tick {tick_on}")]
    NegativeDuration {
        /// Position of the note
        index: usize,
        /// Start tick
        tick_on: u32,
        /// End tick
        tick_off: u32,
    },
    /// The cancellation token fired
    #[error("Cancelled after {processed} notes")]
    Cancelled {
        /// Notes handled before the token was seen
        processed: usize,
    },
}

impl AssembleError {
    /// True if this is [`AssembleError::Cancelled`]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Groups notes into one track per `(channel, program)` pair.
///
/// Tracks appear in the order their pair is first seen. Each one opens with a
/// program change at tick 0, followed by a note-on and a note-off per note,
/// stably sorted by tick. Every note is validated before any track is built.
///
/// Notes of velocity 0 are kept, with a warning: their note-on doubles as a
/// release, so [`extract_notes`] will not find them.
pub fn assemble<C: Cancel + ?Sized>(
    notes: &[NoteSpec],
    ticks_per_quarter_note: u16,
    options: &AssembleOptions,
    cancel: &C,
) -> Result<Sequence, AssembleError> {
    if notes.is_empty() {
        return Err(AssembleError::EmptyInput);
    }
    for (index, note) in notes.iter().enumerate() {
        note.validate(index)?;
    }

    let interval = options.cancel_check_interval.max(1);
    let mut groups: BTreeMap<(u8, u8), usize> = BTreeMap::new();
    let mut tracks: Vec<Vec<Event>> = Vec::new();

    for (i, note) in notes.iter().enumerate() {
        if i % interval == 0 && cancel.is_cancelled() {
            return Err(AssembleError::Cancelled { processed: i });
        }
        #[cfg(feature = "tracing")]
        if note.velocity == 0 {
            tracing::warn!(
                index = i,
                channel = note.channel,
                key = note.key,
                "velocity 0 note-on will read back as a release"
            );
        }
        let track = *groups.entry((note.channel, note.program)).or_insert_with(|| {
            tracks.push(vec![Event::program_change(0, note.channel, note.program)]);
            tracks.len() - 1
        });
        let events = &mut tracks[track];
        events.push(Event::note_on(note.tick_on, note.channel, note.key, note.velocity));
        events.push(Event::note_off(note.tick_off, note.channel, note.key, note.velocity));
    }

    let tracks = tracks
        .into_iter()
        .enumerate()
        .map(|(_index, mut events)| {
            events.sort_by_key(|event| event.tick);
            #[cfg(feature = "tracing")]
            tracing::trace!(track = _index, events = events.len(), "assembled track");
            Track::new(events)
        })
        .collect();

    Ok(Sequence::new(ticks_per_quarter_note, tracks, TimingMode::Absolute))
}
