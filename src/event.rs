#![doc = r#"
Track events

An [`Event`] is a tick paired with an [`EventKind`]. Whether the tick is an
absolute position or a gap since the previous event depends on the
[`TimingMode`](crate::file::TimingMode) of the sequence that owns it.

# Status bytes
```text
0x8n  Note Off          key, velocity
0x9n  Note On           key, velocity
0xAn  Poly Aftertouch   key, pressure
0xBn  Control Change    controller, value
0xCn  Program Change    program
0xDn  Channel Pressure  pressure
0xEn  Pitch Bend        lsb, msb
0xF0  SysEx             length, payload
0xF7  SysEx (escape)    length, payload
0xFF  Meta              type, length, payload
```
`n` is the channel, 0-15.
"#]

use alloc::vec::Vec;
use core::fmt;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Status byte opening a meta event
pub const META: u8 = 0xFF;
/// Status byte opening a sysex event
pub const SYSEX: u8 = 0xF0;
/// Status byte opening a sysex continuation or escape
pub const SYSEX_ESCAPE: u8 = 0xF7;
/// Meta type of the end-of-track event
pub const END_OF_TRACK: u8 = 0x2F;

/// The high nibble of a channel message status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum VoiceStatus {
    /// Release a key
    NoteOff = 0x8,
    /// Press a key
    NoteOn = 0x9,
    /// Per-key pressure
    PolyphonicAftertouch = 0xA,
    /// Controller value
    ControlChange = 0xB,
    /// Select an instrument
    ProgramChange = 0xC,
    /// Channel-wide pressure
    ChannelAftertouch = 0xD,
    /// Pitch wheel
    PitchBend = 0xE,
}

impl VoiceStatus {
    /// Splits a status byte into its kind and channel
    ///
    /// Returns `None` for data bytes and system statuses.
    pub fn from_status_byte(status: u8) -> Option<(Self, u8)> {
        Self::try_from(status >> 4)
            .ok()
            .map(|kind| (kind, status & 0x0F))
    }

    /// Joins the kind and a channel back into a status byte
    pub fn status_byte(self, channel: u8) -> u8 {
        (u8::from(self) << 4) | (channel & 0x0F)
    }

    /// Number of data bytes following the status
    pub const fn data_len(self) -> usize {
        match self {
            Self::ProgramChange | Self::ChannelAftertouch => 1,
            _ => 2,
        }
    }
}

/// What an [`Event`] does
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Press a key
    NoteOn {
        /// 0-15
        channel: u8,
        /// 0-127
        key: u8,
        /// 0-127. Zero is conventionally a release.
        velocity: u8,
    },
    /// Release a key
    NoteOff {
        /// 0-15
        channel: u8,
        /// 0-127
        key: u8,
        /// 0-127
        velocity: u8,
    },
    /// Select the instrument (timbre) of a channel
    ProgramChange {
        /// 0-15
        channel: u8,
        /// 0-127
        program: u8,
    },
    /// A meta event, kept as its type byte and payload
    Meta {
        /// The byte after `0xFF`
        meta_type: u8,
        /// Payload, without the length prefix
        data: Vec<u8>,
    },
    /// Any other channel message, or a sysex event
    ///
    /// For channel messages `data` holds the data bytes after the status.
    /// For sysex (`0xF0`/`0xF7`) it holds the payload without the length prefix.
    Other {
        /// Full status byte, channel included
        status: u8,
        /// Data bytes
        data: Vec<u8>,
    },
}

impl EventKind {
    /// The channel of a channel message
    pub fn channel(&self) -> Option<u8> {
        match self {
            Self::NoteOn { channel, .. }
            | Self::NoteOff { channel, .. }
            | Self::ProgramChange { channel, .. } => Some(*channel),
            Self::Other { status, .. } => VoiceStatus::from_status_byte(*status).map(|(_, c)| c),
            Self::Meta { .. } => None,
        }
    }

    /// True for the `FF 2F 00` event closing a track
    pub fn is_end_of_track(&self) -> bool {
        matches!(self, Self::Meta { meta_type: END_OF_TRACK, .. })
    }

    /// Short lowercase name, used in listings
    pub fn name(&self) -> &'static str {
        match self {
            Self::NoteOn { .. } => "note-on",
            Self::NoteOff { .. } => "note-off",
            Self::ProgramChange { .. } => "program-change",
            Self::Meta { meta_type, .. } if *meta_type == END_OF_TRACK => "end-of-track",
            Self::Meta { .. } => "meta",
            Self::Other { status, .. } if *status == SYSEX || *status == SYSEX_ESCAPE => "sysex",
            Self::Other { status, .. } => match VoiceStatus::from_status_byte(*status) {
                Some((VoiceStatus::PolyphonicAftertouch, _)) => "poly-aftertouch",
                Some((VoiceStatus::ControlChange, _)) => "control-change",
                Some((VoiceStatus::ChannelAftertouch, _)) => "channel-aftertouch",
                Some((VoiceStatus::PitchBend, _)) => "pitch-bend",
                _ => "other",
            },
        }
    }
}

/// A timed event within a track
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// Absolute tick or delta, depending on the owning sequence
    pub tick: u32,
    /// The event itself
    pub kind: EventKind,
}

impl Event {
    /// Create an event
    pub const fn new(tick: u32, kind: EventKind) -> Self {
        Self { tick, kind }
    }

    /// Create a note-on event
    pub const fn note_on(tick: u32, channel: u8, key: u8, velocity: u8) -> Self {
        Self::new(
            tick,
            EventKind::NoteOn {
                channel,
                key,
                velocity,
            },
        )
    }

    /// Create a note-off event
    pub const fn note_off(tick: u32, channel: u8, key: u8, velocity: u8) -> Self {
        Self::new(
            tick,
            EventKind::NoteOff {
                channel,
                key,
                velocity,
            },
        )
    }

    /// Create a program change event
    pub const fn program_change(tick: u32, channel: u8, program: u8) -> Self {
        Self::new(tick, EventKind::ProgramChange { channel, program })
    }

    /// Create a meta event
    pub const fn meta(tick: u32, meta_type: u8, data: Vec<u8>) -> Self {
        Self::new(tick, EventKind::Meta { meta_type, data })
    }

    /// Create the end-of-track meta event
    pub const fn end_of_track(tick: u32) -> Self {
        Self::meta(tick, END_OF_TRACK, Vec::new())
    }

    /// See [`EventKind::channel`]
    pub fn channel(&self) -> Option<u8> {
        self.kind.channel()
    }

    /// See [`EventKind::is_end_of_track`]
    pub fn is_end_of_track(&self) -> bool {
        self.kind.is_end_of_track()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self.channel() {
            Some(channel) => write!(f, "{name}\tch {channel}\t")?,
            None => write!(f, "{name}\t-\t")?,
        }
        match self {
            Self::NoteOn { key, velocity, .. } | Self::NoteOff { key, velocity, .. } => {
                write!(f, "key {key} vel {velocity}")
            }
            Self::ProgramChange { program, .. } => write!(f, "program {program}"),
            Self::Meta { meta_type, data } => {
                write!(f, "type {meta_type:#04x} ")?;
                write_bytes(f, data)
            }
            Self::Other { status, data } => {
                write!(f, "status {status:#04x} ")?;
                write_bytes(f, data)
            }
        }
    }
}

fn write_bytes(f: &mut fmt::Formatter<'_>, data: &[u8]) -> fmt::Result {
    f.write_str("[")?;
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{byte:02X}")?;
    }
    f.write_str("]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};

    #[test]
    fn test_get_event_status() {
        assert_eq!(
            VoiceStatus::from_status_byte(0b1000_0000),
            Some((VoiceStatus::NoteOff, 0))
        );
        assert_eq!(
            VoiceStatus::from_status_byte(0b1001_0001),
            Some((VoiceStatus::NoteOn, 1))
        );
        assert_eq!(VoiceStatus::from_status_byte(0xCF), Some((VoiceStatus::ProgramChange, 15)));
        assert_eq!(VoiceStatus::from_status_byte(0xF0), None);
        assert_eq!(VoiceStatus::from_status_byte(0x3C), None);
        assert_eq!(VoiceStatus::PitchBend.status_byte(9), 0xE9);
    }

    #[test]
    fn test_channel() {
        assert_eq!(Event::note_on(0, 3, 60, 100).channel(), Some(3));
        assert_eq!(Event::program_change(0, 15, 1).channel(), Some(15));
        assert_eq!(Event::end_of_track(0).channel(), None);
        let cc = Event::new(0, EventKind::Other { status: 0xB2, data: vec![7, 100] });
        assert_eq!(cc.channel(), Some(2));
        let sysex = Event::new(0, EventKind::Other { status: SYSEX, data: vec![0x7E, 0xF7] });
        assert_eq!(sysex.channel(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Event::note_on(0, 0, 60, 100).kind.to_string(),
            "note-on\tch 0\tkey 60 vel 100"
        );
        assert_eq!(
            Event::meta(0, 0x03, b"Hi".to_vec()).kind.to_string(),
            "meta\t-\ttype 0x03 [48 69]"
        );
        assert_eq!(
            Event::end_of_track(0).kind.to_string(),
            "end-of-track\t-\ttype 0x2f []"
        );
    }
}
