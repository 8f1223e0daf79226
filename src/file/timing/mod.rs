//! Decoding the division word of the header chunk

mod smpte;
pub use smpte::*;

use crate::HeaderError;

/// The header timing type.
///
/// This is either the number of ticks per quarter note or
/// the alternative SMPTE format. Only the former can be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    /// The midi file's delta times are defined using a tick rate per quarter note
    TicksPerQuarterNote(u16),

    /// The midi file's delta times are defined using an SMPTE and MIDI Time Code
    Smpte {
        /// Frame rate, if the high byte holds a legal one
        fps: Option<SmpteFps>,
        /// Ticks per frame
        ticks_per_frame: u8,
    },
}

impl Timing {
    /// Interprets the division word of a header chunk
    pub const fn from_be_bytes(bytes: [u8; 2]) -> Self {
        match bytes[0] >> 7 {
            0 => Self::TicksPerQuarterNote(u16::from_be_bytes(bytes) & 0x7FFF),
            _ => Self::Smpte {
                fps: SmpteFps::from_header_byte(bytes[0]),
                ticks_per_frame: bytes[1],
            },
        }
    }

    /// Returns Some if the midi timing is defined
    /// as ticks per quarter note
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(t) => Some(*t),
            _ => None,
        }
    }

    /// Checks the timing can be decoded and returns the tick rate.
    pub const fn require_ticks_per_quarter_note(&self) -> Result<u16, HeaderError> {
        match *self {
            Self::TicksPerQuarterNote(0) => Err(HeaderError::InvalidTicksPerQuarterNote),
            Self::TicksPerQuarterNote(t) => Ok(t),
            Self::Smpte {
                fps,
                ticks_per_frame,
            } => Err(HeaderError::UnsupportedTimingFormat {
                fps,
                ticks_per_frame,
            }),
        }
    }
}
