use crate::{file::timing::SmpteFps, vlq::VlqError};
use thiserror::Error;

#[doc = r#"
The set of format errors that can occur while decoding a Standard MIDI File.

These are wrapped in a [`ReaderError`](crate::reader::ReaderError), which
carries the byte offset the error was found at.
"#]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A delta-time or length field was not a valid variable length quantity
    #[error("{0}")]
    Vlq(#[from] VlqError),
    /// The `MThd` chunk was invalid
    #[error("Header: {0}")]
    Header(#[from] HeaderError),
    /// Chunk framing was invalid
    #[error("Chunk: {0}")]
    Chunk(#[from] ChunkError),
    /// The event stream of an `MTrk` chunk was invalid
    #[error("Track: {0}")]
    Track(#[from] TrackError),
}

/// Errors found in the header chunk
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    /// The file does not start with `MThd`
    #[error("Expected MThd, found {0:?}")]
    BadMagic([u8; 4]),
    /// The header chunk must be exactly 6 bytes long
    #[error("Header length must be 6, found {0}")]
    BadLength(u32),
    /// Only formats 0, 1 and 2 exist
    #[error("Invalid format {0}")]
    InvalidFormat(u16),
    /// The division word uses SMPTE frames rather than ticks per quarter note
    #[error("Unsupported SMPTE timing ({fps:?} fps, {ticks_per_frame} ticks per frame)")]
    UnsupportedTimingFormat {
        /// The frame rate, if it is one of the four legal ones
        fps: Option<SmpteFps>,
        /// The low byte of the division word
        ticks_per_frame: u8,
    },
    /// A tick rate of zero cannot time anything
    #[error("Ticks per quarter note must be non-zero")]
    InvalidTicksPerQuarterNote,
}

/// Errors in the chunk framing of a file
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// A chunk declares more bytes than remain in the buffer
    #[error("Chunk needs {needed} bytes but only {available} remain")]
    Truncated {
        /// Bytes the chunk (or chunk header) requires
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },
    /// More than one `MThd` chunk
    #[error("Found a second header chunk")]
    DuplicateHeader,
    /// No `MThd` chunk was handled before building
    #[error("No header chunk")]
    MissingHeader,
}

/// Errors in the event stream of a track chunk
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// A data byte appeared where a status byte was required
    #[error("Data byte without a running status")]
    NoRunningStatus,
    /// The track ran out of bytes before an end-of-track meta event
    #[error("Track ended without an end-of-track event")]
    MissingEndOfTrack,
    /// A status byte that may not appear in a file
    #[error("Invalid status byte {0:#04x}")]
    InvalidStatus(u8),
    /// A channel message data byte had its top bit set
    #[error("Invalid data byte {0:#04x}")]
    InvalidDataByte(u8),
    /// Accumulated delta-times no longer fit in 32 bits
    #[error("Absolute tick overflowed")]
    TickOverflow,
}

/// Errors converting a sequence between absolute and delta timing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimingError {
    /// An absolute-timed event is earlier than the event before it
    #[error("Event {index} of track {track} is earlier than its predecessor")]
    UnorderedEvents {
        /// Track index
        track: usize,
        /// Event index within the track
        index: usize,
    },
    /// Summing delta-times overflowed 32 bits
    #[error("Absolute tick of event {index} in track {track} overflowed")]
    TickOverflow {
        /// Track index
        track: usize,
        /// Event index within the track
        index: usize,
    },
}

/// Errors that can occur while serializing a [`Sequence`](crate::file::Sequence)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriteError {
    /// Ticks per quarter note must be in `1..=0x7FFF`
    #[error("Ticks per quarter note {0} is out of range")]
    InvalidTicksPerQuarterNote(u16),
    /// The header can only count 65535 tracks
    #[error("{0} tracks do not fit in a header")]
    TooManyTracks(usize),
    /// A delta-time larger than four VLQ bytes can hold
    #[error("Delta time {delta} in track {track} exceeds 0x0FFFFFFF")]
    DeltaTooLarge {
        /// Track index
        track: usize,
        /// The offending delta
        delta: u32,
    },
    /// A track or meta/sysex payload too long for its length field
    #[error("Payload of {0} bytes is too long")]
    PayloadTooLong(usize),
    /// An event status the writer cannot serialize
    #[error("Cannot write status byte {0:#04x}")]
    InvalidStatus(u8),
    /// A channel message carries the wrong number of data bytes
    #[error("Status {status:#04x} needs {expected} data bytes, found {found}")]
    DataLength {
        /// The status byte
        status: u8,
        /// Data bytes the status requires
        expected: usize,
        /// Data bytes present
        found: usize,
    },
    /// Absolute to delta conversion failed
    #[error(transparent)]
    Timing(#[from] TimingError),
}

/// Errors returned while building a file from notes
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The notes were rejected or assembly was cancelled
    #[error(transparent)]
    Assemble(#[from] crate::assemble::AssembleError),
    /// The assembled sequence could not be serialized
    #[error(transparent)]
    Write(#[from] WriteError),
}

impl EncodeError {
    /// True if the caller's cancellation token stopped the encode
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Assemble(e) if e.is_cancelled())
    }
}
