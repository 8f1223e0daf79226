//! Commonly used types, re-exported for `use smfcodec::prelude::*`

pub use crate::{
    ChunkError, EncodeError, HeaderError, ParseError, TimingError,
    TrackError, WriteError,
    assemble::{AssembleError, AssembleOptions, ExtractedNote, NoteSpec},
    cancel::{Cancel, NeverCancel},
    event::{Event, EventKind, VoiceStatus},
    file::{EncodeOptions, FormatType, Header, Sequence, TimingMode, Track, WriteOptions},
    reader::{ReadResult, Reader, ReaderError},
    vlq::{MAX_VLQ, VlqError, decode_vlq, encode_vlq, write_vlq},
};
