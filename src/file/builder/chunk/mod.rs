#![doc = r#"
Contains types for MIDI file chunks

# Overview

MIDI files are organized into chunks, each identified by a 4-character ASCII type identifier
followed by a 32-bit big-endian length field and then the chunk data.

## [`RawHeaderChunk`]

The header chunk (identified by "MThd") must be the first chunk in a MIDI file. It always
has a fixed length of 6 bytes and holds:

- the [`FormatType`](crate::file::FormatType)
- the number of track chunks that follow
- the [`Timing`](crate::file::timing::Timing) of the delta-times

## [`RawTrackChunk`]

Track chunks (identified by "MTrk") contain a stream of (delta-time, event) pairs closed by
an end-of-track meta event. The stream is only parsed when
[`RawTrackChunk::events`] is called.

## [`UnknownChunk`]

Any chunk with a type identifier other than "MThd" or "MTrk" is framed by its length and
handed back untouched, so newer or proprietary chunk types never stop a decode.

# Example Structure

```text
[Header Chunk: "MThd"]
[Track Chunk 1: "MTrk"]
[Track Chunk 2: "MTrk"]
...
[Track Chunk N: "MTrk"]
[Optional Unknown Chunks]
```
"#]

mod unknown_chunk;
pub use unknown_chunk::*;

mod header;
pub use header::*;

mod track;
pub use track::*;

/// One framed chunk, as returned by [`Reader::read_chunk`](crate::reader::Reader::read_chunk)
#[derive(Debug, Clone, PartialEq)]
pub enum ChunkEvent<'a> {
    /// An `MThd` chunk
    Header(RawHeaderChunk),
    /// An `MTrk` chunk
    Track(RawTrackChunk<'a>),
    /// Anything else
    Unknown(UnknownChunk<'a>),
}
