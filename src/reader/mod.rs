#![doc = r#"
A byte cursor over an in-memory MIDI file.

The [`Reader`] frames the buffer into chunks with [`Reader::read_chunk`].
Track chunks are handed back as [`RawTrackChunk`]s, which create their own
reader over just their payload. Positions reported by a reader (and by any
[`ReaderError`] it returns) are always offsets into the original buffer.
"#]

mod error;
pub use error::*;

use crate::{
    ChunkError, HeaderError,
    file::builder::chunk::{ChunkEvent, RawHeaderChunk, RawTrackChunk, UnknownChunk},
    vlq::decode_vlq,
};

const HEADER_MAGIC: [u8; 4] = *b"MThd";
const TRACK_MAGIC: [u8; 4] = *b"MTrk";
const HEADER_LENGTH: u32 = 6;

/// A cursor over a byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    base: usize,
    position: usize,
}

impl<'a> Reader<'a> {
    /// Read from the start of a complete file.
    pub const fn from_byte_slice(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    /// Read a slice which starts at `base` in the original buffer.
    pub(crate) const fn with_base(data: &'a [u8], base: usize) -> Self {
        Self {
            data,
            base,
            position: 0,
        }
    }

    /// Offset of the next byte, relative to the start of the file.
    pub const fn buffer_position(&self) -> usize {
        self.base + self.position
    }

    /// Bytes left to read.
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// True if there is nothing left to read.
    pub const fn is_at_end(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> ReadResult<u8> {
        let byte = *self
            .data
            .get(self.position)
            .ok_or_else(|| ReaderError::unexpected_end(self.buffer_position()))?;
        self.position += 1;
        Ok(byte)
    }

    /// Reads `N` bytes into an array.
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let slice = self.read_slice(N)?;
        let mut out = [0; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Borrows the next `len` bytes.
    pub fn read_slice(&mut self, len: usize) -> ReadResult<&'a [u8]> {
        let end = self
            .position
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or_else(|| ReaderError::unexpected_end(self.buffer_position()))?;
        let slice = &self.data[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Reads a big-endian `u16`.
    pub fn read_u16(&mut self) -> ReadResult<u16> {
        self.read_exact_size().map(u16::from_be_bytes)
    }

    /// Reads a big-endian `u32`.
    pub fn read_u32(&mut self) -> ReadResult<u32> {
        self.read_exact_size().map(u32::from_be_bytes)
    }

    /// Reads a variable length quantity.
    pub fn read_vlq(&mut self) -> ReadResult<u32> {
        let (value, len) = decode_vlq(self.data, self.position)
            .map_err(|e| ReaderError::invalid(self.buffer_position(), e))?;
        self.position += len;
        Ok(value)
    }

    /// Reads the header chunk, which must open every file.
    pub fn read_header(&mut self) -> ReadResult<RawHeaderChunk> {
        let start = self.buffer_position();
        if self.remaining() < HEADER_MAGIC.len() {
            return Err(ReaderError::invalid(
                start,
                ChunkError::Truncated {
                    needed: HEADER_MAGIC.len(),
                    available: self.remaining(),
                },
            ));
        }
        let magic: [u8; 4] = self.data[self.position..self.position + HEADER_MAGIC.len()]
            .try_into()
            .map_err(|_| ReaderError::unexpected_end(start))?;
        if magic != HEADER_MAGIC {
            return Err(ReaderError::invalid(start, HeaderError::BadMagic(magic)));
        }
        match self.read_chunk()? {
            Some(ChunkEvent::Header(header)) => Ok(header),
            _ => Err(ReaderError::invalid(start, HeaderError::BadMagic(magic))),
        }
    }

    /// Reads the next chunk, or `None` at the end of the buffer.
    pub fn read_chunk(&mut self) -> ReadResult<Option<ChunkEvent<'a>>> {
        if self.is_at_end() {
            return Ok(None);
        }
        let start = self.buffer_position();
        if self.remaining() < 8 {
            return Err(ReaderError::invalid(
                start,
                ChunkError::Truncated {
                    needed: 8,
                    available: self.remaining(),
                },
            ));
        }
        let tag: [u8; 4] = self.read_exact_size()?;
        let length = self.read_u32()?;

        if tag == HEADER_MAGIC && length != HEADER_LENGTH {
            return Err(ReaderError::invalid(start, HeaderError::BadLength(length)));
        }
        let needed = length as usize;
        if needed > self.remaining() {
            return Err(ReaderError::invalid(
                start,
                ChunkError::Truncated {
                    needed,
                    available: self.remaining(),
                },
            ));
        }

        let payload_offset = self.buffer_position();
        let payload = self.read_slice(needed)?;
        let chunk = match tag {
            HEADER_MAGIC => ChunkEvent::Header(RawHeaderChunk::parse(payload, payload_offset)?),
            TRACK_MAGIC => ChunkEvent::Track(RawTrackChunk::new(payload, payload_offset)),
            _ => ChunkEvent::Unknown(UnknownChunk::new(tag, payload, start)),
        };
        Ok(Some(chunk))
    }
}
