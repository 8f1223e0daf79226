use crate::{
    HeaderError,
    file::{FormatType, Header, timing::Timing},
    reader::{ReadResult, Reader, ReaderError},
};

/// The payload of an `MThd` chunk
///
/// ```text
/// u16 format | u16 track count | u16 division
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawHeaderChunk {
    format: FormatType,
    track_count: u16,
    timing: Timing,
}

impl RawHeaderChunk {
    /// Parses the six payload bytes found at `offset`.
    pub(crate) fn parse(payload: &[u8], offset: usize) -> ReadResult<Self> {
        let mut reader = Reader::with_base(payload, offset);
        let format_word = reader.read_u16()?;
        let format = FormatType::try_from(format_word)
            .map_err(|_| ReaderError::invalid(offset, HeaderError::InvalidFormat(format_word)))?;
        let track_count = reader.read_u16()?;
        let timing = Timing::from_be_bytes(reader.read_exact_size()?);
        Ok(Self {
            format,
            track_count,
            timing,
        })
    }

    /// The declared format
    pub const fn format_type(&self) -> FormatType {
        self.format
    }
    /// The declared track count
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }
    /// The division word
    pub const fn timing(&self) -> Timing {
        self.timing
    }

    /// Validates the timing and produces a [`Header`].
    ///
    /// `offset` is where the chunk started, used for error positions.
    pub fn into_header(self, offset: usize) -> ReadResult<Header> {
        let ticks_per_quarter_note = self
            .timing
            .require_ticks_per_quarter_note()
            .map_err(|e| ReaderError::invalid(offset, e))?;
        Ok(Header::new(
            self.format,
            self.track_count,
            ticks_per_quarter_note,
        ))
    }
}
