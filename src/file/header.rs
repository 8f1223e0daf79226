use crate::file::FormatType;

#[doc = r#"
The decoded contents of a file's `MThd` chunk
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    format: FormatType,
    track_count: u16,
    ticks_per_quarter_note: u16,
}

impl Header {
    /// Create a new header
    pub const fn new(format: FormatType, track_count: u16, ticks_per_quarter_note: u16) -> Self {
        Self {
            format,
            track_count,
            ticks_per_quarter_note,
        }
    }
    /// The declared format
    pub const fn format(&self) -> FormatType {
        self.format
    }
    /// The declared number of track chunks.
    ///
    /// Files in the wild do not always agree with this count; decoding
    /// trusts the chunks actually present.
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }
    /// Get the timing props
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        self.ticks_per_quarter_note
    }

    /// The 14 bytes of a header chunk
    pub fn to_bytes(&self) -> [u8; 14] {
        let mut bytes = [0; 14];
        bytes[0..4].copy_from_slice(b"MThd");
        bytes[4..8].copy_from_slice(&6u32.to_be_bytes());
        bytes[8..10].copy_from_slice(&u16::from(self.format).to_be_bytes());
        bytes[10..12].copy_from_slice(&self.track_count.to_be_bytes());
        bytes[12..14].copy_from_slice(&(self.ticks_per_quarter_note & 0x7FFF).to_be_bytes());
        bytes
    }
}
