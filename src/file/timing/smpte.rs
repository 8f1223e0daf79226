#![doc = r#"
SMPTE frame rates

A header division word with its top bit set counts time in SMPTE frames
rather than in fractions of a quarter note. The high byte is then the
negative frame rate and the low byte the ticks per frame. Such files are
recognized so the error can name the frame rate, but they are not decoded.
"#]

/// The possible FPS (Frames Per Second) of an SMPTE division
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second - Standard film rate
    TwentyFour,
    /// 25 frames per second - PAL/SECAM television standard
    TwentyFive,
    /// 29.97 frames per second (30000/1001) - NTSC color television drop-frame rate
    TwentyNine,
    /// 30 frames per second - NTSC black & white, some digital formats
    Thirty,
}

impl SmpteFps {
    /// Reads the high byte of an SMPTE division word.
    ///
    /// The byte holds one of -24, -25, -29 or -30 in two's complement.
    pub const fn from_header_byte(byte: u8) -> Option<Self> {
        match byte as i8 {
            -24 => Some(Self::TwentyFour),
            -25 => Some(Self::TwentyFive),
            -29 => Some(Self::TwentyNine),
            -30 => Some(Self::Thirty),
            _ => None,
        }
    }
}
