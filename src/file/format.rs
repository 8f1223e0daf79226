use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
The format word of the header chunk.

- Format 0 holds a single track carrying every channel.
- Format 1 holds tracks played simultaneously; by convention the first one
  carries the tempo map.
- Format 2 holds independent single-track patterns.

Files written by this crate use format 0 for one track and format 1 otherwise.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel = 0,
    /// Format 1
    Simultaneous = 1,
    /// Format 2
    SequentiallyIndependent = 2,
}

impl FormatType {
    /// The format a writer should declare for `track_count` tracks.
    pub const fn for_track_count(track_count: usize) -> Self {
        if track_count > 1 {
            Self::Simultaneous
        } else {
            Self::SingleMultiChannel
        }
    }
}
