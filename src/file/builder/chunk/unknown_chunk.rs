/// A chunk with a tag other than `MThd` or `MTrk`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChunk<'a> {
    tag: [u8; 4],
    data: &'a [u8],
    offset: usize,
}

impl<'a> UnknownChunk<'a> {
    pub(crate) const fn new(tag: [u8; 4], data: &'a [u8], offset: usize) -> Self {
        Self { tag, data, offset }
    }
    /// The four byte type identifier
    pub const fn tag(&self) -> [u8; 4] {
        self.tag
    }
    /// The chunk payload
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }
    /// Offset of the chunk's tag in the file
    pub const fn offset(&self) -> usize {
        self.offset
    }
}
