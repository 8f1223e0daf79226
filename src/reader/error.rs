use crate::ParseError;
use thiserror::Error;

/// Why [`Sequence::decode`](crate::file::Sequence::decode) gave up, and the
/// absolute offset into the input where it did.
///
/// Offsets count from the first byte of the file, so an error inside the
/// second track points past the header and the first track.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("at byte {position}: {kind}")]
pub struct ReaderError {
    position: usize,
    kind: ReaderErrorKind,
}

/// What went wrong in a [`ReaderError`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReaderErrorKind {
    /// The bytes were there but did not form valid SMF data
    #[error("malformed input: {0}")]
    Malformed(#[from] ParseError),
    /// The input stopped short
    #[error("input ended in the middle of a value")]
    UnexpectedEnd,
}

impl ReaderError {
    pub(crate) const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }

    pub(crate) fn invalid(position: usize, error: impl Into<ParseError>) -> Self {
        Self::new(position, ReaderErrorKind::Malformed(error.into()))
    }

    pub(crate) const fn unexpected_end(position: usize) -> Self {
        Self::new(position, ReaderErrorKind::UnexpectedEnd)
    }

    /// Absolute byte offset of the failure
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Whether the input was malformed or cut short
    pub const fn kind(&self) -> &ReaderErrorKind {
        &self.kind
    }

    /// A read ran off the end of the buffer (or of a track's payload).
    ///
    /// Chunks whose declared length overruns the file are reported earlier,
    /// as [`ChunkError::Truncated`](crate::ChunkError::Truncated).
    pub const fn is_unexpected_end(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::UnexpectedEnd)
    }

    /// The format error, unless the input simply stopped short
    pub fn parse_error(&self) -> Option<&ParseError> {
        match &self.kind {
            ReaderErrorKind::Malformed(e) => Some(e),
            ReaderErrorKind::UnexpectedEnd => None,
        }
    }
}

/// Result of every decoding step
pub type ReadResult<T> = Result<T, ReaderError>;
