pub mod chunk;

use super::{Header, Sequence, TimingMode, Track};
use crate::{
    ChunkError,
    file::builder::chunk::ChunkEvent,
    reader::{ReadResult, ReaderError},
};
use alloc::vec::Vec;

/// A builder used to create a new [`Sequence`] from decoded chunks.
#[derive(Default)]
pub struct SequenceBuilder {
    header: Option<Header>,
    tracks: Vec<Track>,
}

impl SequenceBuilder {
    /// Handles a chunk of a midi file.
    ///
    /// `position` is the offset of the chunk, used for error reporting.
    pub fn handle_chunk(&mut self, chunk: ChunkEvent<'_>, position: usize) -> ReadResult<()> {
        match chunk {
            ChunkEvent::Header(h) => {
                if self.header.is_some() {
                    return Err(ReaderError::invalid(position, ChunkError::DuplicateHeader));
                }
                self.header = Some(h.into_header(position)?);
                Ok(())
            }
            ChunkEvent::Track(t) => {
                if self.header.is_none() {
                    return Err(ReaderError::invalid(position, ChunkError::MissingHeader));
                }
                let events = t.events()?;
                self.tracks.push(Track::new(events));
                Ok(())
            }
            ChunkEvent::Unknown(_chunk) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    tag = ?_chunk.tag(),
                    len = _chunk.data().len(),
                    offset = _chunk.offset(),
                    "skipping unknown chunk"
                );
                Ok(())
            }
        }
    }

    /// Attempts to finish the sequence from the provided chunks.
    ///
    /// `position` is reported if no header was ever handled.
    pub fn build(self, position: usize) -> ReadResult<Sequence> {
        let Some(header) = self.header else {
            return Err(ReaderError::invalid(position, ChunkError::MissingHeader));
        };

        if self.tracks.len() != header.track_count() as usize {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                declared = header.track_count(),
                found = self.tracks.len(),
                "header track count does not match the track chunks present"
            );
        }

        Ok(Sequence::new(
            header.ticks_per_quarter_note(),
            self.tracks,
            TimingMode::Absolute,
        ))
    }
}
