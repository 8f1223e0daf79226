use alloc::vec::Vec;

use crate::{
    TrackError,
    event::{END_OF_TRACK, Event, EventKind, META, SYSEX, SYSEX_ESCAPE, VoiceStatus},
    reader::{ReadResult, Reader, ReaderError},
};

/// The unparsed payload of an `MTrk` chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTrackChunk<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> RawTrackChunk<'a> {
    pub(crate) const fn new(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    /// Length of the event stream in bytes
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a zero length chunk (which can never be valid)
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Parses the event stream into events with absolute ticks.
    ///
    /// The returned events end with the end-of-track meta event. Running
    /// status is honoured for channel messages; meta and sysex events
    /// cancel it.
    pub fn events(&self) -> ReadResult<Vec<Event>> {
        let mut reader = Reader::with_base(self.data, self.offset);
        let mut events = Vec::new();
        let mut tick: u32 = 0;
        let mut running_status: Option<u8> = None;

        loop {
            if reader.is_at_end() {
                return Err(ReaderError::invalid(
                    reader.buffer_position(),
                    TrackError::MissingEndOfTrack,
                ));
            }
            let delta = reader.read_vlq()?;
            tick = tick.checked_add(delta).ok_or_else(|| {
                ReaderError::invalid(reader.buffer_position(), TrackError::TickOverflow)
            })?;

            let status_position = reader.buffer_position();
            let first = reader.read_u8()?;
            let kind = match first {
                0x00..=0x7F => {
                    let status = running_status.ok_or_else(|| {
                        ReaderError::invalid(status_position, TrackError::NoRunningStatus)
                    })?;
                    read_voice(&mut reader, status, Some(first))?
                }
                0x80..=0xEF => {
                    running_status = Some(first);
                    read_voice(&mut reader, first, None)?
                }
                META => {
                    running_status = None;
                    let meta_type = reader.read_u8()?;
                    let len = reader.read_vlq()? as usize;
                    let data = reader.read_slice(len)?.to_vec();
                    EventKind::Meta { meta_type, data }
                }
                SYSEX | SYSEX_ESCAPE => {
                    running_status = None;
                    let len = reader.read_vlq()? as usize;
                    let data = reader.read_slice(len)?.to_vec();
                    EventKind::Other {
                        status: first,
                        data,
                    }
                }
                status => {
                    return Err(ReaderError::invalid(
                        status_position,
                        TrackError::InvalidStatus(status),
                    ));
                }
            };

            let done = kind.is_end_of_track();
            events.push(Event::new(tick, kind));
            if done {
                break;
            }
        }

        if !reader.is_at_end() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                position = reader.buffer_position(),
                ignored = reader.remaining(),
                "bytes after end-of-track ignored"
            );
        }

        Ok(events)
    }
}

/// Reads the data bytes of a channel message.
///
/// `first` is the data byte already consumed when running status applies.
fn read_voice(reader: &mut Reader<'_>, status: u8, first: Option<u8>) -> ReadResult<EventKind> {
    let position = reader.buffer_position();
    let (voice, channel) = VoiceStatus::from_status_byte(status)
        .ok_or_else(|| ReaderError::invalid(position, TrackError::InvalidStatus(status)))?;

    let mut data = [0u8; 2];
    let len = voice.data_len();
    for (i, slot) in data.iter_mut().take(len).enumerate() {
        let byte = match (i, first) {
            (0, Some(byte)) => byte,
            _ => reader.read_u8()?,
        };
        if byte & 0x80 != 0 {
            return Err(ReaderError::invalid(
                reader.buffer_position() - 1,
                TrackError::InvalidDataByte(byte),
            ));
        }
        *slot = byte;
    }

    Ok(match voice {
        VoiceStatus::NoteOn => EventKind::NoteOn {
            channel,
            key: data[0],
            velocity: data[1],
        },
        VoiceStatus::NoteOff => EventKind::NoteOff {
            channel,
            key: data[0],
            velocity: data[1],
        },
        VoiceStatus::ProgramChange => EventKind::ProgramChange {
            channel,
            program: data[0],
        },
        _ => EventKind::Other {
            status,
            data: data[..len].to_vec(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParseError;
    use alloc::vec;
    use pretty_assertions::assert_eq;

    fn parse(bytes: &[u8]) -> ReadResult<Vec<Event>> {
        RawTrackChunk::new(bytes, 22).events()
    }

    #[test]
    fn test_parse_explicit_status() {
        let events = parse(&[
            0x00, 0xC0, 0x05, // program change
            0x00, 0x90, 0x3C, 0x64, // note on
            0x83, 0x60, 0x80, 0x3C, 0x40, // note off after 480
            0x00, 0xFF, 0x2F, 0x00,
        ])
        .unwrap();
        assert_eq!(
            events,
            vec![
                Event::program_change(0, 0, 5),
                Event::note_on(0, 0, 60, 100),
                Event::note_off(480, 0, 60, 64),
                Event::end_of_track(480),
            ]
        );
    }

    #[test]
    fn test_parse_running_status() {
        let events = parse(&[
            0x00, 0x91, 0x3C, 0x64, //
            0x10, 0x3E, 0x64, // running note on
            0x10, 0x3C, 0x00, // running note on, velocity 0
            0x00, 0xB1, 0x07, 0x50, // control change
            0x05, 0x0A, 0x40, // running control change
            0x00, 0xFF, 0x2F, 0x00,
        ])
        .unwrap();
        assert_eq!(
            events,
            vec![
                Event::note_on(0, 1, 60, 100),
                Event::note_on(16, 1, 62, 100),
                Event::note_on(32, 1, 60, 0),
                Event::new(32, EventKind::Other { status: 0xB1, data: vec![0x07, 0x50] }),
                Event::new(37, EventKind::Other { status: 0xB1, data: vec![0x0A, 0x40] }),
                Event::end_of_track(37),
            ]
        );
    }

    #[test]
    fn test_first_event_without_status() {
        let err = parse(&[0x00, 0x3C, 0x64, 0x00, 0xFF, 0x2F, 0x00]).unwrap_err();
        assert_eq!(err.position(), 23);
        assert_eq!(
            err.parse_error(),
            Some(&ParseError::Track(TrackError::NoRunningStatus))
        );
    }

    #[test]
    fn test_meta_cancels_running_status() {
        let err = parse(&[
            0x00, 0x90, 0x3C, 0x64, //
            0x00, 0xFF, 0x01, 0x01, b'a', // text
            0x00, 0x3C, 0x00, //
            0x00, 0xFF, 0x2F, 0x00,
        ])
        .unwrap_err();
        assert_eq!(
            err.parse_error(),
            Some(&ParseError::Track(TrackError::NoRunningStatus))
        );
    }

    #[test]
    fn test_meta_and_sysex_are_opaque() {
        let events = parse(&[
            0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, // tempo
            0x00, 0xF0, 0x03, 0x7E, 0x09, 0xF7, // sysex
            0x00, 0xFF, 0x2F, 0x00,
        ])
        .unwrap();
        assert_eq!(
            events,
            vec![
                Event::meta(0, 0x51, vec![0x07, 0xA1, 0x20]),
                Event::new(0, EventKind::Other { status: 0xF0, data: vec![0x7E, 0x09, 0xF7] }),
                Event::end_of_track(0),
            ]
        );
    }

    #[test]
    fn test_missing_end_of_track() {
        let err = parse(&[0x00, 0x90, 0x3C, 0x64]).unwrap_err();
        assert_eq!(err.position(), 26);
        assert_eq!(
            err.parse_error(),
            Some(&ParseError::Track(TrackError::MissingEndOfTrack))
        );
    }

    #[test]
    fn test_bytes_after_end_of_track_are_ignored() {
        let events = parse(&[0x00, 0xFF, 0x2F, 0x00, 0x00, 0x90]).unwrap();
        assert_eq!(events, vec![Event::end_of_track(0)]);
    }

    #[test]
    fn test_system_common_status_is_invalid() {
        let err = parse(&[0x00, 0xF8, 0x00, 0xFF, 0x2F, 0x00]).unwrap_err();
        assert_eq!(
            err.parse_error(),
            Some(&ParseError::Track(TrackError::InvalidStatus(0xF8)))
        );
    }

    #[test]
    fn test_truncated_event_is_unexpected_end() {
        let err = parse(&[0x00, 0x90, 0x3C]).unwrap_err();
        assert!(err.is_unexpected_end());
    }
}
