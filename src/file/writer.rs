use alloc::vec::Vec;

use super::{FormatType, Header, Sequence, TimingMode, Track};
use crate::{
    TimingError, WriteError,
    event::{END_OF_TRACK, EventKind, META, SYSEX, SYSEX_ESCAPE, VoiceStatus},
    vlq::{MAX_VLQ, write_vlq},
};

const TRACK_MAGIC: &[u8; 4] = b"MTrk";

/// Settings for [`Sequence::to_bytes_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WriteOptions {
    /// Omit a channel message's status byte when it repeats the previous one.
    pub running_status: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            running_status: true,
        }
    }
}

impl Sequence {
    /// Serializes the sequence with default [`WriteOptions`].
    pub fn to_bytes(&self) -> Result<Vec<u8>, WriteError> {
        self.to_bytes_with(&WriteOptions::default())
    }

    /// Serializes the sequence into a complete file.
    ///
    /// Every track is closed with exactly one end-of-track event, placed at the
    /// latest end-of-track tick found in the track (or at its last event).
    pub fn to_bytes_with(&self, options: &WriteOptions) -> Result<Vec<u8>, WriteError> {
        let tpq = self.ticks_per_quarter_note();
        if tpq == 0 || tpq > 0x7FFF {
            return Err(WriteError::InvalidTicksPerQuarterNote(tpq));
        }
        let tracks = self.tracks();
        let track_count =
            u16::try_from(tracks.len()).map_err(|_| WriteError::TooManyTracks(tracks.len()))?;
        let header = Header::new(FormatType::for_track_count(tracks.len()), track_count, tpq);

        let mut out = Vec::new();
        out.extend_from_slice(&header.to_bytes());

        let mut scratch = Vec::new();
        for (index, track) in tracks.iter().enumerate() {
            scratch.clear();
            write_track(index, track, self.timing_mode(), options, &mut scratch)?;
            let len = u32::try_from(scratch.len())
                .map_err(|_| WriteError::PayloadTooLong(scratch.len()))?;
            out.extend_from_slice(TRACK_MAGIC);
            out.extend_from_slice(&len.to_be_bytes());
            out.extend_from_slice(&scratch);
        }
        Ok(out)
    }
}

fn write_track(
    index: usize,
    track: &Track,
    mode: TimingMode,
    options: &WriteOptions,
    out: &mut Vec<u8>,
) -> Result<(), WriteError> {
    let mut absolute: u32 = 0;
    let mut written: u32 = 0;
    let mut end: u32 = 0;
    let mut running_status = None;

    for (i, event) in track.events().iter().enumerate() {
        absolute = match mode {
            TimingMode::Absolute if event.tick < absolute => {
                return Err(TimingError::UnorderedEvents { track: index, index: i }.into());
            }
            TimingMode::Absolute => event.tick,
            TimingMode::Delta => absolute
                .checked_add(event.tick)
                .ok_or(TimingError::TickOverflow { track: index, index: i })?,
        };
        if event.is_end_of_track() {
            end = end.max(absolute);
            continue;
        }
        write_delta(index, absolute - written, out)?;
        written = absolute;
        write_event(&event.kind, options, &mut running_status, out)?;
    }

    let end = end.max(written);
    write_delta(index, end - written, out)?;
    out.extend_from_slice(&[META, END_OF_TRACK, 0]);
    Ok(())
}

fn write_delta(track: usize, delta: u32, out: &mut Vec<u8>) -> Result<(), WriteError> {
    if delta > MAX_VLQ {
        return Err(WriteError::DeltaTooLarge { track, delta });
    }
    write_vlq(delta, out);
    Ok(())
}

fn write_payload(data: &[u8], out: &mut Vec<u8>) -> Result<(), WriteError> {
    let len = u32::try_from(data.len())
        .ok()
        .filter(|len| *len <= MAX_VLQ)
        .ok_or(WriteError::PayloadTooLong(data.len()))?;
    write_vlq(len, out);
    out.extend_from_slice(data);
    Ok(())
}

fn write_voice(
    status: u8,
    data: &[u8],
    options: &WriteOptions,
    running_status: &mut Option<u8>,
    out: &mut Vec<u8>,
) {
    if !(options.running_status && *running_status == Some(status)) {
        out.push(status);
    }
    *running_status = Some(status);
    out.extend(data.iter().map(|b| b & 0x7F));
}

fn write_event(
    kind: &EventKind,
    options: &WriteOptions,
    running_status: &mut Option<u8>,
    out: &mut Vec<u8>,
) -> Result<(), WriteError> {
    match kind {
        EventKind::NoteOn {
            channel,
            key,
            velocity,
        } => write_voice(
            VoiceStatus::NoteOn.status_byte(*channel),
            &[*key, *velocity],
            options,
            running_status,
            out,
        ),
        EventKind::NoteOff {
            channel,
            key,
            velocity,
        } => write_voice(
            VoiceStatus::NoteOff.status_byte(*channel),
            &[*key, *velocity],
            options,
            running_status,
            out,
        ),
        EventKind::ProgramChange { channel, program } => write_voice(
            VoiceStatus::ProgramChange.status_byte(*channel),
            &[*program],
            options,
            running_status,
            out,
        ),
        EventKind::Meta { meta_type, data } => {
            *running_status = None;
            out.push(META);
            out.push(*meta_type);
            write_payload(data, out)?;
        }
        EventKind::Other { status, data } if *status == SYSEX || *status == SYSEX_ESCAPE => {
            *running_status = None;
            out.push(*status);
            write_payload(data, out)?;
        }
        EventKind::Other { status, data } => {
            let (voice, _) =
                VoiceStatus::from_status_byte(*status).ok_or(WriteError::InvalidStatus(*status))?;
            if data.len() != voice.data_len() {
                return Err(WriteError::DataLength {
                    status: *status,
                    expected: voice.data_len(),
                    found: data.len(),
                });
            }
            write_voice(*status, data, options, running_status, out);
        }
    }
    Ok(())
}
