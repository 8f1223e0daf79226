#![doc = r#"
Reading and writing files on disk.

[`dump`] renders a file as text, and [`write`] builds a file from parallel
columns of integers, the shape note data usually has when it comes from a
data frame or another language.

# Example
```rust,no_run
# fn main() -> Result<(), smfcodec::io::Error> {
let path = smfcodec::io::write(
    "scale.mid",
    480,
    &[0],
    &[0, 0, 0],
    &[0, 480, 960],
    &[480, 960, 1440],
    &[60, 62, 64],
    &[100, 100, 100],
)?;
println!("{}", smfcodec::io::dump(path)?);
# Ok(())
# }
```
"#]

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    EncodeError, WriteError,
    assemble::{AssembleError, MAX_CHANNEL, MAX_DATA, NoteSpec},
    cancel::{Cancel, NeverCancel},
    file::{EncodeOptions, Sequence},
    reader::ReaderError,
};

/// Errors from the file functions
#[derive(Debug, Error)]
pub enum Error {
    /// The path was empty
    #[error("filename is empty")]
    EmptyFilename,
    /// Ticks per quarter note must be in `1..=0x7FFF`
    #[error("ticks per quarter note {0} is out of range")]
    InvalidTicksPerQuarterNote(i32),
    /// The note columns differ in length
    #[error("{field} has {found} values, expected {expected}")]
    LengthMismatch {
        /// The column that differs from `channels`
        field: &'static str,
        /// Length of `channels`
        expected: usize,
        /// Length of the column
        found: usize,
    },
    /// A note's channel has no entry in `programs`
    #[error("note {index}: no program given for channel {channel}")]
    MissingProgram {
        /// Position of the note
        index: usize,
        /// Its channel
        channel: u8,
    },
    /// Ticks cannot be negative
    #[error("note {index}: {field} {value} is negative")]
    NegativeTick {
        /// Position of the note
        index: usize,
        /// `tick_on` or `tick_off`
        field: &'static str,
        /// The rejected value
        value: i32,
    },
    /// The file could not be read or written
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The file is not a valid Standard MIDI File
    #[error(transparent)]
    Read(#[from] ReaderError),
    /// The notes were rejected, or assembly was cancelled
    #[error(transparent)]
    Assemble(#[from] AssembleError),
    /// The assembled sequence could not be serialized
    #[error(transparent)]
    Write(#[from] WriteError),
}

impl Error {
    /// True if a cancellation token stopped the write
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Assemble(e) if e.is_cancelled())
    }
}

impl From<EncodeError> for Error {
    fn from(value: EncodeError) -> Self {
        match value {
            EncodeError::Assemble(e) => Self::Assemble(e),
            EncodeError::Write(e) => Self::Write(e),
        }
    }
}

fn check_path(path: &Path) -> Result<(), Error> {
    if path.as_os_str().is_empty() {
        return Err(Error::EmptyFilename);
    }
    Ok(())
}

/// Reads a file, splits it into one track per channel, and renders the
/// listing produced by [`Sequence`]'s `Display` impl.
pub fn dump(path: impl AsRef<Path>) -> Result<String, Error> {
    let path = path.as_ref();
    check_path(path)?;
    let bytes = std::fs::read(path)?;
    let sequence = Sequence::decode_and_split(&bytes)?;
    Ok(sequence.to_string())
}

/// Builds a file from parallel note columns.
///
/// `channels`, `tick_on`, `tick_off`, `keys` and `velocities` hold one value
/// per note. `programs` is indexed by channel: a note on channel `c` plays
/// `programs[c]`. Every value is checked and the file is fully encoded before
/// anything touches the disk. An existing file is overwritten.
#[allow(clippy::too_many_arguments)]
pub fn write(
    path: impl AsRef<Path>,
    ticks_per_quarter_note: i32,
    programs: &[i32],
    channels: &[i32],
    tick_on: &[i32],
    tick_off: &[i32],
    keys: &[i32],
    velocities: &[i32],
) -> Result<PathBuf, Error> {
    let path = path.as_ref();
    check_path(path)?;
    let tpq = u16::try_from(ticks_per_quarter_note)
        .ok()
        .filter(|tpq| (1..=0x7FFF).contains(tpq))
        .ok_or(Error::InvalidTicksPerQuarterNote(ticks_per_quarter_note))?;

    let expected = channels.len();
    for (field, column) in [
        ("tick_on", tick_on),
        ("tick_off", tick_off),
        ("keys", keys),
        ("velocities", velocities),
    ] {
        if column.len() != expected {
            return Err(Error::LengthMismatch {
                field,
                expected,
                found: column.len(),
            });
        }
    }

    let notes = (0..expected)
        .map(|index| -> Result<NoteSpec, Error> {
            let channel = data_value(channels[index], MAX_CHANNEL)
                .ok_or(AssembleError::ChannelOutOfRange {
                    index,
                    value: channels[index],
                })?;
            let program = *programs
                .get(usize::from(channel))
                .ok_or(Error::MissingProgram { index, channel })?;
            let program = data_value(program, MAX_DATA)
                .ok_or(AssembleError::ProgramOutOfRange { index, value: program })?;
            let key = data_value(keys[index], MAX_DATA).ok_or(AssembleError::KeyOutOfRange {
                index,
                value: keys[index],
            })?;
            let velocity = data_value(velocities[index], MAX_DATA).ok_or(
                AssembleError::VelocityOutOfRange {
                    index,
                    value: velocities[index],
                },
            )?;
            Ok(NoteSpec::new(
                program,
                channel,
                tick_value(index, "tick_on", tick_on[index])?,
                tick_value(index, "tick_off", tick_off[index])?,
                key,
                velocity,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    write_notes(path, &notes, tpq)
}

fn data_value(value: i32, max: u8) -> Option<u8> {
    u8::try_from(value).ok().filter(|v| *v <= max)
}

fn tick_value(index: usize, field: &'static str, value: i32) -> Result<u32, Error> {
    u32::try_from(value).map_err(|_| Error::NegativeTick {
        index,
        field,
        value,
    })
}

/// Assembles `notes` and writes the result to `path`
pub fn write_notes(
    path: impl AsRef<Path>,
    notes: &[NoteSpec],
    ticks_per_quarter_note: u16,
) -> Result<PathBuf, Error> {
    write_notes_with(
        path,
        notes,
        ticks_per_quarter_note,
        &EncodeOptions::default(),
        &NeverCancel,
    )
}

/// [`write_notes`] with explicit options and a cancellation token.
///
/// A cancelled write leaves the file system untouched.
pub fn write_notes_with<C: Cancel + ?Sized>(
    path: impl AsRef<Path>,
    notes: &[NoteSpec],
    ticks_per_quarter_note: u16,
    options: &EncodeOptions,
    cancel: &C,
) -> Result<PathBuf, Error> {
    let path = path.as_ref();
    check_path(path)?;
    let bytes = Sequence::encode_with(notes, ticks_per_quarter_note, options, cancel)?;
    std::fs::write(path, &bytes)?;
    #[cfg(feature = "tracing")]
    tracing::info!(
        path = %path.display(),
        bytes = bytes.len(),
        notes = notes.len(),
        "wrote midi file"
    );
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn test_write_then_dump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.mid");
        let written = write(&path, 480, &[5], &[0], &[0], &[480], &[60], &[100]).unwrap();
        assert_eq!(written, path);

        let listing = dump(&path).unwrap();
        assert_eq!(
            listing,
            "ticks per quarter note: 480\n\
             tracks: 1\n\
             0\t0\tprogram-change\tch 0\tprogram 5\n\
             0\t0\tnote-on\tch 0\tkey 60 vel 100\n\
             0\t480\tnote-off\tch 0\tkey 60 vel 100\n\
             0\t480\tend-of-track\t-\ttype 0x2f []\n"
        );
    }

    #[test]
    fn test_programs_are_indexed_by_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two.mid");
        write(&path, 96, &[1, 2, 3], &[2, 0], &[0, 0], &[1, 1], &[60, 61], &[1, 1]).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let notes = Sequence::decode(&bytes).unwrap().notes().unwrap();
        let programs: Vec<(u8, u8)> = notes
            .iter()
            .map(|n| (n.note.channel, n.note.program))
            .collect();
        assert_eq!(programs, vec![(2, 3), (0, 1)]);
    }

    #[test]
    fn test_rejected_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.mid");

        let err =
            write(&path, 480, &[0, 0], &[0, 1], &[0], &[1, 1], &[60, 60], &[1, 1]).unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch { field: "tick_on", expected: 2, found: 1 }
        ));

        let err = write(&path, 480, &[0], &[1], &[0], &[1], &[60], &[1]).unwrap_err();
        assert!(matches!(err, Error::MissingProgram { index: 0, channel: 1 }));

        let err = write(&path, 480, &[0], &[0], &[-5], &[1], &[60], &[1]).unwrap_err();
        assert!(matches!(
            err,
            Error::NegativeTick { index: 0, field: "tick_on", value: -5 }
        ));

        let err = write(&path, 480, &[0], &[-1], &[0], &[1], &[60], &[1]).unwrap_err();
        assert!(matches!(
            err,
            Error::Assemble(AssembleError::ChannelOutOfRange { index: 0, value: -1 })
        ));

        let err = write(&path, 480, &[0], &[0], &[0], &[1], &[300], &[1]).unwrap_err();
        assert!(matches!(
            err,
            Error::Assemble(AssembleError::KeyOutOfRange { index: 0, value: 300 })
        ));

        let err = write(&path, 0, &[0], &[0], &[0], &[1], &[60], &[1]).unwrap_err();
        assert!(matches!(err, Error::InvalidTicksPerQuarterNote(0)));

        let err = write(&path, 480, &[0], &[], &[], &[], &[], &[]).unwrap_err();
        assert!(matches!(err, Error::Assemble(AssembleError::EmptyInput)));

        assert!(!path.exists());
    }

    #[test]
    fn test_empty_filename() {
        assert!(matches!(dump(""), Err(Error::EmptyFilename)));
        assert!(matches!(
            write("", 480, &[0], &[0], &[0], &[1], &[60], &[1]),
            Err(Error::EmptyFilename)
        ));
    }

    #[test]
    fn test_cancelled_write_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cancelled.mid");
        let notes = [NoteSpec::new(0, 0, 0, 1, 60, 1)];
        let cancel = AtomicBool::new(true);
        let err =
            write_notes_with(&path, &notes, 96, &EncodeOptions::default(), &cancel).unwrap_err();
        assert!(err.is_cancelled());
        assert!(!path.exists());
    }

    #[test]
    fn test_dump_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(dump(dir.path().join("nope.mid")), Err(Error::Io(_))));
    }
}
