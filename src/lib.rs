#![doc = r#"
A Standard MIDI File codec, with a track assembler for flat note data.

# Overview
- [`Sequence::decode`](file::Sequence::decode) reads the bytes of a `.mid`
  file into tracks of absolute-timed [`Event`](event::Event)s.
- [`Sequence::to_bytes`](file::Sequence::to_bytes) writes a sequence back out,
  with running status and a single end-of-track per track.
- [`Sequence::encode`](file::Sequence::encode) builds a file from
  [`NoteSpec`](assemble::NoteSpec)s, one track per `(channel, program)`.
- [`Sequence::notes`](file::Sequence::notes) and
  [`Sequence::split`](file::Sequence::split) go the other way.

The [`io`] module (with the `std` feature) wraps these in file functions.

# Example
```rust
use smfcodec::prelude::*;

let notes = [
    NoteSpec::new(0, 0, 0, 480, 60, 100),
    NoteSpec::new(40, 1, 0, 960, 67, 90),
];
let bytes = Sequence::encode(&notes, 480).unwrap();
assert_eq!(&bytes[..4], b"MThd");

let sequence = Sequence::decode(&bytes).unwrap();
assert_eq!(sequence.tracks().len(), 2);

let recovered: Vec<NoteSpec> = sequence.notes().unwrap().into_iter().map(|n| n.note).collect();
assert_eq!(recovered, notes);
```

# Features
- `std` (default): the [`io`] module and `std::error::Error` impls
- `tracing` (default): log skipped chunks, hanging notes and written files
- `serde`: `Serialize`/`Deserialize` for the data model
"#]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate alloc;

mod error;
pub use error::*;

pub mod assemble;
pub mod cancel;
pub mod event;
pub mod file;
#[cfg(feature = "std")]
pub mod io;
pub mod prelude;
pub mod reader;
pub mod vlq;
