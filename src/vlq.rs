#![doc = r#"
Variable length quantities

Delta-times and meta/sysex lengths in a MIDI file are stored as big-endian
groups of 7 bits. Every byte but the last has its top bit set:

```text
0x00000000 -> 00
0x0000007F -> 7F
0x00000080 -> 81 00
0x00003FFF -> FF 7F
0x0FFFFFFF -> FF FF FF 7F
```

Four bytes are the most a file may use, so [`MAX_VLQ`] is the largest value
that can be stored.
"#]

use alloc::vec::Vec;
use thiserror::Error;

/// The largest value representable in four VLQ bytes.
pub const MAX_VLQ: u32 = 0x0FFF_FFFF;

const MAX_GROUPS: usize = 4;

/// Returned when a variable length quantity cannot be read
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum VlqError {
    /// More than four groups, or the input ended before the last group
    #[error("Malformed variable length quantity")]
    MalformedVlq,
}

/// Decodes the quantity starting at `offset`.
///
/// Returns the value and the number of bytes it occupied.
///
/// # Example
/// ```rust
/// # use smfcodec::vlq::decode_vlq;
/// assert_eq!(decode_vlq(&[0x00, 0x81, 0x00], 1), Ok((0x80, 2)));
/// ```
pub fn decode_vlq(bytes: &[u8], offset: usize) -> Result<(u32, usize), VlqError> {
    let mut value: u32 = 0;
    let tail = bytes.get(offset..).ok_or(VlqError::MalformedVlq)?;

    for (i, &byte) in tail.iter().take(MAX_GROUPS).enumerate() {
        value = (value << 7) | (byte & 0x7F) as u32;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    Err(VlqError::MalformedVlq)
}

/// Appends the minimal encoding of `value` to `out`.
///
/// Values above [`MAX_VLQ`] take five bytes, which [`decode_vlq`] rejects;
/// callers writing files must check the range themselves.
pub fn write_vlq(value: u32, out: &mut Vec<u8>) {
    let mut groups = [0u8; 5];
    let mut len = 0;
    let mut rest = value;
    loop {
        groups[len] = (rest & 0x7F) as u8;
        len += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    for i in (0..len).rev() {
        let continuation = if i == 0 { 0 } else { 0x80 };
        out.push(groups[i] | continuation);
    }
}

/// Encodes `value` into a new buffer. See [`write_vlq`].
pub fn encode_vlq(value: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_GROUPS);
    write_vlq(value, &mut out);
    out
}
