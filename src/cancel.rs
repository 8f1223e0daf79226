#![doc = r#"
Cooperative cancellation for long running assembly.

Anything that can answer "should I stop?" is a [`Cancel`] token. The
assembler polls it between notes, so a flag flipped from another thread
stops the work at the next check.

```rust
# use smfcodec::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

let stop = AtomicBool::new(true);
let notes = [NoteSpec::new(0, 0, 0, 10, 60, 100)];
let err = Sequence::encode_with(&notes, 96, &EncodeOptions::default(), &stop).unwrap_err();
assert!(err.is_cancelled());

stop.store(false, Ordering::Relaxed);
assert!(Sequence::encode_with(&notes, 96, &EncodeOptions::default(), &stop).is_ok());
```
"#]

use core::sync::atomic::{AtomicBool, Ordering};

/// A cancellation token
pub trait Cancel {
    /// True once the work should stop
    fn is_cancelled(&self) -> bool;
}

/// A token that never fires
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeverCancel;

impl Cancel for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl Cancel for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<F: Fn() -> bool> Cancel for F {
    fn is_cancelled(&self) -> bool {
        self()
    }
}
