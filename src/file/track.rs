use alloc::vec::Vec;

use crate::event::Event;

#[doc = r#"
An ordered list of [`Event`]s.

Decoded tracks end with their end-of-track event. Tracks built in memory
may omit it; the writer always closes a track itself.
"#]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    events: Vec<Event>,
}

impl Track {
    /// Create a track from events
    pub const fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// The events of the track
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events, end-of-track included
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the track holds no events at all
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The largest tick in the track.
    ///
    /// Only meaningful when ticks are absolute.
    pub fn end_tick(&self) -> u32 {
        self.events.iter().map(|e| e.tick).max().unwrap_or(0)
    }
}

impl From<Vec<Event>> for Track {
    fn from(events: Vec<Event>) -> Self {
        Self::new(events)
    }
}
