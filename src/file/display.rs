use core::fmt;

use super::{Sequence, TimingMode};

/// Renders a listing: two header lines, then one line per event holding the
/// track index, the absolute tick, and the event itself, separated by tabs.
impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ticks per quarter note: {}", self.ticks_per_quarter_note())?;
        writeln!(f, "tracks: {}", self.tracks().len())?;
        for (index, track) in self.tracks().iter().enumerate() {
            let mut tick: u32 = 0;
            for event in track.events() {
                tick = match self.timing_mode() {
                    TimingMode::Absolute => event.tick,
                    TimingMode::Delta => tick.saturating_add(event.tick),
                };
                writeln!(f, "{index}\t{tick}\t{}", event.kind)?;
            }
        }
        Ok(())
    }
}
