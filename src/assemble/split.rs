use alloc::vec::Vec;

use crate::{
    event::Event,
    file::{Sequence, TimingMode, Track},
};

/// Regroups the events of an absolute-timed sequence by channel.
///
/// Every event is merged into one stream ordered by tick, then track index,
/// then position in its track. Events without a channel (meta and sysex)
/// go to a leading track, which is only created if there are any, or if the
/// sequence has no other events. Channel events follow in one track per
/// channel, in the order the channels are first heard. Old end-of-track
/// events are dropped and every new track ends with one at the last tick of
/// the sequence.
pub fn split_absolute(sequence: &Sequence) -> Sequence {
    let mut merged: Vec<(usize, usize, &Event)> = sequence
        .tracks()
        .iter()
        .enumerate()
        .flat_map(|(track, t)| t.events().iter().enumerate().map(move |(i, e)| (track, i, e)))
        .collect();
    merged.sort_by_key(|(track, i, event)| (event.tick, *track, *i));

    let end = merged.iter().map(|(_, _, e)| e.tick).max().unwrap_or(0);

    let mut conductor = Vec::new();
    let mut channels: Vec<(u8, Vec<Event>)> = Vec::new();
    for (_, _, event) in merged {
        if event.is_end_of_track() {
            continue;
        }
        match event.channel() {
            None => conductor.push(event.clone()),
            Some(channel) => match channels.iter_mut().find(|(c, _)| *c == channel) {
                Some((_, events)) => events.push(event.clone()),
                None => channels.push((channel, alloc::vec![event.clone()])),
            },
        }
    }

    let mut tracks = Vec::with_capacity(channels.len() + 1);
    if !conductor.is_empty() || channels.is_empty() {
        tracks.push(conductor);
    }
    tracks.extend(channels.into_iter().map(|(_, events)| events));

    let tracks = tracks
        .into_iter()
        .map(|mut events| {
            events.push(Event::end_of_track(end));
            Track::new(events)
        })
        .collect();

    Sequence::new(sequence.ticks_per_quarter_note(), tracks, TimingMode::Absolute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;
    use alloc::vec;
    use pretty_assertions::assert_eq;

    fn tempo(tick: u32) -> Event {
        Event::meta(tick, 0x51, vec![0x07, 0xA1, 0x20])
    }

    fn sequence() -> Sequence {
        Sequence::new(
            96,
            vec![
                Track::new(vec![
                    tempo(0),
                    Event::note_on(0, 3, 60, 1),
                    Event::note_on(10, 1, 62, 1),
                    Event::end_of_track(10),
                ]),
                Track::new(vec![
                    Event::program_change(0, 1, 4),
                    Event::note_off(20, 3, 60, 0),
                    Event::note_off(20, 1, 62, 0),
                    Event::end_of_track(25),
                ]),
            ],
            TimingMode::Absolute,
        )
    }

    #[test]
    fn test_split_by_channel() {
        let split = split_absolute(&sequence());
        assert_eq!(
            split.tracks(),
            &[
                Track::new(vec![tempo(0), Event::end_of_track(25)]),
                Track::new(vec![
                    Event::note_on(0, 3, 60, 1),
                    Event::note_off(20, 3, 60, 0),
                    Event::end_of_track(25),
                ]),
                Track::new(vec![
                    Event::program_change(0, 1, 4),
                    Event::note_on(10, 1, 62, 1),
                    Event::note_off(20, 1, 62, 0),
                    Event::end_of_track(25),
                ]),
            ]
        );
    }

    #[test]
    fn test_split_is_idempotent() {
        let once = split_absolute(&sequence());
        assert_eq!(split_absolute(&once), once);
    }

    #[test]
    fn test_sysex_goes_to_conductor() {
        let sysex = Event::new(0, EventKind::Other { status: 0xF0, data: vec![0x7E, 0xF7] });
        let seq = Sequence::new(
            96,
            vec![Track::new(vec![Event::note_on(0, 0, 1, 1), sysex.clone()])],
            TimingMode::Absolute,
        );
        let split = split_absolute(&seq);
        assert_eq!(split.tracks()[0].events(), &[sysex, Event::end_of_track(0)]);
        assert_eq!(split.tracks().len(), 2);
    }

    #[test]
    fn test_no_conductor_without_meta() {
        let seq = Sequence::new(
            96,
            vec![Track::new(vec![Event::note_on(0, 0, 1, 1), Event::end_of_track(5)])],
            TimingMode::Absolute,
        );
        assert_eq!(
            split_absolute(&seq).tracks(),
            &[Track::new(vec![Event::note_on(0, 0, 1, 1), Event::end_of_track(5)])]
        );
    }

    #[test]
    fn test_empty_sequence_keeps_one_track() {
        let seq = Sequence::new(96, vec![], TimingMode::Absolute);
        let split = split_absolute(&seq);
        assert_eq!(split.tracks(), &[Track::new(vec![Event::end_of_track(0)])]);
        assert_eq!(split_absolute(&split), split);
    }
}
