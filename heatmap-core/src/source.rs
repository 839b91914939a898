use std::collections::VecDeque;

use crate::brush::HeatEvent;
use crate::config::DriveMode;

/// Where the next heat event comes from.
///
/// Both variants hand out at most one event per call, oldest first. Order is
/// significant: earlier events have decayed and diffused by the time later
/// ones land.
#[derive(Clone, Debug)]
pub enum EventSource {
    Streaming(VecDeque<HeatEvent>),
    Replay { events: Vec<HeatEvent>, cursor: usize },
}

impl EventSource {
    pub fn new(mode: DriveMode, events: impl IntoIterator<Item = HeatEvent>) -> Self {
        match mode {
            DriveMode::Streaming => EventSource::Streaming(events.into_iter().collect()),
            DriveMode::Replay => EventSource::Replay {
                events: events.into_iter().collect(),
                cursor: 0,
            },
        }
    }

    pub fn mode(&self) -> DriveMode {
        match self {
            EventSource::Streaming(_) => DriveMode::Streaming,
            EventSource::Replay { .. } => DriveMode::Replay,
        }
    }

    /// Queue an event. Replay lists are fixed, so this is ignored there.
    pub fn push(&mut self, event: HeatEvent) -> bool {
        match self {
            EventSource::Streaming(queue) => {
                queue.push_back(event);
                true
            }
            EventSource::Replay { .. } => false,
        }
    }

    pub fn next_event(&mut self) -> Option<HeatEvent> {
        match self {
            EventSource::Streaming(queue) => queue.pop_front(),
            EventSource::Replay { events, cursor } => {
                let event = events.get(*cursor).copied()?;
                *cursor += 1;
                Some(event)
            }
        }
    }

    /// Events not yet consumed.
    pub fn pending(&self) -> usize {
        match self {
            EventSource::Streaming(queue) => queue.len(),
            EventSource::Replay { events, cursor } => events.len() - cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(x: i32) -> HeatEvent {
        HeatEvent::new(x, 0, 1.0)
    }

    #[test]
    fn streaming_is_fifo() {
        let mut s = EventSource::new(DriveMode::Streaming, []);
        assert!(s.push(ev(1)));
        assert!(s.push(ev(2)));
        assert_eq!(s.pending(), 2);
        assert_eq!(s.next_event(), Some(ev(1)));
        assert_eq!(s.next_event(), Some(ev(2)));
        assert_eq!(s.next_event(), None);
    }

    #[test]
    fn streaming_can_be_seeded() {
        let mut s = EventSource::new(DriveMode::Streaming, [ev(5)]);
        s.push(ev(6));
        assert_eq!(s.next_event(), Some(ev(5)));
        assert_eq!(s.next_event(), Some(ev(6)));
    }

    #[test]
    fn replay_ignores_pushes_and_runs_out() {
        let mut s = EventSource::new(DriveMode::Replay, [ev(1), ev(2)]);
        assert_eq!(s.mode(), DriveMode::Replay);
        assert!(!s.push(ev(9)));
        assert_eq!(s.next_event(), Some(ev(1)));
        assert_eq!(s.pending(), 1);
        assert_eq!(s.next_event(), Some(ev(2)));
        assert_eq!(s.next_event(), None);
        assert_eq!(s.next_event(), None);
        assert_eq!(s.pending(), 0);
    }
}
