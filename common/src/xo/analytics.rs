use crate::xo::board::Position;
use crate::xo::player::Player;
use std::fmt::Debug;
use tracing::info;

pub const EVENT_BATCH_SIZE: usize = 5;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Event {
    MarkPlaced(Player, Position),
    PlayerWon(Player),
}

impl Event {
    pub fn message(&self) -> String {
        match self {
            Event::MarkPlaced(player, position) => {
                format!("{} set mark at position {}", player, position)
            }
            Event::PlayerWon(player) => format!("{} win", player),
        }
    }
}

// Receives each full batch of rendered event messages, oldest first
pub trait EventSink: Debug {
    fn flush(&mut self, messages: Vec<String>);
}

#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn flush(&mut self, messages: Vec<String>) {
        for message in messages {
            info!(target: "analytics", "{}", message);
        }
    }
}

#[derive(Debug)]
pub struct EventBatcher<S: EventSink> {
    events: Vec<Event>,
    sink: S,
}

impl<S: EventSink> EventBatcher<S> {
    pub fn new(sink: S) -> Self {
        EventBatcher {
            events: Vec::with_capacity(EVENT_BATCH_SIZE),
            sink,
        }
    }

    pub fn record(&mut self, event: Event) {
        self.events.push(event);
        if self.events.len() >= EVENT_BATCH_SIZE {
            let messages = self.events.drain(..).map(|e| e.message()).collect();
            self.sink.flush(messages);
        }
    }

    pub fn pending(&self) -> &[Event] {
        &self.events
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct MockSink {
        batches: Vec<Vec<String>>,
    }

    impl EventSink for MockSink {
        fn flush(&mut self, messages: Vec<String>) {
            self.batches.push(messages);
        }
    }

    fn mark(row: usize, column: usize) -> Event {
        Event::MarkPlaced(Player::First, Position::new(row, column).unwrap())
    }

    #[test]
    fn test_four_events_do_not_flush() {
        let mut batcher = EventBatcher::new(MockSink::default());
        for i in 0..4 {
            batcher.record(mark(0, i % 3));
        }
        assert!(batcher.sink().batches.is_empty());
        assert_eq!(batcher.pending().len(), 4);
    }

    #[test]
    fn test_fifth_event_flushes_once() {
        let mut batcher = EventBatcher::new(MockSink::default());
        for i in 0..4 {
            batcher.record(mark(1, i % 3));
        }
        batcher.record(Event::PlayerWon(Player::Second));
        assert_eq!(batcher.sink().batches.len(), 1);
        assert!(batcher.pending().is_empty());
        let batch = &batcher.sink().batches[0];
        assert_eq!(batch.len(), 5);
        assert_eq!(batch[0], "first set mark at position (row 1, column 0)");
        assert_eq!(batch[4], "second win");
    }

    #[test]
    fn test_batches_keep_order() {
        let mut batcher = EventBatcher::new(MockSink::default());
        for i in 0..11 {
            batcher.record(mark(i / 3 % 3, i % 3));
        }
        assert_eq!(batcher.sink().batches.len(), 2);
        assert_eq!(batcher.pending().len(), 1);
        assert_eq!(
            batcher.sink().batches[1][0],
            "first set mark at position (row 1, column 2)"
        );
    }
}
