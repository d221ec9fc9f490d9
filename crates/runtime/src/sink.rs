//! Log sink that forwards battle narration to the event bus.

use battle_core::{LogEntry, LogSink};
use tracing::{debug, warn};

use crate::events::{Event, EventBus, LogEvent};

/// Publishes every entry on [`crate::Topic::Log`], numbered in emission order.
///
/// Error-kind entries are also reported through `tracing` at WARN.
pub struct BusSink {
    bus: EventBus,
    next_seq: u64,
}

impl BusSink {
    pub fn new(bus: EventBus) -> Self {
        Self { bus, next_seq: 0 }
    }

    /// Number of entries published so far.
    pub fn published(&self) -> u64 {
        self.next_seq
    }
}

impl LogSink for BusSink {
    fn push(&mut self, entry: LogEntry) {
        if entry.is_error() {
            warn!(target: "runtime::battle_log", "{}", entry.message);
        } else {
            debug!(target: "runtime::battle_log", "{}", entry.message);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.bus.publish(Event::Log(LogEvent { seq, entry }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Topic;

    #[tokio::test]
    async fn entries_are_numbered_in_order() {
        let bus = EventBus::with_capacity(8);
        let mut rx = bus.subscribe(Topic::Log);
        let mut sink = BusSink::new(bus);

        sink.push(LogEntry::info("Battle Start!"));
        sink.push(LogEntry::error("no combatant could act after 10 turn checks"));

        let Event::Log(first) = rx.recv().await.unwrap() else {
            panic!("expected a log event");
        };
        let Event::Log(second) = rx.recv().await.unwrap() else {
            panic!("expected a log event");
        };
        assert_eq!(first.seq, 0);
        assert_eq!(first.entry.message, "Battle Start!");
        assert_eq!(second.seq, 1);
        assert!(second.entry.is_error());
        assert_eq!(sink.published(), 2);
    }
}
