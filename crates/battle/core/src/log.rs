//! Battle log entries, the fixed-capacity ring log and the outbound sink.

use std::collections::VecDeque;

/// Whether an entry is a regular battle message or an engine failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogKind {
    Info,
    Error,
}

/// One line of battle narration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: LogKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: LogKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == LogKind::Error
    }
}

impl core::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Receives every log entry, in order, as the battle produces it.
pub trait LogSink: Send {
    fn push(&mut self, entry: LogEntry);
}

impl LogSink for Vec<LogEntry> {
    fn push(&mut self, entry: LogEntry) {
        Vec::push(self, entry);
    }
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn push(&mut self, _entry: LogEntry) {}
}

/// The most recent entries; the oldest is discarded once capacity is exceeded.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl BattleLog {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_discards_oldest() {
        let mut log = BattleLog::with_capacity(10);
        for i in 0..12 {
            log.push(LogEntry::info(format!("line {i}")));
        }

        assert_eq!(log.len(), 10);
        assert_eq!(log.iter().next().map(|e| e.message.as_str()), Some("line 2"));
        assert_eq!(log.last().map(|e| e.message.as_str()), Some("line 11"));
    }
}
