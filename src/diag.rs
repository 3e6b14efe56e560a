//! Injected diagnostic sink for simulation components.
//!
//! The core never touches process-wide logging state directly. Components
//! that emit diagnostics take a `&mut dyn DiagnosticSink`, so embedders can
//! route messages to the `log` facade, capture them, or drop them.

use log::Level;

/// Capability interface for recording diagnostic messages.
pub trait DiagnosticSink {
    /// Records one message at the given level.
    fn record(&mut self, level: Level, message: &str);
}

/// Sink that forwards every record to the `log` facade.
///
/// The binary initializes `env_logger`; library consumers may install any
/// `log`-compatible backend instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&mut self, level: Level, message: &str) {
        log::log!(level, "{message}");
    }
}

/// Sink that discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn record(&mut self, _level: Level, _message: &str) {}
}

/// Sink that keeps every record in memory, in arrival order.
///
/// Useful in tests asserting that a component emitted (or did not emit) a
/// particular diagnostic.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    /// Recorded `(level, message)` pairs, oldest first.
    pub records: Vec<(Level, String)>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when any record at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.records
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&mut self, level: Level, message: &str) {
        self.records.push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_keeps_records_in_order() {
        let mut sink = MemorySink::new();
        sink.record(Level::Debug, "first");
        sink.record(Level::Info, "second");
        assert_eq!(sink.records.len(), 2);
        assert_eq!(sink.records[0], (Level::Debug, "first".to_string()));
        assert_eq!(sink.records[1], (Level::Info, "second".to_string()));
    }

    #[test]
    fn memory_sink_contains_matches_level_and_substring() {
        let mut sink = MemorySink::new();
        sink.record(Level::Debug, "hit limit");
        assert!(sink.contains(Level::Debug, "limit"));
        assert!(!sink.contains(Level::Info, "limit"));
        assert!(!sink.contains(Level::Debug, "overflow"));
    }

    #[test]
    fn null_sink_discards() {
        let mut sink = NullSink;
        sink.record(Level::Error, "nothing happens");
    }
}
