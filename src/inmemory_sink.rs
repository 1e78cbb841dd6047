// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Sink
//!
//! This module provides an in-memory delivery target for testing and
//! debugging purposes. The `InMemorySink` captures log records in memory
//! rather than rendering them to stderr, making it ideal for:
//!
//! - Unit testing code that logs through this crate
//! - Capturing records in environments where stderr is redirected
//! - Programmatically examining what a component reported
//!
//! ## Architecture
//!
//! The sink stores whole [`LogRecord`] values behind a mutex, not rendered
//! strings, so tests can assert on severity, verbosity, and category as well
//! as on message text.

use crate::record::LogRecord;
use crate::sink::ReportSink;
use parking_lot::Mutex;

/// A sink that stores every delivered record in a `Vec<LogRecord>`.
///
/// Install it globally to capture everything the macros produce, or hand it
/// records directly through [`ReportSink::deliver`].
///
/// # Example
///
/// ```rust
/// use simlog::{InMemorySink, LogRecord, ReportSink, Severity, Verbosity};
///
/// let sink = InMemorySink::new();
/// let mut record = LogRecord::new(Severity::Info, Verbosity::Info.value(), file!(), line!());
/// record.log("captured");
/// sink.deliver(record);
///
/// assert!(sink.drain_messages().contains("captured"));
/// ```
///
/// # Testing Example
///
/// For test isolation, install the sink, run the code under test, then
/// examine the buffer:
///
/// ```rust,no_run
/// use simlog::InMemorySink;
/// use std::sync::Arc;
///
/// let sink = Arc::new(InMemorySink::new());
/// simlog::install_sink(sink.clone());
///
/// simlog::warn!("suspicious timing on channel {}", 3);
///
/// let logs = sink.drain_messages();
/// assert!(logs.contains("suspicious timing on channel 3"));
/// ```
#[derive(Debug)]
pub struct InMemorySink {
    records: Mutex<Vec<LogRecord>>,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// Design decisions for InMemorySink trait implementations:
//
// - Debug: Derived for diagnostic purposes and required by ReportSink
// - Default: Implemented with obvious zero-value (empty record buffer)
// - Clone: NOT implemented - a clone would capture into a separate buffer,
//   which is never what a test wants; share via Arc instead
// - PartialEq/Eq: NOT implemented - equality semantics unclear for sinks,
//   and mutex state comparison is problematic
// - Hash: NOT implemented - requires Eq, and sinks shouldn't be hash keys
// - Display: NOT implemented - no meaningful display representation
// - Send/Sync: Automatically implemented due to Mutex usage (required for ReportSink)

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySink {
    /// Creates a new `InMemorySink` with an empty record buffer.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// Clones the records captured so far, leaving the buffer intact.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Takes all captured records, clearing the buffer.
    pub fn drain(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    /// Drains all captured records into a single string, one message per
    /// line, clearing the buffer.
    ///
    /// Only the message text is included. For severity, category, or
    /// location, use [`drain`](Self::drain) and inspect the records.
    pub fn drain_messages(&self) -> String {
        self.drain()
            .iter()
            .map(|record| record.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ReportSink for InMemorySink {
    fn deliver(&self, record: LogRecord) {
        self.records.lock().push(record);
    }

    fn flush(&self) {
        // Records are visible to readers as soon as deliver returns.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;
    use crate::verbosity::Verbosity;

    fn record(message: &str) -> LogRecord {
        let mut record = LogRecord::new(Severity::Info, Verbosity::Info.value(), file!(), line!());
        record.log(message);
        record
    }

    #[test]
    fn records_accumulate_until_drained() {
        let sink = InMemorySink::new();
        sink.deliver(record("one"));
        sink.deliver(record("two"));

        assert_eq!(sink.records().len(), 2);
        assert_eq!(sink.drain_messages(), "one\ntwo");
        assert!(sink.records().is_empty());
    }

    #[test]
    fn drain_preserves_delivery_order() {
        let sink = InMemorySink::new();
        for n in 0..5 {
            sink.deliver(record(&n.to_string()));
        }
        let messages: Vec<String> = sink.drain().iter().map(|r| r.to_string()).collect();
        assert_eq!(messages, ["0", "1", "2", "3", "4"]);
    }
}
