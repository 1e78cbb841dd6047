// SPDX-License-Identifier: MIT OR Apache-2.0

//! The delivery boundary and the globally installed sink.
//!
//! Everything the crate emits funnels through one process-wide sink. The
//! slot initializes lazily with a synchronous [`ConsoleSink`] so logging
//! works out of the box, and [`install_sink`] swaps in whatever the host
//! prefers. The previous sink stays alive until in-flight deliveries that
//! cloned its handle have finished, then drops normally.
//!
//! # Thread safety
//!
//! The slot is behind a reader-writer lock held only long enough to clone or
//! replace the handle. Delivery itself happens after the lock is released,
//! so a slow sink never blocks reconfiguration.
//!
//! # Examples
//!
//! ```
//! use simlog::{install_sink, InMemorySink};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(InMemorySink::new());
//! install_sink(sink.clone());
//!
//! simlog::warn!("captured in memory");
//! // the record is now in `sink` instead of on stderr
//! ```

use crate::console_sink::ConsoleSink;
use crate::record::LogRecord;
use crate::severity::Severity;
use parking_lot::RwLock;
use std::fmt::Debug;
use std::sync::{Arc, OnceLock};

pub trait ReportSink: Debug + Send + Sync {
    /**
    Consumes one finished record.

    Called concurrently from any thread that finishes a statement, so
    implementations synchronize internally. Delivery may be deferred (queued
    to a worker), as long as [`flush`](Self::flush) can force completion.
    */
    fn deliver(&self, record: LogRecord);

    /**
    Blocks until every record previously passed to [`deliver`](Self::deliver)
    is fully written out.

    Fatal records are flushed through automatically; hosts that buffer should
    also call this before process exit.
    */
    fn flush(&self);
}

/*
Boilerplate notes.

# ReportSink

Clone on a sink trait object makes no sense; sinks own unique resources.
PartialEq/Eq are possible but it's unclear whether we'd mean data equality or
provenance, so neither is required.
Ord makes no sense.
Default is not necessarily sensible since sink construction may need a file
path or a channel.
Display is not very sensible.
Debug is required so a misbehaving sink can at least be named in diagnostics.
Send/Sync are required: the whole point of the global slot is cross-thread
delivery.
*/

/// Static storage for the installed sink.
static GLOBAL_SINK: OnceLock<RwLock<Arc<dyn ReportSink>>> = OnceLock::new();

fn global_sink() -> &'static RwLock<Arc<dyn ReportSink>> {
    GLOBAL_SINK.get_or_init(|| {
        // First touch installs a synchronous console sink.
        RwLock::new(Arc::new(ConsoleSink::default()))
    })
}

/// Handle to the currently installed sink.
///
/// The handle keeps the sink alive even if another thread replaces it
/// mid-delivery.
pub fn current_sink() -> Arc<dyn ReportSink> {
    global_sink().read().clone()
}

/// Replaces the installed sink.
///
/// Records already being delivered to the previous sink complete against it;
/// everything after the swap goes to `sink`.
pub fn install_sink(sink: Arc<dyn ReportSink>) {
    *global_sink().write() = sink;
}

/// Flushes the installed sink.
pub fn flush() {
    current_sink().flush();
}

/// Hands a finished record to the installed sink.
///
/// Fatal records are flushed through before this returns, so a host that
/// terminates right after a fatal report cannot lose it.
pub fn dispatch(record: LogRecord) {
    let sink = current_sink();
    let fatal = record.severity() == Severity::Fatal;
    sink.deliver(record);
    if fatal {
        sink.flush();
    }
}

#[cfg(test)]
pub(crate) static TEST_SINK_GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory_sink::InMemorySink;
    use crate::verbosity::Verbosity;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct FlushCounter {
        delivered: AtomicUsize,
        flushes: AtomicUsize,
    }

    impl ReportSink for FlushCounter {
        fn deliver(&self, _record: LogRecord) {
            self.delivered.fetch_add(1, Ordering::SeqCst);
        }
        fn flush(&self) {
            self.flushes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn install_replaces_the_sink() {
        let _guard = TEST_SINK_GUARD.lock().unwrap();
        let sink = Arc::new(InMemorySink::new());
        install_sink(sink.clone());

        dispatch(LogRecord::new(
            Severity::Warning,
            Verbosity::Warning.value(),
            file!(),
            line!(),
        ));
        assert_eq!(sink.drain().len(), 1);
    }

    #[test]
    fn fatal_records_flush_through() {
        let _guard = TEST_SINK_GUARD.lock().unwrap();
        let counter = Arc::new(FlushCounter::default());
        install_sink(counter.clone());

        dispatch(LogRecord::new(
            Severity::Error,
            Verbosity::Error.value(),
            file!(),
            line!(),
        ));
        assert_eq!(counter.flushes.load(Ordering::SeqCst), 0);

        dispatch(LogRecord::new(
            Severity::Fatal,
            Verbosity::Fatal.value(),
            file!(),
            line!(),
        ));
        assert_eq!(counter.delivered.load(Ordering::SeqCst), 2);
        assert_eq!(counter.flushes.load(Ordering::SeqCst), 1);

        install_sink(Arc::new(InMemorySink::new()));
    }

    #[test]
    fn current_sink_outlives_a_swap() {
        let _guard = TEST_SINK_GUARD.lock().unwrap();
        let first = Arc::new(InMemorySink::new());
        install_sink(first.clone());

        let held = current_sink();
        install_sink(Arc::new(InMemorySink::new()));

        // the held handle still accepts records even though it was replaced
        held.deliver(LogRecord::new(
            Severity::Warning,
            Verbosity::Warning.value(),
            file!(),
            line!(),
        ));
        assert_eq!(first.drain().len(), 1);
    }
}
