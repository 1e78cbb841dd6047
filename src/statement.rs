// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
Scope-flushed statement builder.

A [`LogStatement`] is created for exactly one log call, accumulates message
text through [`std::fmt::Write`], and delivers exactly one finished
[`LogRecord`](crate::LogRecord) to the installed sink when it goes out of
scope. Delivery happens on every exit path, including early returns, `?`
propagation and panic unwinding.

Severity is fixed by which constructor runs. The tiered constructor
([`LogStatement::info`]) additionally carries the verbosity the statement was
requested at; call sites are expected to check
[`registry::statement_enabled`](crate::registry::statement_enabled) before
constructing a tiered statement, which is exactly what the crate macros do.
*/

use crate::record::LogRecord;
use crate::severity::Severity;
use crate::verbosity::Verbosity;
use std::fmt;

/**
A single in-flight log statement.

Text accumulates through the [`fmt::Write`] impl; the category tag is
chainable and the last call wins. The statement is single-owner and
single-use: there is no way to copy one, and dropping it is what delivers
the record.

# Example

```rust
use simlog::LogStatement;
use std::fmt::Write as _;

let mut statement = LogStatement::warning(file!(), line!()).category("BUS");
let _ = write!(statement, "request {} stalled", 7);
// the record is delivered here, when `statement` drops
```
*/
#[derive(Debug)]
pub struct LogStatement {
    record: LogRecord,
}

impl LogStatement {
    /// Statement delivered at [`Severity::Fatal`]. Never filtered.
    pub fn fatal(file: &'static str, line: u32) -> Self {
        Self {
            record: LogRecord::new(Severity::Fatal, Verbosity::Fatal.value(), file, line),
        }
    }

    /// Statement delivered at [`Severity::Error`]. Never filtered.
    pub fn error(file: &'static str, line: u32) -> Self {
        Self {
            record: LogRecord::new(Severity::Error, Verbosity::Error.value(), file, line),
        }
    }

    /// Statement delivered at [`Severity::Warning`]. Never filtered.
    pub fn warning(file: &'static str, line: u32) -> Self {
        Self {
            record: LogRecord::new(Severity::Warning, Verbosity::Warning.value(), file, line),
        }
    }

    /// Tiered statement delivered at [`Severity::Info`], requested at
    /// `verbosity`.
    ///
    /// Constructing one bypasses no filtering by itself. Check
    /// [`registry::statement_enabled`](crate::registry::statement_enabled)
    /// first, or use the crate macros which do.
    pub fn info(file: &'static str, line: u32, verbosity: i32) -> Self {
        Self {
            record: LogRecord::new(Severity::Info, verbosity, file, line),
        }
    }

    /// Tags the statement with a category. Chainable; the last call wins.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.record.category = Some(category.into());
        self
    }

    /// Returns the statement to the untagged state, so the record renders
    /// under the default category.
    pub fn clear_category(mut self) -> Self {
        self.record.category = None;
        self
    }
}

impl fmt::Write for LogStatement {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.record.log(s);
        Ok(())
    }
}

impl Drop for LogStatement {
    /// Delivers the composed record. Runs once, on every exit path.
    fn drop(&mut self) {
        crate::sink::dispatch(std::mem::take(&mut self.record));
    }
}

/*
Boilerplate notes for LogStatement:

1.  Copy/Clone, no. Two owners would mean two deliveries of the same record.
2.  PartialEq/Ord/Hash, no. Statements are transient and never compared.
3.  Default, no. A statement without a call site is junk; every constructor
    takes file/line.
4.  Display, no. The record displays; the statement is plumbing around it.
5.  From/Into, no. Same call-site argument as Default.
6.  AsRef/AsMut/Deref, no. Exposing the record mutably would invite writes
    that bypass the fmt::Write accounting.
7.  Send: automatic. Sync is irrelevant, a statement never leaves its owner.
*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inmemory_sink::InMemorySink;
    use crate::sink::{TEST_SINK_GUARD, install_sink};
    use std::fmt::Write as _;
    use std::sync::Arc;

    fn capture() -> Arc<InMemorySink> {
        let sink = Arc::new(InMemorySink::new());
        install_sink(sink.clone());
        sink
    }

    #[test]
    fn many_writes_one_record() {
        let _guard = TEST_SINK_GUARD.lock().unwrap();
        let sink = capture();
        {
            let mut statement = LogStatement::warning(file!(), line!());
            let _ = write!(statement, "a");
            let _ = write!(statement, "b{}", 1);
            let _ = write!(statement, "c");
        }
        let records = sink.drain();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].to_string(), "ab1c");
        assert_eq!(records[0].severity(), Severity::Warning);
    }

    #[test]
    fn zero_writes_still_deliver_once() {
        let _guard = TEST_SINK_GUARD.lock().unwrap();
        let sink = capture();
        {
            let _statement = LogStatement::error(file!(), line!());
        }
        let records = sink.drain();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].to_string(), "");
        assert_eq!(records[0].severity(), Severity::Error);
    }

    #[test]
    fn category_is_chainable_and_last_call_wins() {
        let _guard = TEST_SINK_GUARD.lock().unwrap();
        let sink = capture();
        {
            let mut statement = LogStatement::info(file!(), line!(), Verbosity::Info.value())
                .category("BUS")
                .category("CPU");
            let _ = write!(statement, "tagged");
        }
        {
            let mut statement = LogStatement::warning(file!(), line!())
                .category("BUS")
                .clear_category();
            let _ = write!(statement, "untagged");
        }
        let records = sink.drain();
        assert_eq!(records[0].category(), Some("CPU"));
        assert_eq!(records[1].category(), None);
        assert_eq!(records[1].category_or_default(), "sim");
    }

    #[test]
    fn early_return_still_delivers() {
        fn checked(fail: bool) -> Result<(), std::fmt::Error> {
            let mut statement = LogStatement::warning(file!(), line!());
            write!(statement, "checking")?;
            if fail {
                return Err(std::fmt::Error);
            }
            write!(statement, " passed")?;
            Ok(())
        }

        let _guard = TEST_SINK_GUARD.lock().unwrap();
        let sink = capture();

        assert!(checked(true).is_err());
        assert!(checked(false).is_ok());

        let records = sink.drain();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].to_string(), "checking");
        assert_eq!(records[1].to_string(), "checking passed");
    }

    #[test]
    fn delivery_survives_unwinding() {
        let _guard = TEST_SINK_GUARD.lock().unwrap();
        let sink = capture();
        let outcome = std::panic::catch_unwind(|| {
            let mut statement = LogStatement::error(file!(), line!());
            let _ = write!(statement, "before the panic");
            panic!("unwind through the statement");
        });
        assert!(outcome.is_err());
        let records = sink.drain();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].to_string(), "before the panic");
    }

    #[test]
    fn source_location_is_carried() {
        let _guard = TEST_SINK_GUARD.lock().unwrap();
        let sink = capture();
        {
            let _statement = LogStatement::warning("mod.rs", 41);
        }
        let records = sink.drain();
        assert_eq!(records[0].file(), "mod.rs");
        assert_eq!(records[0].line(), 41);
    }
}
