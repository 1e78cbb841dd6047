// SPDX-License-Identifier: MIT OR Apache-2.0

//! Finished-record type handed to sinks.
//!
//! This module defines [`LogRecord`], the data structure that accumulates
//! message parts while a statement is being built and is then delivered to
//! the installed sink as one unit. Parts are stored separately and only
//! joined when a sink renders the record, so building a record never
//! re-concatenates what was already written.
//!
//! # Usage pattern
//!
//! 1. Create a new `LogRecord` with a severity, a requested verbosity and a
//!    source location.
//! 2. Progressively add message parts using `log()` or `log_owned()`.
//! 3. Hand the finished record to [`sink::dispatch`](crate::sink::dispatch).
//!
//! Most code never does this directly: the statement macros and
//! [`LogStatement`](crate::LogStatement) drive the whole cycle.
//!
//! # Example
//!
//! ```rust
//! use simlog::{LogRecord, Severity, Verbosity};
//!
//! let mut record = LogRecord::new(Severity::Info, Verbosity::Info.value(), file!(), line!());
//! record.log("processing request ");
//! record.log_owned(format!("#{}", 42));
//!
//! assert_eq!(record.to_string(), "processing request #42");
//! assert_eq!(record.category_or_default(), "sim");
//! ```

use crate::severity::Severity;
use std::fmt::Display;

/// Category name substituted at render time when a record carries none.
pub const DEFAULT_CATEGORY: &str = "sim";

/**
One finished (or in-flight) diagnostic record.

A record carries the classification decided at the call site together with
the accumulated message text. The message is a sequence of parts written in
order; [`Display`] joins them without separators.

The requested verbosity is kept as a raw integer rather than a
[`Verbosity`](crate::Verbosity) so host runtimes that gate on their own
integer scales can pass their values through unchanged.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogRecord {
    pub(crate) parts: Vec<String>,
    pub(crate) category: Option<String>,
    severity: Severity,
    verbosity: i32,
    file: &'static str,
    line: u32,
}

impl LogRecord {
    pub fn new(severity: Severity, verbosity: i32, file: &'static str, line: u32) -> Self {
        Self {
            parts: Vec::new(),
            category: None,
            severity,
            verbosity,
            file,
            line,
        }
    }

    /**
    Append the message to the record.

    This is called in the case that a message is not already owned.
    */
    pub fn log(&mut self, message: &str) {
        self.parts.push(message.to_string());
    }

    /**
    Append the message to the record, taking ownership of the message.

    This is useful for messages that are already owned, such as those that are
    constructed in the process of logging.
    */
    pub fn log_owned(&mut self, message: String) {
        self.parts.push(message);
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Requested verbosity as a raw integer.
    pub fn verbosity(&self) -> i32 {
        self.verbosity
    }

    /// Category tag, if one was set.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Category tag, falling back to [`DEFAULT_CATEGORY`] when unset.
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    /// Source file of the statement that produced this record.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Source line of the statement that produced this record.
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl Default for LogRecord {
    fn default() -> Self {
        Self::new(Severity::Info, crate::Verbosity::Info.value(), "", 0)
    }
}

impl Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for part in &self.parts {
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}
/*
Boilerplate notes for LogRecord:

IMPLEMENTED:
- Debug: Derived - essential for diagnostics
- Clone: Derived - useful for record duplication/forwarding
- PartialEq/Eq: Derived - enables record comparison in tests and deduplication
- Hash: Derived - consistent with Eq, enables use in hash collections
- Default: Implemented - empty Info record with a blank location; exists so a
  record can be taken out of a container cheaply
- Display: Implemented - joins message parts for output

NOT IMPLEMENTED:
- Copy: Vec<String> contains heap-allocated data, not suitable for Copy
- Ord/PartialOrd: severity ordering alone is not a meaningful record ordering
- From/Into: no obvious conversions to/from other types
- AsRef/AsMut: no clear underlying type to reference
- Deref: must deref to a pointer type, which LogRecord doesn't naturally provide

AUTOMATIC:
- Send: Automatically implemented - all fields are Send
- Sync: NOT automatically relevant - records are owned by one thread while
  being built and handed to the sink by value
*/
