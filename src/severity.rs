// SPDX-License-Identifier: MIT OR Apache-2.0

//! Severity classification for delivered records.

use std::fmt::Display;

/// Fixed-at-call-site classification of a record.
///
/// The severity is chosen by which [`LogStatement`](crate::LogStatement)
/// constructor runs and never changes afterward. Sink-side policy (label,
/// color, whether the source location is shown, whether the host terminates)
/// keys off this value. Ordering follows declaration order, so
/// `severity >= Severity::Warning` selects the always-delivered classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Routine output, further subdivided by [`Verbosity`](crate::Verbosity) tiers
    Info,
    /// Suspicious condition, delivered regardless of verbosity
    Warning,
    /// Runtime error, delivered regardless of verbosity
    Error,
    /// Unrecoverable error; flushed through the sink before control returns
    Fatal,
}

impl Severity {
    /// Canonical all-caps name.
    pub const fn name(self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
