// SPDX-License-Identifier: MIT OR Apache-2.0

//! The verbosity scale and its string and integer conversions.
//!
//! Verbosity is the unit of threshold configuration: the registry stores one
//! [`Verbosity`] per category plus a global fallback, and every tiered
//! statement carries the level it was requested at. The scale is dense, so
//! the raw integer values exchanged with a host runtime are simply the
//! declaration ordinals.

use crate::severity::Severity;
use std::fmt::Display;
use std::str::FromStr;

/// Requested detail level of a statement, and the unit of threshold
/// configuration.
///
/// Ordering follows declaration order. [`None`](Verbosity::None) as a
/// threshold suppresses all tiered output and
/// [`TraceAll`](Verbosity::TraceAll) permits everything. A tiered statement
/// is delivered when its level is at or below the effective threshold of its
/// category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Verbosity {
    /// Threshold that suppresses every tiered statement
    None,
    /// Tier of fatal-class forwarding
    Fatal,
    /// Tier of error-class forwarding
    Error,
    /// Tier of warning-class forwarding; the default global threshold
    Warning,
    /// Routine progress output
    Info,
    /// Detail interesting while debugging a component
    Debug,
    /// Per-operation tracing
    Trace,
    /// Everything, including output too noisy for ordinary tracing
    TraceAll,
}

impl Verbosity {
    /// Alias for the most detailed tracing tier.
    pub const DBG_TRACE: Verbosity = Verbosity::TraceAll;

    /// Every level, in ascending order.
    pub const ALL: [Verbosity; 8] = [
        Verbosity::None,
        Verbosity::Fatal,
        Verbosity::Error,
        Verbosity::Warning,
        Verbosity::Info,
        Verbosity::Debug,
        Verbosity::Trace,
        Verbosity::TraceAll,
    ];

    /// Canonical all-caps name, also accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Verbosity::None => "NONE",
            Verbosity::Fatal => "FATAL",
            Verbosity::Error => "ERROR",
            Verbosity::Warning => "WARNING",
            Verbosity::Info => "INFO",
            Verbosity::Debug => "DEBUG",
            Verbosity::Trace => "TRACE",
            Verbosity::TraceAll => "TRACEALL",
        }
    }

    /// Raw integer value exchanged with host runtimes.
    pub const fn value(self) -> i32 {
        self as i32
    }

    /// Exact-step lookup of [`value`](Self::value). Out-of-range input yields
    /// `None`.
    pub const fn from_value(value: i32) -> Option<Verbosity> {
        match value {
            0 => Some(Verbosity::None),
            1 => Some(Verbosity::Fatal),
            2 => Some(Verbosity::Error),
            3 => Some(Verbosity::Warning),
            4 => Some(Verbosity::Info),
            5 => Some(Verbosity::Debug),
            6 => Some(Verbosity::Trace),
            7 => Some(Verbosity::TraceAll),
            _ => None,
        }
    }

    /// Severity a record at this level carries when it reaches the sink.
    ///
    /// [`Fatal`](Verbosity::Fatal), [`Error`](Verbosity::Error) and
    /// [`Warning`](Verbosity::Warning) map to their mirror severity;
    /// everything else is [`Severity::Info`].
    pub const fn severity(self) -> Severity {
        match self {
            Verbosity::Fatal => Severity::Fatal,
            Verbosity::Error => Severity::Error,
            Verbosity::Warning => Severity::Warning,
            _ => Severity::Info,
        }
    }

    /// True when a statement at this level passes a threshold of `threshold`.
    pub const fn enabled_at(self, threshold: Verbosity) -> bool {
        self as u8 <= threshold as u8
    }
}

/// Token rejected by [`Verbosity::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized verbosity level {0:?}")]
pub struct ParseVerbosityError(pub String);

impl FromStr for Verbosity {
    type Err = ParseVerbosityError;

    /// Case-sensitive match against the canonical all-caps names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(Verbosity::None),
            "FATAL" => Ok(Verbosity::Fatal),
            "ERROR" => Ok(Verbosity::Error),
            "WARNING" => Ok(Verbosity::Warning),
            "INFO" => Ok(Verbosity::Info),
            "DEBUG" => Ok(Verbosity::Debug),
            "TRACE" => Ok(Verbosity::Trace),
            "TRACEALL" => Ok(Verbosity::TraceAll),
            other => Err(ParseVerbosityError(other.to_string())),
        }
    }
}

impl Display for Verbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_canonical_names() {
        for level in Verbosity::ALL {
            let parsed: Verbosity = level.to_string().parse().expect("canonical name parses");
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("warning".parse::<Verbosity>().is_err());
        assert!("Trace".parse::<Verbosity>().is_err());
        assert_eq!(
            "bogus".parse::<Verbosity>(),
            Err(ParseVerbosityError("bogus".to_string()))
        );
    }

    #[test]
    fn ordering_is_total_and_ascending() {
        for pair in Verbosity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(Verbosity::None < Verbosity::TraceAll);
    }

    #[test]
    fn value_round_trips() {
        for level in Verbosity::ALL {
            assert_eq!(Verbosity::from_value(level.value()), Some(level));
        }
        assert_eq!(Verbosity::from_value(-1), None);
        assert_eq!(Verbosity::from_value(8), None);
    }

    #[test]
    fn tracing_alias() {
        assert_eq!(Verbosity::DBG_TRACE, Verbosity::TraceAll);
    }

    #[test]
    fn severity_mapping() {
        assert_eq!(Verbosity::Fatal.severity(), Severity::Fatal);
        assert_eq!(Verbosity::Error.severity(), Severity::Error);
        assert_eq!(Verbosity::Warning.severity(), Severity::Warning);
        assert_eq!(Verbosity::Info.severity(), Severity::Info);
        assert_eq!(Verbosity::TraceAll.severity(), Severity::Info);
    }

    #[test]
    fn threshold_comparison() {
        assert!(Verbosity::Info.enabled_at(Verbosity::Info));
        assert!(Verbosity::Info.enabled_at(Verbosity::TraceAll));
        assert!(!Verbosity::Debug.enabled_at(Verbosity::Info));
        assert!(!Verbosity::Fatal.enabled_at(Verbosity::None));
    }
}
