// SPDX-License-Identifier: MIT OR Apache-2.0

//! Simulation-time hook for rendered records.
//!
//! Simulated time belongs to the host runtime, not to this crate, so the
//! console sink asks an installable [`TimeSource`] for it at render time.
//! Hosts install their own source via [`set_time_source`]; until then the
//! default [`UptimeSource`] reports elapsed wall time since the first
//! rendered record, which keeps standalone output readable.

use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

pub trait TimeSource: std::fmt::Debug + Send + Sync {
    /**
    Current simulated time, already formatted for display.

    Returning `None` omits the simulated-time column entirely, even when the
    configuration asks for it.
    */
    fn simulated_time(&self) -> Option<String>;

    /**
    Current delta cycle, for hosts that track one.
    */
    fn delta_cycle(&self) -> Option<u64> {
        None
    }
}

static TIME_SOURCE: OnceLock<RwLock<Arc<dyn TimeSource>>> = OnceLock::new();

fn time_source_slot() -> &'static RwLock<Arc<dyn TimeSource>> {
    TIME_SOURCE.get_or_init(|| RwLock::new(Arc::new(UptimeSource::new())))
}

/// Installs the source consulted for simulated time and delta cycles.
pub fn set_time_source(source: Arc<dyn TimeSource>) {
    *time_source_slot().write() = source;
}

/// Handle to the installed time source.
pub fn current_time_source() -> Arc<dyn TimeSource> {
    time_source_slot().read().clone()
}

static FIRST_RECORD: OnceLock<Instant> = OnceLock::new();

fn first_record_instant() -> Instant {
    *FIRST_RECORD.get_or_init(Instant::now)
}

/**
Fallback time source reporting elapsed time since the first rendered record.
*/
#[derive(Debug, Clone)]
pub struct UptimeSource {}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// Design decisions for UptimeSource trait implementations:
//
// - Debug/Clone: Already derived - appropriate for zero-sized struct
// - Copy: Implemented - safe for zero-sized struct with no heap allocation
// - PartialEq/Eq: Implemented - all instances are equivalent (zero-sized)
// - Hash: Implemented - consistent with Eq
// - Default: Implemented - provides convenient zero-argument constructor
// - Display: NOT implemented - the formatted output lives in simulated_time
// - Send/Sync: Automatically implemented - zero-sized struct is always thread-safe

impl Copy for UptimeSource {}

impl PartialEq for UptimeSource {
    fn eq(&self, _other: &Self) -> bool {
        // All instances of a zero-sized struct are equal
        true
    }
}

impl Eq for UptimeSource {}

impl std::hash::Hash for UptimeSource {
    fn hash<H: std::hash::Hasher>(&self, _state: &mut H) {
        // Zero-sized struct has no data to hash - this is consistent with Eq
    }
}

impl Default for UptimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl UptimeSource {
    pub const fn new() -> Self {
        Self {}
    }
}

impl TimeSource for UptimeSource {
    fn simulated_time(&self) -> Option<String> {
        Some(format!("{:?}", first_record_instant().elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_source_always_reports() {
        let source = UptimeSource::new();
        assert!(source.simulated_time().is_some());
        assert_eq!(source.delta_cycle(), None);
    }

    #[test]
    fn installed_source_is_consulted() {
        #[derive(Debug)]
        struct FixedTime;
        impl TimeSource for FixedTime {
            fn simulated_time(&self) -> Option<String> {
                Some("4 ns".to_string())
            }
            fn delta_cycle(&self) -> Option<u64> {
                Some(12)
            }
        }

        set_time_source(Arc::new(FixedTime));
        let source = current_time_source();
        assert_eq!(source.simulated_time().as_deref(), Some("4 ns"));
        assert_eq!(source.delta_cycle(), Some(12));

        set_time_source(Arc::new(UptimeSource::new()));
    }
}
