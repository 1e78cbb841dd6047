// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-wide verbosity thresholds.
//!
//! The registry holds one global threshold plus a map of per-category
//! overrides. Every potential tiered statement consults it before anything
//! is constructed, so reads are the hot path and writes are expected only at
//! startup or configuration-reload time.
//!
//! # Architecture
//!
//! The global threshold is a single atomic; the override map sits behind a
//! reader-writer lock so any number of call sites can check levels
//! concurrently while reconfiguration takes the write side. No lock is held
//! while a record is delivered.
//!
//! # Pre-initialization behavior
//!
//! Before [`init_logging`](crate::init_logging) runs, reads see a global
//! threshold of [`Verbosity::Warning`] and an empty override map. Logging
//! before initialization is therefore safe, just quiet.
//!
//! # Examples
//!
//! ```
//! use simlog::{registry, Verbosity};
//!
//! registry::set_global_level(Verbosity::Warning);
//! registry::set_category_override("BUS", Verbosity::Debug);
//!
//! assert_eq!(registry::effective_level(Some("BUS")), Verbosity::Debug);
//! assert_eq!(registry::effective_level(Some("CPU")), Verbosity::Warning);
//! assert_eq!(registry::effective_level(None), Verbosity::Warning);
//! # registry::clear_category_overrides();
//! ```

use crate::verbosity::Verbosity;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

/// Threshold used when a category has no override.
static GLOBAL_LEVEL: AtomicU8 = AtomicU8::new(Verbosity::Warning as u8);

/// Static storage for the per-category override map.
static CATEGORY_OVERRIDES: OnceLock<RwLock<HashMap<String, Verbosity>>> = OnceLock::new();

fn category_overrides() -> &'static RwLock<HashMap<String, Verbosity>> {
    CATEGORY_OVERRIDES.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Replaces the global threshold. Always succeeds.
pub fn set_global_level(level: Verbosity) {
    GLOBAL_LEVEL.store(level as u8, Ordering::Release);
}

/// Current global threshold.
pub fn global_level() -> Verbosity {
    Verbosity::from_value(GLOBAL_LEVEL.load(Ordering::Acquire) as i32)
        .unwrap_or(Verbosity::Warning)
}

/// Sets the global threshold from a raw host-runtime integer.
///
/// Out-of-range values clamp to the nearest defined level, so a host asking
/// for "more than everything" lands on [`Verbosity::TraceAll`] and negative
/// values land on [`Verbosity::None`].
pub fn set_global_verbosity(value: i32) {
    let clamped = value.clamp(Verbosity::None.value(), Verbosity::TraceAll.value());
    if let Some(level) = Verbosity::from_value(clamped) {
        set_global_level(level);
    }
}

/// Current global threshold as a raw host-runtime integer.
pub fn global_verbosity() -> i32 {
    global_level().value()
}

/// Registers a per-category override that wins over the global threshold.
///
/// Overrides are consulted by exact category name. Registering a second
/// override for the same category replaces the first.
pub fn set_category_override(category: impl Into<String>, level: Verbosity) {
    category_overrides().write().insert(category.into(), level);
}

/// Removes one category override, restoring the global threshold for it.
pub fn clear_category_override(category: &str) {
    category_overrides().write().remove(category);
}

/// Removes every category override.
pub fn clear_category_overrides() {
    category_overrides().write().clear();
}

/// Effective threshold for a category: its override if one is registered,
/// else the global threshold. `None` always reads the global threshold.
pub fn effective_level(category: Option<&str>) -> Verbosity {
    if let Some(category) = category {
        if let Some(level) = category_overrides().read().get(category) {
            return *level;
        }
    }
    global_level()
}

/// The call-site gate for tiered statements: true when a statement requested
/// at `requested` passes the effective threshold of `category`.
///
/// `requested` is a raw integer so hosts can gate on values obtained from
/// [`Verbosity::value`] or from their own configuration plumbing.
#[inline]
pub fn statement_enabled(category: Option<&str>, requested: i32) -> bool {
    requested <= effective_level(category).value()
}

#[cfg(test)]
pub(crate) static TEST_REGISTRY_GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());
