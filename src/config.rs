// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
One-call logging setup.

[`LogConfig`] collects everything configurable about the default console
sink plus the initial global level, with chainable setters over sensible
defaults. [`init_logging`] applies a config: it seeds the verbosity
registry and installs a [`ConsoleSink`](crate::ConsoleSink) built from the
config.

```rust,no_run
use simlog::{init_logging, LogConfig, Verbosity};

init_logging(
    &LogConfig::new()
        .with_level(Verbosity::Debug)
        .with_log_file_path("run.log")
        .with_colored_output(false),
)
.expect("logging setup failed");
```

Calling [`init_logging`] is optional. Without it the first dispatched
record installs a synchronous [`ConsoleSink`](crate::ConsoleSink) with the
defaults below, so a library that logs through this crate works out of the
box inside a host that never configures anything.
*/

use crate::console_sink::ConsoleSink;
use crate::verbosity::Verbosity;
use std::path::PathBuf;

/**
Configuration for [`init_logging`].

Every field is public; the `with_*` setters exist for chaining.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LogConfig {
    /// Initial global verbosity threshold.
    pub level: Verbosity,
    /// Width of the category column in rendered output. Zero omits the
    /// column.
    pub category_field_width: usize,
    /// Prefix each line with the wall-clock time.
    pub print_wall_clock_time: bool,
    /// Prefix each line with the simulated time reported by the installed
    /// [`TimeSource`](crate::TimeSource).
    pub print_simulated_time: bool,
    /// Prefix each line with the delta cycle, when the time source reports
    /// one.
    pub print_delta_cycle: bool,
    /// Include the severity label column.
    pub print_severity: bool,
    /// Colorize the stderr copy of each line. The log file copy is always
    /// plain.
    pub colored_output: bool,
    /// Append a plain-text copy of each line to this file.
    pub log_file_path: Option<PathBuf>,
    /// Only render records whose category matches this regular expression.
    /// Fatal records bypass the filter.
    pub log_filter_pattern: Option<String>,
    /// Hand records to a worker thread instead of rendering on the calling
    /// thread.
    pub async_delivery: bool,
    /// Seed the registry but leave the currently installed sink alone.
    pub suppress_default_sink_setup: bool,
}

impl LogConfig {
    /// The default configuration: warnings and worse to stderr, colored,
    /// with simulated time and a 24-character category column, delivered
    /// through a worker thread.
    pub const fn new() -> Self {
        Self {
            level: Verbosity::Warning,
            category_field_width: 24,
            print_wall_clock_time: false,
            print_simulated_time: true,
            print_delta_cycle: false,
            print_severity: true,
            colored_output: true,
            log_file_path: None,
            log_filter_pattern: None,
            async_delivery: true,
            suppress_default_sink_setup: false,
        }
    }

    pub fn with_level(mut self, level: Verbosity) -> Self {
        self.level = level;
        self
    }

    pub fn with_category_field_width(mut self, width: usize) -> Self {
        self.category_field_width = width;
        self
    }

    pub fn with_print_wall_clock_time(mut self, enable: bool) -> Self {
        self.print_wall_clock_time = enable;
        self
    }

    pub fn with_print_simulated_time(mut self, enable: bool) -> Self {
        self.print_simulated_time = enable;
        self
    }

    pub fn with_print_delta_cycle(mut self, enable: bool) -> Self {
        self.print_delta_cycle = enable;
        self
    }

    pub fn with_print_severity(mut self, enable: bool) -> Self {
        self.print_severity = enable;
        self
    }

    pub fn with_colored_output(mut self, enable: bool) -> Self {
        self.colored_output = enable;
        self
    }

    pub fn with_log_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file_path = Some(path.into());
        self
    }

    pub fn with_log_filter_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.log_filter_pattern = Some(pattern.into());
        self
    }

    pub fn with_async_delivery(mut self, enable: bool) -> Self {
        self.async_delivery = enable;
        self
    }

    pub fn with_suppress_default_sink_setup(mut self, enable: bool) -> Self {
        self.suppress_default_sink_setup = enable;
        self
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

/**
Why [`init_logging`] could not apply a configuration.
*/
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The `log_filter_pattern` is not a valid regular expression.
    #[error("invalid log filter pattern: {0}")]
    InvalidFilterPattern(#[from] regex::Error),
    /// The `log_file_path` could not be opened for appending.
    #[error("cannot open log file: {0}")]
    LogFile(#[from] std::io::Error),
}

/**
Applies `config`: seeds the global verbosity level and, unless
`suppress_default_sink_setup` is set, installs a [`ConsoleSink`] built from
the config.

On error nothing has been changed; the registry and the installed sink are
exactly as they were. May be called again at any time to reconfigure.
*/
pub fn init_logging(config: &LogConfig) -> Result<(), InitError> {
    let sink = if config.suppress_default_sink_setup {
        None
    } else {
        Some(ConsoleSink::new(config)?)
    };
    crate::registry::set_global_level(config.level);
    if let Some(sink) = sink {
        crate::sink::install_sink(std::sync::Arc::new(sink));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_documented_values() {
        let config = LogConfig::new();
        assert_eq!(config.level, Verbosity::Warning);
        assert_eq!(config.category_field_width, 24);
        assert!(!config.print_wall_clock_time);
        assert!(config.print_simulated_time);
        assert!(!config.print_delta_cycle);
        assert!(config.print_severity);
        assert!(config.colored_output);
        assert_eq!(config.log_file_path, None);
        assert_eq!(config.log_filter_pattern, None);
        assert!(config.async_delivery);
        assert!(!config.suppress_default_sink_setup);
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn setters_chain() {
        let config = LogConfig::new()
            .with_level(Verbosity::Trace)
            .with_category_field_width(12)
            .with_print_wall_clock_time(true)
            .with_colored_output(false)
            .with_log_file_path("/tmp/sim.log")
            .with_log_filter_pattern("^bus")
            .with_async_delivery(false)
            .with_suppress_default_sink_setup(true);

        assert_eq!(config.level, Verbosity::Trace);
        assert_eq!(config.category_field_width, 12);
        assert!(config.print_wall_clock_time);
        assert!(!config.colored_output);
        assert_eq!(config.log_file_path.as_deref(), Some("/tmp/sim.log".as_ref()));
        assert_eq!(config.log_filter_pattern.as_deref(), Some("^bus"));
        assert!(!config.async_delivery);
        assert!(config.suppress_default_sink_setup);
    }

    #[test]
    fn bad_filter_pattern_fails_cleanly() {
        let _registry = crate::registry::TEST_REGISTRY_GUARD
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let before = crate::registry::global_level();

        let result = init_logging(&LogConfig::new().with_log_filter_pattern("(unclosed"));
        assert!(matches!(result, Err(InitError::InvalidFilterPattern(_))));
        // Failure must leave the registry as it was.
        assert_eq!(crate::registry::global_level(), before);
    }

    #[test]
    fn suppressing_sink_setup_keeps_the_current_sink() {
        let _registry = crate::registry::TEST_REGISTRY_GUARD
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let _sink = crate::sink::TEST_SINK_GUARD
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        let before = crate::sink::current_sink();

        init_logging(
            &LogConfig::new()
                .with_level(Verbosity::Info)
                .with_suppress_default_sink_setup(true),
        )
        .unwrap();

        assert_eq!(crate::registry::global_level(), Verbosity::Info);
        assert!(std::sync::Arc::ptr_eq(&before, &crate::sink::current_sink()));

        crate::registry::set_global_level(Verbosity::Warning);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn configs_round_trip_through_serde() {
        let config = LogConfig::new()
            .with_level(Verbosity::Debug)
            .with_log_filter_pattern("cpu|bus");
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<LogConfig>(&json).unwrap(), config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: LogConfig = serde_json::from_str(r#"{"level":"Trace"}"#).unwrap();
        assert_eq!(config.level, Verbosity::Trace);
        assert_eq!(config.category_field_width, 24);
        assert!(config.async_delivery);
    }
}
