// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
The default delivery target: renders records to stderr and optionally to a
log file.

Rendering is column-oriented. Depending on the configuration a line carries
wall-clock time, simulated time, the delta cycle, a severity label, a
fixed-width category column, the message, and for warnings and worse the
source location:

```text
[         4 ns] WARNING  [router      ] dropping packet (src/router.rs:88)
```

With `async_delivery` enabled the sink hands records to a worker thread over
an unbounded channel, so the logging thread never blocks on terminal IO.
[`flush`](crate::sink::ReportSink::flush) performs a handshake with the
worker and only returns once everything queued before the call has reached
the underlying streams.
*/

use crate::config::{InitError, LogConfig};
use crate::record::LogRecord;
use crate::severity::Severity;
use crate::sink::ReportSink;
use crate::verbosity::Verbosity;
use crossbeam_channel::{Receiver, Sender};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use regex::Regex;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Arc;
use std::thread::JoinHandle;

/**
Rendering flags, resolved once at sink construction.
*/
#[derive(Debug)]
struct RenderOptions {
    category_field_width: usize,
    print_wall_clock_time: bool,
    print_simulated_time: bool,
    print_delta_cycle: bool,
    print_severity: bool,
    colored_output: bool,
    filter: Option<Regex>,
}

impl RenderOptions {
    fn from_config(config: &LogConfig, filter: Option<Regex>) -> Self {
        Self {
            category_field_width: config.category_field_width,
            print_wall_clock_time: config.print_wall_clock_time,
            print_simulated_time: config.print_simulated_time,
            print_delta_cycle: config.print_delta_cycle,
            print_severity: config.print_severity,
            colored_output: config.colored_output,
            filter,
        }
    }

    fn passes_filter(&self, record: &LogRecord) -> bool {
        // Fatal records always reach the console, filter or not.
        if record.severity() == Severity::Fatal {
            return true;
        }
        match &self.filter {
            Some(filter) => filter.is_match(record.category_or_default()),
            None => true,
        }
    }
}

fn severity_label(record: &LogRecord) -> &'static str {
    match record.severity() {
        Severity::Info => {
            // Informational records carry their verbosity in the label so
            // trace output is recognizable at a glance.
            if record.verbosity() >= Verbosity::TraceAll.value() {
                "TRACEALL"
            } else if record.verbosity() >= Verbosity::Trace.value() {
                "TRACE"
            } else if record.verbosity() >= Verbosity::Debug.value() {
                "DEBUG"
            } else {
                "INFO"
            }
        }
        severe => severe.name(),
    }
}

fn render(options: &RenderOptions, record: &LogRecord, colored: bool) -> String {
    use std::fmt::Write;
    let mut line = String::new();
    if options.print_wall_clock_time {
        let now = chrono::Local::now();
        let _ = write!(line, "[{}]", now.format("%Y-%m-%d %H:%M:%S%.6f"));
    }
    if options.print_simulated_time || options.print_delta_cycle {
        let source = crate::time::current_time_source();
        if options.print_simulated_time {
            if let Some(time) = source.simulated_time() {
                let _ = write!(line, "[{time:>13}]");
            }
        }
        if options.print_delta_cycle {
            if let Some(delta) = source.delta_cycle() {
                let _ = write!(line, "[#{delta}]");
            }
        }
    }
    if !line.is_empty() {
        line.push(' ');
    }
    if options.print_severity {
        let label = format!("{:<8} ", severity_label(record));
        if colored {
            let painted = match record.severity() {
                Severity::Fatal => label.red().bold().to_string(),
                Severity::Error => label.red().to_string(),
                Severity::Warning => label.yellow().to_string(),
                Severity::Info => {
                    if record.verbosity() >= Verbosity::Debug.value() {
                        label.cyan().to_string()
                    } else {
                        label.green().to_string()
                    }
                }
            };
            line.push_str(&painted);
        } else {
            line.push_str(&label);
        }
    }
    if options.category_field_width > 0 {
        let width = options.category_field_width;
        let mut category = record.category_or_default().to_string();
        if category.chars().count() > width {
            category = category.chars().take(width).collect();
        }
        let _ = write!(line, "[{category:<width$}] ");
    }
    let _ = write!(line, "{record}");
    // Captured stream lines carry no call site; an empty file suppresses the
    // location suffix.
    if record.severity() >= Severity::Warning && !record.file().is_empty() {
        let _ = write!(line, " ({}:{})", record.file(), record.line());
    }
    line
}

/**
The streams a console sink writes to.
*/
#[derive(Debug)]
struct Output {
    file: Option<std::fs::File>,
}

impl Output {
    fn write_record(&mut self, options: &RenderOptions, record: &LogRecord) {
        if !options.passes_filter(record) {
            return;
        }
        let line = render(options, record, options.colored_output);
        let mut stderr = std::io::stderr().lock();
        stderr
            .write_all(line.as_bytes())
            .expect("Can't log to stderr");
        stderr.write_all(b"\n").expect("Can't log to stderr");
        drop(stderr);
        if let Some(file) = &mut self.file {
            // The file copy never carries escape codes.
            let plain = render(options, record, false);
            let _ = file.write_all(plain.as_bytes());
            let _ = file.write_all(b"\n");
        }
    }

    fn flush(&mut self) {
        let _ = std::io::stderr().flush();
        if let Some(file) = &mut self.file {
            let _ = file.flush();
        }
    }
}

#[derive(Debug)]
enum Task {
    Record(LogRecord),
    Flush(Sender<()>),
}

#[derive(Debug)]
enum Mode {
    /// Records are rendered on the calling thread.
    Direct(Mutex<Output>),
    /// Records are queued to a worker thread.
    ///
    /// Both fields are `Some` until [`ConsoleSink::drop`] shuts the worker
    /// down.
    Threaded {
        sender: Option<Sender<Task>>,
        worker: Option<JoinHandle<()>>,
    },
}

fn run_worker(tasks: Receiver<Task>, options: Arc<RenderOptions>, mut output: Output) {
    for task in tasks {
        match task {
            Task::Record(record) => output.write_record(&options, &record),
            Task::Flush(done) => {
                output.flush();
                // A dropped requester gave up waiting; that is not an error.
                let _ = done.send(());
            }
        }
    }
    // Channel closed: everything queued has been written, flush and exit.
    output.flush();
}

/**
Renders log records to stderr, and to a log file when one is configured.

Built from a [`LogConfig`] by [`ConsoleSink::new`], usually indirectly
through [`init_logging`](crate::init_logging). The zero-configuration
[`Default`] instance is what the first dispatch installs when no one
configured logging; it renders synchronously and never spawns a thread.
*/
#[derive(Debug)]
pub struct ConsoleSink {
    options: Arc<RenderOptions>,
    mode: Mode,
}

// Boilerplate notes:
// 1. No Clone. The threaded mode owns a JoinHandle, and two handles to one
//    worker would fight over shutdown.
// 2. No PartialEq. Two sinks built from equal configs still own distinct
//    file handles and workers.
// 3. Default is implemented by hand: it must stay synchronous, so it cannot
//    route through a user-supplied config.

impl ConsoleSink {
    /**
    Builds a sink from `config`.

    Fails when the filter pattern does not compile or the log file cannot
    be opened for appending.
    */
    pub fn new(config: &LogConfig) -> Result<Self, InitError> {
        let filter = config
            .log_filter_pattern
            .as_deref()
            .map(Regex::new)
            .transpose()?;
        let file = match &config.log_file_path {
            Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
            None => None,
        };
        Ok(Self::assemble(
            RenderOptions::from_config(config, filter),
            Output { file },
            config.async_delivery,
        ))
    }

    fn assemble(options: RenderOptions, output: Output, async_delivery: bool) -> Self {
        let options = Arc::new(options);
        let mode = if async_delivery {
            let (sender, receiver) = crossbeam_channel::unbounded();
            let worker_options = options.clone();
            let worker = std::thread::spawn(move || run_worker(receiver, worker_options, output));
            Mode::Threaded {
                sender: Some(sender),
                worker: Some(worker),
            }
        } else {
            Mode::Direct(Mutex::new(output))
        };
        Self { options, mode }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::assemble(
            RenderOptions::from_config(&LogConfig::new(), None),
            Output { file: None },
            false,
        )
    }
}

impl ReportSink for ConsoleSink {
    fn deliver(&self, record: LogRecord) {
        match &self.mode {
            Mode::Direct(output) => output.lock().write_record(&self.options, &record),
            Mode::Threaded {
                sender: Some(sender),
                ..
            } => {
                // The worker only exits after the last sender drops.
                let _ = sender.send(Task::Record(record));
            }
            Mode::Threaded { sender: None, .. } => {}
        }
    }

    fn flush(&self) {
        match &self.mode {
            Mode::Direct(output) => output.lock().flush(),
            Mode::Threaded {
                sender: Some(sender),
                ..
            } => {
                let (done, wait) = crossbeam_channel::bounded(1);
                if sender.send(Task::Flush(done)).is_ok() {
                    // Blocks until the worker has written everything queued
                    // before this call and flushed the streams.
                    let _ = wait.recv();
                }
            }
            Mode::Threaded { sender: None, .. } => {}
        }
    }
}

impl Drop for ConsoleSink {
    fn drop(&mut self) {
        if let Mode::Threaded { sender, worker } = &mut self.mode {
            // Closing the channel lets the worker drain its queue and exit.
            drop(sender.take());
            if let Some(worker) = worker.take() {
                let _ = worker.join();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> RenderOptions {
        RenderOptions {
            category_field_width: 8,
            print_wall_clock_time: false,
            print_simulated_time: false,
            print_delta_cycle: false,
            print_severity: true,
            colored_output: false,
            filter: None,
        }
    }

    fn record(severity: Severity, verbosity: Verbosity, message: &str) -> LogRecord {
        let mut record = LogRecord::new(severity, verbosity.value(), "", 0);
        record.log(message);
        record
    }

    #[test]
    fn plain_render_orders_columns() {
        let line = render(
            &options(),
            &record(Severity::Warning, Verbosity::Warning, "bus conflict"),
            false,
        );
        assert_eq!(line, "WARNING  [sim     ] bus conflict");
    }

    #[test]
    fn info_labels_follow_verbosity() {
        let label = |verbosity| severity_label(&record(Severity::Info, verbosity, "x"));
        assert_eq!(label(Verbosity::Info), "INFO");
        assert_eq!(label(Verbosity::Debug), "DEBUG");
        assert_eq!(label(Verbosity::Trace), "TRACE");
        assert_eq!(label(Verbosity::TraceAll), "TRACEALL");
    }

    #[test]
    fn category_is_truncated_to_the_field_width() {
        let mut record = record(Severity::Info, Verbosity::Info, "up");
        record.category = Some("interconnect_router".to_string());
        let line = render(&options(), &record, false);
        assert_eq!(line, "INFO     [intercon] up");
    }

    #[test]
    fn zero_width_omits_the_category_column() {
        let mut opts = options();
        opts.category_field_width = 0;
        let line = render(
            &opts,
            &record(Severity::Info, Verbosity::Info, "quiet"),
            false,
        );
        assert_eq!(line, "INFO     quiet");
    }

    #[test]
    fn location_suffix_appears_for_warnings_and_worse() {
        let mut warned =
            LogRecord::new(Severity::Warning, Verbosity::Warning.value(), "model.rs", 42);
        warned.log("late");
        assert!(render(&options(), &warned, false).ends_with("late (model.rs:42)"));

        let mut informed = LogRecord::new(Severity::Info, Verbosity::Info.value(), "model.rs", 42);
        informed.log("fine");
        assert!(render(&options(), &informed, false).ends_with("fine"));
    }

    #[test]
    fn filter_matches_the_category_but_spares_fatal() {
        let mut opts = options();
        opts.filter = Some(Regex::new("^bus").unwrap());

        let mut on_topic = record(Severity::Warning, Verbosity::Warning, "w");
        on_topic.category = Some("bus0".to_string());
        assert!(opts.passes_filter(&on_topic));

        let mut off_topic = record(Severity::Warning, Verbosity::Warning, "w");
        off_topic.category = Some("cpu".to_string());
        assert!(!opts.passes_filter(&off_topic));

        let mut fatal = record(Severity::Fatal, Verbosity::Fatal, "boom");
        fatal.category = Some("cpu".to_string());
        assert!(opts.passes_filter(&fatal));
    }

    #[test]
    fn severity_column_can_be_disabled() {
        let mut opts = options();
        opts.print_severity = false;
        let line = render(
            &opts,
            &record(Severity::Error, Verbosity::Error, "gone"),
            false,
        );
        assert_eq!(line, "[sim     ] gone");
    }

    #[test]
    fn colored_render_wraps_the_severity_label() {
        let line = render(
            &options(),
            &record(Severity::Error, Verbosity::Error, "red"),
            true,
        );
        assert!(line.contains("\x1b["));
        assert!(line.contains("ERROR"));
    }

    #[test]
    fn default_sink_is_synchronous() {
        let sink = ConsoleSink::default();
        assert!(matches!(sink.mode, Mode::Direct(_)));
    }
}
