//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# simlog

simlog is a logging facility for hardware simulation hosts and the models
that run inside them.

# The problem

A simulation produces two kinds of output that want different knobs.
Diagnoses (a protocol violation, a wedged bridge) must reach the operator
no matter what; tracing ("what is the arbiter doing in cycle 12") is
voluminous and only useful for the component you are currently staring at.
General-purpose logging crates fold both onto one axis, so turning up the
detail for one model floods you with everything.

simlog keeps the axes apart. Every record carries a *severity* (how bad)
and a *verbosity* (how detailed), and the registry gates only the
informational tiers. The gate has a global threshold plus per-category
overrides, so "everything from `bus0`, warnings from everyone else" is one
line of setup.

# The tiers

| Macro                        | Verbosity  | Severity  | Gated by the registry |
|------------------------------|------------|-----------|-----------------------|
| [`fatal!`](crate::fatal)     | `Fatal`    | `Fatal`   | no                    |
| [`error!`](crate::error)     | `Error`    | `Error`   | no                    |
| [`warn!`](crate::warn)       | `Warning`  | `Warning` | no                    |
| [`info!`](crate::info)       | `Info`     | `Info`    | yes                   |
| [`debug!`](crate::debug)     | `Debug`    | `Info`    | yes                   |
| [`trace!`](crate::trace)     | `Trace`    | `Info`    | yes                   |
| [`trace_all!`](crate::trace_all) | `TraceAll` | `Info` | yes                   |

# The API

```rust
simlog::warn!("transaction {} retried", 7);
simlog::debug!(category: "bus", "grant after {} cycles", 3);
```

Behind the macros, a [`LogStatement`] collects formatted text and is
delivered to the installed [`ReportSink`] exactly once, when it goes out
of scope. Suppressed statements are never built and their format arguments
are never evaluated.

# Configuration

Nothing is required up front: the first record installs a synchronous
[`ConsoleSink`] with defaults. Hosts that want more call
[`init_logging`]:

```rust,no_run
use simlog::{init_logging, LogConfig, Verbosity};

init_logging(
    &LogConfig::new()
        .with_level(Verbosity::Debug)
        .with_log_file_path("run.log"),
)
.expect("logging setup failed");

simlog::registry::set_category_override("bus0", Verbosity::TraceAll);
```

# Adopting foreign output

Models that write to their own streams can be captured line by line; see
[`StreamRedirect`].
*/

mod config;
mod console_sink;
mod inmemory_sink;
mod macros;
mod record;
mod redirect;
pub mod registry;
mod severity;
pub mod sink;
mod statement;
mod time;
mod verbosity;

pub use config::{InitError, LogConfig, init_logging};
pub use console_sink::ConsoleSink;
pub use inmemory_sink::InMemorySink;
pub use record::{DEFAULT_CATEGORY, LogRecord};
pub use redirect::{RedirectError, SharedStream, StreamRedirect};
pub use severity::Severity;
pub use sink::{ReportSink, current_sink, install_sink};
pub use statement::LogStatement;
pub use time::{TimeSource, UptimeSource, current_time_source, set_time_source};
pub use verbosity::{ParseVerbosityError, Verbosity};
