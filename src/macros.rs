// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
The logging macros.

One macro per tier. Each accepts a format string and arguments, plus an
optional leading `category:` that tags the record and selects which
registry override gates it:

```rust
simlog::info!("elaboration finished in {} ms", 12);
simlog::debug!(category: "bus", "arbitration took {} cycles", 4);
```

The informational tiers check the registry before evaluating their format
arguments, so a suppressed statement costs a threshold comparison and
nothing else. [`warn!`](crate::warn), [`error!`](crate::error), and
[`fatal!`](crate::fatal) never consult the registry.
*/

/// Logs at the fatal tier. Always delivered, and the sink is flushed
/// immediately afterwards.
///
/// ```rust,no_run
/// simlog::fatal!("bus bridge wedged at address {:#x}", 0xdead_beef_u32);
/// ```
#[macro_export]
macro_rules! fatal {
    (category: $category:expr, $($arg:tt)+) => {{
        let mut statement =
            $crate::LogStatement::fatal(::core::file!(), ::core::line!()).category($category);
        let _ = ::core::fmt::Write::write_fmt(&mut statement, ::core::format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        let mut statement = $crate::LogStatement::fatal(::core::file!(), ::core::line!());
        let _ = ::core::fmt::Write::write_fmt(&mut statement, ::core::format_args!($($arg)+));
    }};
}

/// Logs at the error tier. Always delivered.
#[macro_export]
macro_rules! error {
    (category: $category:expr, $($arg:tt)+) => {{
        let mut statement =
            $crate::LogStatement::error(::core::file!(), ::core::line!()).category($category);
        let _ = ::core::fmt::Write::write_fmt(&mut statement, ::core::format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        let mut statement = $crate::LogStatement::error(::core::file!(), ::core::line!());
        let _ = ::core::fmt::Write::write_fmt(&mut statement, ::core::format_args!($($arg)+));
    }};
}

/// Logs at the warning tier. Always delivered.
///
/// ```rust,no_run
/// simlog::warn!("transaction retried {} times", 3);
/// ```
#[macro_export]
macro_rules! warn {
    (category: $category:expr, $($arg:tt)+) => {{
        let mut statement =
            $crate::LogStatement::warning(::core::file!(), ::core::line!()).category($category);
        let _ = ::core::fmt::Write::write_fmt(&mut statement, ::core::format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        let mut statement = $crate::LogStatement::warning(::core::file!(), ::core::line!());
        let _ = ::core::fmt::Write::write_fmt(&mut statement, ::core::format_args!($($arg)+));
    }};
}

/// Logs at the info tier, subject to the registry threshold.
///
/// The format arguments are not evaluated when the statement is
/// suppressed.
///
/// ```rust
/// simlog::info!("resets released");
/// simlog::info!(category: "clk", "pll locked after {} us", 250);
/// ```
#[macro_export]
macro_rules! info {
    (category: $category:expr, $($arg:tt)+) => {{
        let category = $category;
        if $crate::registry::statement_enabled(
            ::core::option::Option::Some(::core::convert::AsRef::<str>::as_ref(&category)),
            $crate::Verbosity::Info.value(),
        ) {
            let mut statement = $crate::LogStatement::info(
                ::core::file!(),
                ::core::line!(),
                $crate::Verbosity::Info.value(),
            )
            .category(category);
            let _ = ::core::fmt::Write::write_fmt(&mut statement, ::core::format_args!($($arg)+));
        }
    }};
    ($($arg:tt)+) => {{
        if $crate::registry::statement_enabled(
            ::core::option::Option::None,
            $crate::Verbosity::Info.value(),
        ) {
            let mut statement = $crate::LogStatement::info(
                ::core::file!(),
                ::core::line!(),
                $crate::Verbosity::Info.value(),
            );
            let _ = ::core::fmt::Write::write_fmt(&mut statement, ::core::format_args!($($arg)+));
        }
    }};
}

/// Logs at the debug tier, subject to the registry threshold.
#[macro_export]
macro_rules! debug {
    (category: $category:expr, $($arg:tt)+) => {{
        let category = $category;
        if $crate::registry::statement_enabled(
            ::core::option::Option::Some(::core::convert::AsRef::<str>::as_ref(&category)),
            $crate::Verbosity::Debug.value(),
        ) {
            let mut statement = $crate::LogStatement::info(
                ::core::file!(),
                ::core::line!(),
                $crate::Verbosity::Debug.value(),
            )
            .category(category);
            let _ = ::core::fmt::Write::write_fmt(&mut statement, ::core::format_args!($($arg)+));
        }
    }};
    ($($arg:tt)+) => {{
        if $crate::registry::statement_enabled(
            ::core::option::Option::None,
            $crate::Verbosity::Debug.value(),
        ) {
            let mut statement = $crate::LogStatement::info(
                ::core::file!(),
                ::core::line!(),
                $crate::Verbosity::Debug.value(),
            );
            let _ = ::core::fmt::Write::write_fmt(&mut statement, ::core::format_args!($($arg)+));
        }
    }};
}

/// Logs at the trace tier, subject to the registry threshold.
#[macro_export]
macro_rules! trace {
    (category: $category:expr, $($arg:tt)+) => {{
        let category = $category;
        if $crate::registry::statement_enabled(
            ::core::option::Option::Some(::core::convert::AsRef::<str>::as_ref(&category)),
            $crate::Verbosity::Trace.value(),
        ) {
            let mut statement = $crate::LogStatement::info(
                ::core::file!(),
                ::core::line!(),
                $crate::Verbosity::Trace.value(),
            )
            .category(category);
            let _ = ::core::fmt::Write::write_fmt(&mut statement, ::core::format_args!($($arg)+));
        }
    }};
    ($($arg:tt)+) => {{
        if $crate::registry::statement_enabled(
            ::core::option::Option::None,
            $crate::Verbosity::Trace.value(),
        ) {
            let mut statement = $crate::LogStatement::info(
                ::core::file!(),
                ::core::line!(),
                $crate::Verbosity::Trace.value(),
            );
            let _ = ::core::fmt::Write::write_fmt(&mut statement, ::core::format_args!($($arg)+));
        }
    }};
}

/// Logs at the most verbose tier, subject to the registry threshold.
#[macro_export]
macro_rules! trace_all {
    (category: $category:expr, $($arg:tt)+) => {{
        let category = $category;
        if $crate::registry::statement_enabled(
            ::core::option::Option::Some(::core::convert::AsRef::<str>::as_ref(&category)),
            $crate::Verbosity::TraceAll.value(),
        ) {
            let mut statement = $crate::LogStatement::info(
                ::core::file!(),
                ::core::line!(),
                $crate::Verbosity::TraceAll.value(),
            )
            .category(category);
            let _ = ::core::fmt::Write::write_fmt(&mut statement, ::core::format_args!($($arg)+));
        }
    }};
    ($($arg:tt)+) => {{
        if $crate::registry::statement_enabled(
            ::core::option::Option::None,
            $crate::Verbosity::TraceAll.value(),
        ) {
            let mut statement = $crate::LogStatement::info(
                ::core::file!(),
                ::core::line!(),
                $crate::Verbosity::TraceAll.value(),
            );
            let _ = ::core::fmt::Write::write_fmt(&mut statement, ::core::format_args!($($arg)+));
        }
    }};
}
