// SPDX-License-Identifier: MIT OR Apache-2.0

/*!
Capture of foreign output streams as log records.

Simulation models often come with their own `Write`-based output; this
module lets a host adopt that output into the logging pipeline. A
[`SharedStream`] wraps any writer behind a cloneable handle, and a
[`StreamRedirect`] swaps the writer out for a line splitter that turns each
written line into a record at a chosen verbosity.

```rust,no_run
use simlog::{SharedStream, StreamRedirect, Verbosity};
use std::io::Write;

let mut stream = SharedStream::new(std::io::sink());
let mut redirect = StreamRedirect::new(stream.clone());
redirect.start(Verbosity::Info).expect("not yet redirected");

writeln!(stream, "model output becomes a log record").unwrap();

redirect.reset();
// From here on writes reach the original writer again.
```

While a redirect is active, record delivery runs with the stream lock held.
A sink must therefore never write back into the stream it captures.
*/

use crate::record::LogRecord;
use crate::verbosity::Verbosity;
use parking_lot::Mutex;
use std::fmt;
use std::io;
use std::sync::Arc;

struct StreamState {
    writer: Box<dyn io::Write + Send>,
    redirected: bool,
}

/**
A cloneable handle to a writer that can be captured by a [`StreamRedirect`].

All clones write to the same underlying writer; writes from different
threads are serialized internally.
*/
#[derive(Clone)]
pub struct SharedStream {
    state: Arc<Mutex<StreamState>>,
}

impl SharedStream {
    pub fn new(writer: impl io::Write + Send + 'static) -> Self {
        Self {
            state: Arc::new(Mutex::new(StreamState {
                writer: Box::new(writer),
                redirected: false,
            })),
        }
    }
}

impl fmt::Debug for SharedStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Not locking here keeps Debug usable from a panic handler.
        f.debug_struct("SharedStream").finish_non_exhaustive()
    }
}

impl io::Write for SharedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.state.lock().writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.state.lock().writer.flush()
    }
}

/// Splits captured bytes into lines and dispatches each as a record.
struct LineForwarder {
    level: Verbosity,
    pending: Vec<u8>,
}

impl LineForwarder {
    fn new(level: Verbosity) -> Self {
        Self {
            level,
            pending: Vec::new(),
        }
    }

    fn forward(&self, line: &[u8]) {
        let line = match line.last() {
            Some(b'\r') => &line[..line.len() - 1],
            _ => line,
        };
        let text = String::from_utf8_lossy(line);
        // Captured lines have no meaningful call site, so file stays empty
        // and the renderer omits the location suffix.
        let mut record = LogRecord::new(self.level.severity(), self.level.value(), "", 0);
        record.log(&text);
        crate::sink::dispatch(record);
    }

    fn forward_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending);
        self.forward(&pending);
    }
}

impl io::Write for LineForwarder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(at) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=at).collect();
            self.forward(&line[..line.len() - 1]);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // An explicit flush treats the unterminated tail as a complete line.
        self.forward_pending();
        Ok(())
    }
}

impl Drop for LineForwarder {
    fn drop(&mut self) {
        self.forward_pending();
    }
}

/**
Captures a [`SharedStream`], turning its lines into records until reset.

At most one redirect can capture a given stream at a time. Dropping an
active redirect resets it.
*/
pub struct StreamRedirect {
    stream: SharedStream,
    saved: Option<Box<dyn io::Write + Send>>,
}

// Boilerplate notes:
// 1. No Clone. The redirect owns the displaced writer; two owners would
//    both try to put it back.
// 2. Debug is manual because the displaced writer is an opaque trait
//    object.

impl StreamRedirect {
    /// Creates an inactive redirect for `stream`. Nothing is captured until
    /// [`start`](Self::start).
    pub fn new(stream: SharedStream) -> Self {
        Self {
            stream,
            saved: None,
        }
    }

    /**
    Begins capturing: every subsequent line written to the stream becomes a
    record at `level`, with severity derived from it.

    Fails with [`RedirectError::AlreadyActive`] when the stream is already
    captured, whether by this redirect or another one.
    */
    pub fn start(&mut self, level: Verbosity) -> Result<(), RedirectError> {
        let mut state = self.stream.state.lock();
        if state.redirected {
            return Err(RedirectError::AlreadyActive);
        }
        let forwarder: Box<dyn io::Write + Send> = Box::new(LineForwarder::new(level));
        self.saved = Some(std::mem::replace(&mut state.writer, forwarder));
        state.redirected = true;
        Ok(())
    }

    /**
    Stops capturing and restores the original writer.

    A final unterminated line is delivered as its own record. Calling this
    on an inactive redirect does nothing.
    */
    pub fn reset(&mut self) {
        let Some(original) = self.saved.take() else {
            return;
        };
        let mut state = self.stream.state.lock();
        let forwarder = std::mem::replace(&mut state.writer, original);
        state.redirected = false;
        drop(state);
        // Dropping the forwarder delivers the partial tail; the stream lock
        // is released first so delivery cannot re-enter it.
        drop(forwarder);
    }

    /// Whether this redirect currently captures its stream.
    pub fn is_active(&self) -> bool {
        self.saved.is_some()
    }
}

impl fmt::Debug for StreamRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamRedirect")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl Drop for StreamRedirect {
    fn drop(&mut self) {
        self.reset();
    }
}

/**
Why a [`StreamRedirect`] operation was refused.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RedirectError {
    /// The stream is already captured by an active redirect.
    #[error("stream is already redirected")]
    AlreadyActive,
}
