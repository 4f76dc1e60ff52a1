//! # Line-oriented logging exporter.
//!
//! [`LogWriter`] renders each event as one human-readable line and writes
//! it through an injectable line-writer (the process's standard diagnostic
//! stream by default).
//!
//! ## Output format
//! ```text
//! [fibertrace] fiber_created (fiber:3, task:-)
//! [fibertrace] task_started (fiber:3, task:7) queue_ms=5
//! [fibertrace] task_failed (fiber:3, task:7) attempt=2 reason="connection refused"
//! [fibertrace] loop_tick (fiber:0, task:-) lag_us=130
//! ```
//!
//! Events are filtered by a per-kind severity mapping against the
//! configured minimum level: a writer at [`LogLevel::Info`] logs failures
//! and coarse lifecycle milestones and skips await-boundary noise and
//! loop ticks.
//!
//! Underlying write failures never leak as raw I/O errors; they surface as
//! [`TraceError::Exporter`] carrying the [`io::ErrorKind`] identity and
//! message.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::error::TraceError;
use crate::events::{Event, EventKind};
use crate::exporters::Export;
use crate::gate::LogLevel;

/// Severity assigned to each event kind for log filtering.
///
/// # Example
/// ```
/// use fibertrace::exporters::severity;
/// use fibertrace::{EventKind, LogLevel};
///
/// assert_eq!(severity(EventKind::TaskFailed), LogLevel::Warning);
/// assert_eq!(severity(EventKind::LoopTick), LogLevel::Trace);
/// ```
pub fn severity(kind: EventKind) -> LogLevel {
    match kind {
        EventKind::TaskFailed => LogLevel::Warning,
        EventKind::FiberCreated
        | EventKind::FiberTerminated
        | EventKind::TaskSubmitted
        | EventKind::TaskStarted
        | EventKind::TaskCompleted => LogLevel::Info,
        EventKind::FiberStarted
        | EventKind::FiberSuspended
        | EventKind::FiberResumed
        | EventKind::AwaitEnter
        | EventKind::AwaitExit => LogLevel::Debug,
        EventKind::LoopTick => LogLevel::Trace,
    }
}

/// Synchronous line-oriented log exporter.
///
/// Not a structured-logging replacement — implement a custom
/// [`Export`] for that. This writer exists as the human-readable
/// reference sink for development and demos.
pub struct LogWriter {
    prefix: &'static str,
    min_level: LogLevel,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl LogWriter {
    /// Creates a writer targeting the standard diagnostic stream with
    /// prefix `fibertrace`, logging every level.
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }

    /// Creates a writer targeting an injected line-writer.
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            prefix: "fibertrace",
            min_level: LogLevel::Trace,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Sets the line prefix.
    pub fn with_prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = prefix;
        self
    }

    /// Sets the maximum verbosity written; events whose kind maps to a
    /// more verbose level are skipped.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    fn render(&self, event: &Event) -> String {
        let mut line = format!(
            "[{}] {} (fiber:{}, task:{})",
            self.prefix,
            event.kind.as_label(),
            event.fiber,
            event
                .task
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
        for (key, value) in event.payload.iter() {
            line.push_str(&format!(" {key}={value}"));
        }
        line
    }

    fn wrap_io(err: io::Error) -> TraceError {
        TraceError::exporter("log", format!("{:?}", err.kind()), err.to_string())
    }
}

impl Default for LogWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Export for LogWriter {
    fn export(&self, batch: &[Event]) -> Result<(), TraceError> {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        for event in batch {
            if severity(event.kind) > self.min_level {
                continue;
            }
            writeln!(writer, "{}", self.render(event)).map_err(Self::wrap_io)?;
        }
        writer.flush().map_err(Self::wrap_io)
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
