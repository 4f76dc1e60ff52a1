//! # JSON-lines exporter.
//!
//! [`JsonWriter`] renders one JSON object per event per line through an
//! injectable writer — the machine-readable sibling of
//! [`LogWriter`](crate::LogWriter), suitable for piping into external
//! analysis tooling.
//!
//! ```text
//! {"kind":"task_failed","at":{...},"fiber":3,"task":7,"payload":{"reason":"boom"}}
//! ```
//!
//! Serialization and write failures surface as
//! [`TraceError::Exporter`] with the original failure's identity and
//! message, never the underlying error type.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::error::TraceError;
use crate::events::Event;
use crate::exporters::Export;

/// Synchronous JSON-lines exporter.
pub struct JsonWriter {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonWriter {
    /// Creates a writer targeting the standard diagnostic stream.
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }

    /// Creates a writer targeting an injected line-writer.
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn wrap_io(err: io::Error) -> TraceError {
        TraceError::exporter("json", format!("{:?}", err.kind()), err.to_string())
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Export for JsonWriter {
    fn export(&self, batch: &[Event]) -> Result<(), TraceError> {
        let mut writer = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        for event in batch {
            let line = serde_json::to_string(event).map_err(|e| {
                TraceError::exporter("json", "serde_json::Error", e.to_string())
            })?;
            writeln!(writer, "{line}").map_err(Self::wrap_io)?;
        }
        writer.flush().map_err(Self::wrap_io)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_one_json_object_per_line() {
        let buf = SharedBuf::default();
        let sink = JsonWriter::with_writer(buf.clone());

        sink.export(&[
            Event::new(EventKind::TaskStarted, 1).with_task(4),
            Event::new(EventKind::TaskCompleted, 1).with_task(4),
        ])
        .unwrap();

        let text = buf.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["kind"], "task_started");
        assert_eq!(first["fiber"], 1);
        assert_eq!(first["task"], 4);
    }

    #[test]
    fn test_payload_facts_serialize_as_scalars() {
        let buf = SharedBuf::default();
        let sink = JsonWriter::with_writer(buf.clone());

        let ev = Event::new(EventKind::TaskFailed, 2)
            .with_fact("reason", "boom")
            .with_fact("attempt", 3i64)
            .with_fact("retryable", true);
        sink.export(std::slice::from_ref(&ev)).unwrap();

        let value: serde_json::Value = serde_json::from_str(buf.text().trim()).unwrap();
        assert_eq!(value["payload"]["reason"], "boom");
        assert_eq!(value["payload"]["attempt"], 3);
        assert_eq!(value["payload"]["retryable"], true);
    }

    #[test]
    fn test_empty_batch_is_a_noop() {
        let buf = SharedBuf::default();
        JsonWriter::with_writer(buf.clone()).export(&[]).unwrap();
        assert!(buf.text().is_empty());
    }
}
