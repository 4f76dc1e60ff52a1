//! # Process-wide default recorder.
//!
//! A convenience wrapper, not the only access path: the primary API is an
//! explicitly constructed [`Recorder`] passed by reference, so isolated
//! instances can coexist (one per worker, fresh ones in tests). The
//! default instance exists for hosts that want zero wiring: disabled,
//! [`Discard`](crate::Discard)-bound, immediate delivery, default config.
//!
//! ## Example
//! ```rust
//! use fibertrace::{Event, EventKind};
//!
//! // Disabled by default: recording costs nothing until opted in.
//! assert!(!fibertrace::is_enabled());
//! fibertrace::emit(Event::new(EventKind::LoopTick, 0)).unwrap();
//! ```

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::TraceError;
use crate::events::Event;
use crate::exporters::Export;
use crate::gate::Recorder;

static DEFAULT: Lazy<Recorder> = Lazy::new(Recorder::new);

/// The process-wide default recorder.
pub fn recorder() -> &'static Recorder {
    &DEFAULT
}

/// Records one event on the default recorder.
pub fn emit(event: Event) -> Result<(), TraceError> {
    DEFAULT.emit(event)
}

/// Enables the default recorder.
pub fn enable() {
    DEFAULT.enable();
}

/// Disables the default recorder.
pub fn disable() {
    DEFAULT.disable();
}

/// True if the default recorder is enabled.
pub fn is_enabled() -> bool {
    DEFAULT.is_enabled()
}

/// Rebinds the default recorder's exporter.
pub fn set_exporter(exporter: Arc<dyn Export>) {
    DEFAULT.set_exporter(exporter);
}

/// Drains the default recorder's buffered stream, if any.
pub fn flush() -> Result<(), TraceError> {
    DEFAULT.flush()
}

/// Next fiber id from the default recorder's generator.
pub fn next_fiber_id() -> u64 {
    DEFAULT.next_fiber_id()
}

/// Next task id from the default recorder's generator.
pub fn next_task_id() -> u64 {
    DEFAULT.next_task_id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::exporters::Discard;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Spy(Mutex<Vec<Event>>);

    impl Export for Spy {
        fn export(&self, batch: &[Event]) -> Result<(), TraceError> {
            self.0.lock().unwrap().extend_from_slice(batch);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "spy"
        }
    }

    // One sequential test: the default recorder is shared process state,
    // so the full scenario runs inside a single test body.
    #[test]
    fn test_default_recorder_lifecycle() {
        assert!(!is_enabled(), "default recorder starts disabled");

        let spy = Arc::new(Spy::default());
        set_exporter(Arc::clone(&spy) as Arc<dyn Export>);

        // Disabled: nothing reaches the exporter.
        emit(Event::new(EventKind::LoopTick, 0)).unwrap();
        assert!(spy.0.lock().unwrap().is_empty());

        enable();
        let fiber = next_fiber_id();
        assert!(fiber >= 1);
        emit(Event::new(EventKind::FiberCreated, fiber)).unwrap();
        assert_eq!(spy.0.lock().unwrap().len(), 1);

        let task = next_task_id();
        assert!(task >= 1);
        flush().unwrap(); // immediate mode: no-op

        // Restore the defaults for any other use of the process recorder.
        disable();
        set_exporter(Arc::new(Discard));
        assert!(!is_enabled());
    }
}
