//! # Exporter boundary contract.
//!
//! [`Export`] is the seam between the recorder core and the delivery
//! world. The core guarantees an exporter:
//!
//! - batches arrive in emission order (oldest first);
//! - every event appears in exactly one batch;
//! - calls run synchronously on the emitting thread, never under a core
//!   lock.
//!
//! The core does **not** guarantee:
//!
//! - a minimum or maximum batch size (an empty batch must be a no-op);
//! - retries — a failed batch is gone unless the exporter kept it;
//! - delivery at all while the gate is disabled or sampling drops events.
//!
//! Format, destination, retry policy and any further sampling or dropping
//! are the exporter's business.
//!
//! ## Implementing an exporter
//! ```rust
//! use fibertrace::{Event, EventKind, Export, TraceError};
//!
//! struct FailureCounter(std::sync::atomic::AtomicU64);
//!
//! impl Export for FailureCounter {
//!     fn export(&self, batch: &[Event]) -> Result<(), TraceError> {
//!         let failures = batch
//!             .iter()
//!             .filter(|e| e.kind == EventKind::TaskFailed)
//!             .count() as u64;
//!         self.0.fetch_add(failures, std::sync::atomic::Ordering::Relaxed);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "failure-counter"
//!     }
//! }
//! ```

use crate::error::TraceError;
use crate::events::Event;

/// Event sink bound to a [`Recorder`](crate::Recorder).
///
/// Implementations must tolerate an empty batch (no-op) and should report
/// failures as [`TraceError::Exporter`] carrying the original failure's
/// identity and message; the recorder propagates errors to the emitting
/// producer untouched.
pub trait Export: Send + Sync {
    /// Handles one batch of events, oldest first.
    ///
    /// Runs to completion on the caller's thread; the core imposes no
    /// timeout (an exporter doing blocking I/O is the deployment's risk,
    /// documented, not mitigated).
    fn export(&self, batch: &[Event]) -> Result<(), TraceError>;

    /// Returns the exporter name used in error context and logs.
    ///
    /// Prefer short, descriptive names (e.g. "log", "json", "discard").
    /// The default uses `type_name::<Self>()`, which can be verbose —
    /// override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
