//! # Event exporters.
//!
//! This module provides the [`Export`] trait and the reference sinks the
//! recorder ships with.
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   Recorder ── export(&[Event]) ──► bound exporter
//!                                        │
//!                                   ┌────┴─────┬──────────┬─────────┐
//!                                   ▼          ▼          ▼         ▼
//!                                Discard   LogWriter  JsonWriter  ExportSet
//!                               (default)  (lines)    (JSON/line) (fan-out)
//! ```
//!
//! ## Implementing custom exporters
//! ```rust
//! use fibertrace::{Event, Export, TraceError};
//!
//! struct Collecting(std::sync::Mutex<Vec<Event>>);
//!
//! impl Export for Collecting {
//!     fn export(&self, batch: &[Event]) -> Result<(), TraceError> {
//!         self.0.lock().unwrap().extend_from_slice(batch);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str { "collecting" }
//! }
//! ```

mod discard;
mod export;
mod json;
mod log;
mod set;

pub use discard::Discard;
pub use export::Export;
pub use json::JsonWriter;
pub use log::{severity, LogWriter};
pub use set::ExportSet;
