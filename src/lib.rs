//! # fibertrace
//!
//! **Fibertrace** is a passive lifecycle recorder for async runtimes.
//!
//! It captures structured facts about fibers, tasks, await boundaries and
//! loop ticks — without influencing the scheduling or execution of the
//! observed system. The crate is the capture and delivery pipeline only:
//! semantic translation of runtime callbacks into events, and real
//! delivery destinations, live outside it and meet it at two narrow
//! seams: *produce an event* and *export a batch of events*.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   producer   │   │   producer   │   │   producer   │
//!     │ (fiber hooks)│   │ (task hooks) │   │ (loop hooks) │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            │ Event::new / Event::create          │
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Recorder (runtime gate)                                          │
//! │  - enabled flag (default off: disabled emits cost one load)       │
//! │  - TraceConfig snapshot (sampling, buffer size, hints)            │
//! │  - IdGen (monotonic fiber/task correlation ids)                   │
//! │  - DeliveryMode fixed at build time                               │
//! └──────────────┬──────────────────────────────┬─────────────────────┘
//!                │ Immediate                    │ Buffered
//!                ▼                              ▼
//!        export([event])               EventStream (RingBuffer,
//!                                      overwrite-oldest) ── full or
//!                │                     explicit flush ──► export(batch)
//!                ▼                              │
//! ┌──────────────┴──────────────────────────────┴─────────────────────┐
//! │  Export (exporter boundary)                                       │
//! │  Discard (default) · LogWriter · JsonWriter · ExportSet · custom  │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Guarantees
//! - **Observer only**: no operation awaits, spawns, retries, or blocks
//!   beyond the buffer/export call itself; payloads hold primitive facts,
//!   never live runtime objects.
//! - **Hard memory ceiling**: the buffered stream is a fixed-capacity
//!   ring; under sustained pressure the oldest events are evicted, the
//!   host never grows unbounded. History is in-memory and intentionally
//!   non-durable.
//! - **Null cost when off**: a disabled recorder drops events with zero
//!   side effects — no exporter call, no counters.
//!
//! ## Features
//! | Area            | Description                                               | Key types / traits                    |
//! |-----------------|-----------------------------------------------------------|---------------------------------------|
//! | **Events**      | Immutable lifecycle facts with scalar payloads.           | [`Event`], [`EventKind`], [`Fact`]    |
//! | **Storage**     | Bounded FIFO with overwrite-oldest eviction.              | [`RingBuffer`], [`EventStream`]       |
//! | **Gate**        | Enable/disable, sampling, delivery, exporter binding.     | [`Recorder`], [`TraceConfig`]         |
//! | **Exporters**   | Pluggable synchronous sinks.                              | [`Export`], [`LogWriter`], [`Discard`]|
//! | **Identity**    | Monotonic fiber/task correlation ids.                     | [`IdGen`]                             |
//! | **Counters**    | Flat named metrics, independent of the event pipeline.    | [`Counter`], [`Metrics`]              |
//! | **Errors**      | One taxonomy: config / invalid-event / exporter / capacity.| [`TraceError`]                       |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use fibertrace::{Event, EventKind, LogWriter, LogLevel, Recorder, TraceConfig};
//!
//! fn main() -> Result<(), fibertrace::TraceError> {
//!     let recorder = Recorder::builder(TraceConfig::default())
//!         .with_exporter(Arc::new(
//!             LogWriter::new().with_min_level(LogLevel::Debug),
//!         ))
//!         .build()?;
//!
//!     recorder.enable();
//!
//!     let fiber = recorder.next_fiber_id();
//!     recorder.emit(Event::new(EventKind::FiberCreated, fiber))?;
//!
//!     let task = recorder.next_task_id();
//!     recorder.emit(
//!         Event::new(EventKind::TaskStarted, fiber)
//!             .with_task(task)
//!             .with_fact("queue_ms", 2i64),
//!     )?;
//!
//!     recorder.disable();
//!     Ok(())
//! }
//! ```

mod error;
mod events;
mod gate;
mod global;
mod ids;
mod metrics;

pub mod exporters;

// ---- Public re-exports ----

pub use error::TraceError;
pub use events::{Event, EventKind, EventStream, Fact, Payload, RingBuffer, SYSTEM_FIBER};
pub use exporters::{Discard, Export, ExportSet, JsonWriter, LogWriter};
pub use gate::{
    DeliveryMode, LogLevel, Recorder, RecorderBuilder, RecorderStats, Sampler, StatsSnapshot,
    TraceConfig,
};
pub use global::{
    disable, emit, enable, flush, is_enabled, next_fiber_id, next_task_id, recorder, set_exporter,
};
pub use ids::IdGen;
pub use metrics::{Counter, Metrics};
