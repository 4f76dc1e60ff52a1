//! # Event model and bounded storage.
//!
//! This module holds the data plane of the recorder:
//!
//! ```text
//! Producer ──► Event (immutable fact) ──► Recorder::emit
//!                                            │
//!                      immediate mode ───────┼────► Export::export([event])
//!                                            │
//!                      buffered mode ──► EventStream ──► Export::export(batch)
//!                                        (RingBuffer, overwrite-oldest)
//! ```
//!
//! - [`Event`] / [`EventKind`] / [`Fact`] / [`Payload`]: the fact record.
//! - [`RingBuffer`]: fixed-capacity circular storage, FIFO reads.
//! - [`EventStream`]: the typed façade binding the buffer to [`Event`].

mod buffer;
mod event;
mod stream;

pub use buffer::RingBuffer;
pub use event::{Event, EventKind, Fact, Payload, SYSTEM_FIBER};
pub use stream::EventStream;
