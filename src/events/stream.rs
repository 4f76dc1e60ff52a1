//! # Typed event stream over the ring buffer.
//!
//! [`EventStream`] binds one [`RingBuffer`] to the [`Event`] type so
//! producers and exporters depend on a stream concept rather than a
//! generic buffer. Capacity is chosen per deployment profile (small for
//! production, large for development) without touching producer code.
//!
//! Semantics are identical to [`RingBuffer`]: push always succeeds and
//! evicts the oldest event when full; reads are oldest-first; `flush`
//! drains, `clear` drops.

use crate::error::TraceError;
use crate::events::{Event, RingBuffer};

/// Bounded FIFO stream of [`Event`]s with overwrite-oldest eviction.
#[derive(Debug)]
pub struct EventStream {
    buffer: RingBuffer<Event>,
}

impl EventStream {
    /// Creates a stream holding at most `capacity` events.
    ///
    /// Fails with [`TraceError::Capacity`] when `capacity == 0`.
    pub fn new(capacity: usize) -> Result<Self, TraceError> {
        Ok(Self {
            buffer: RingBuffer::new(capacity)?,
        })
    }

    /// Maximum number of events the stream can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Appends an event, silently evicting the oldest one when full.
    #[inline]
    pub fn push(&mut self, event: Event) {
        self.buffer.push(event);
    }

    /// Removes and returns the oldest event, or `None` if empty.
    #[inline]
    pub fn pop(&mut self) -> Option<Event> {
        self.buffer.pop()
    }

    /// Removes and returns all events, oldest first.
    #[inline]
    pub fn flush(&mut self) -> Vec<Event> {
        self.buffer.flush()
    }

    /// Returns clones of all events, oldest first, without removing them.
    #[inline]
    pub fn peek_all(&self) -> Vec<Event> {
        self.buffer.peek_all()
    }

    /// Drops all events without returning them.
    #[inline]
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Current occupancy.
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True if the stream holds no events.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// True if occupancy equals capacity.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.buffer.is_full()
    }
}
