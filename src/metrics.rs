//! # Flat named counters, independent of the event pipeline.
//!
//! Producers increment [`Counter`]s directly; counters are never buffered,
//! sampled, or exported through the recorder. They are signed, unbounded
//! and may go negative (a gauge-style decrement is an ordinary `add` with
//! a negative delta).
//!
//! [`Metrics`] is a concurrent name→counter registry: counters are created
//! on first use and shared thereafter.
//!
//! ## Example
//! ```rust
//! use fibertrace::Metrics;
//!
//! let metrics = Metrics::new();
//! metrics.inc("fibers_spawned");
//! metrics.add("queue_depth", 3);
//! metrics.add("queue_depth", -1);
//!
//! assert_eq!(metrics.get("fibers_spawned"), 1);
//! assert_eq!(metrics.get("queue_depth"), 2);
//! assert_eq!(metrics.get("never_touched"), 0);
//! ```

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;

/// Named signed counter. Starts at 0; no bounds.
#[derive(Debug, Default)]
pub struct Counter(AtomicI64);

impl Counter {
    /// Creates a counter at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value.
    #[inline]
    pub fn get(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }

    /// Adds `delta` (positive or negative).
    #[inline]
    pub fn add(&self, delta: i64) {
        self.0.fetch_add(delta, Ordering::Relaxed);
    }

    /// Adds 1.
    #[inline]
    pub fn inc(&self) {
        self.add(1);
    }

    /// Resets to 0.
    pub fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

/// Concurrent registry of named counters.
///
/// Counters are created lazily on first touch; reading an untouched name
/// yields 0 without creating it.
#[derive(Debug, Default)]
pub struct Metrics {
    counters: DashMap<String, Counter>,
}

impl Metrics {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta` to the named counter, creating it at 0 first if needed.
    pub fn add(&self, name: &str, delta: i64) {
        if let Some(counter) = self.counters.get(name) {
            counter.add(delta);
            return;
        }
        self.counters
            .entry(name.to_string())
            .or_default()
            .add(delta);
    }

    /// Adds 1 to the named counter.
    pub fn inc(&self, name: &str) {
        self.add(name, 1);
    }

    /// Current value of the named counter; 0 if it was never touched.
    pub fn get(&self, name: &str) -> i64 {
        self.counters.get(name).map(|c| c.get()).unwrap_or(0)
    }

    /// Resets the named counter to 0 (no-op for untouched names).
    pub fn reset(&self, name: &str) {
        if let Some(counter) = self.counters.get(name) {
            counter.reset();
        }
    }

    /// Resets every registered counter to 0.
    pub fn reset_all(&self) {
        for entry in self.counters.iter() {
            entry.value().reset();
        }
    }

    /// Number of registered counters.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    /// True if no counter has been touched yet.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Point-in-time copy of all counters, sorted by name.
    pub fn snapshot(&self) -> BTreeMap<String, i64> {
        self.counters
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().get()))
            .collect()
    }
}
