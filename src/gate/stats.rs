//! # Emit-outcome counters for the recorder.
//!
//! [`RecorderStats`] tracks what happened to events offered to an enabled
//! recorder: accepted, delivered to an exporter, dropped by sampling, or
//! lost to a failing exporter. Counters are relaxed atomics — cheap to
//! bump from the hot path and read via [`RecorderStats::snapshot`].
//!
//! Tracking only happens when
//! [`TraceConfig::enable_performance_monitoring`](crate::TraceConfig) is
//! set; a disabled recorder touches no counters at all.

use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic emit-outcome counters.
#[derive(Debug, Default)]
pub struct RecorderStats {
    /// Events accepted by an enabled recorder (post-sampling).
    emitted: AtomicU64,
    /// Events handed to an exporter.
    exported: AtomicU64,
    /// Events dropped by the sampling decision.
    sampled_out: AtomicU64,
    /// Export calls that returned an error.
    export_failures: AtomicU64,
}

impl RecorderStats {
    /// Creates zeroed stats.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record_emitted(&self) {
        self.emitted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_exported(&self, count: u64) {
        self.exported.fetch_add(count, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_sampled_out(&self) {
        self.sampled_out.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_export_failure(&self) {
        self.export_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            emitted: self.emitted.load(Ordering::Relaxed),
            exported: self.exported.load(Ordering::Relaxed),
            sampled_out: self.sampled_out.load(Ordering::Relaxed),
            export_failures: self.export_failures.load(Ordering::Relaxed),
        }
    }

    /// Zeroes all counters.
    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.exported.store(0, Ordering::Relaxed);
        self.sampled_out.store(0, Ordering::Relaxed);
        self.export_failures.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time copy of [`RecorderStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Events accepted by an enabled recorder (post-sampling).
    pub emitted: u64,
    /// Events handed to an exporter.
    pub exported: u64,
    /// Events dropped by the sampling decision.
    pub sampled_out: u64,
    /// Export calls that returned an error.
    pub export_failures: u64,
}

impl StatsSnapshot {
    /// Events still waiting in a buffered stream (accepted, not exported).
    pub fn pending(&self) -> u64 {
        self.emitted.saturating_sub(self.exported)
    }
}
