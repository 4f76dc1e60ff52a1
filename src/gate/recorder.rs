//! # Recorder: the runtime gate of the capture pipeline.
//!
//! [`Recorder`] is the single point every producer calls through. It
//! decides whether an event is recorded at all (the enable flag), whether
//! sampling keeps it, and how it reaches the bound exporter.
//!
//! ## Architecture
//! ```text
//! Producer ── emit(Event) ──► enabled? ──no──► return Ok (zero side effects)
//!                               │yes
//!                             sampled out? ──yes──► return Ok
//!                               │no
//!                    ┌──────────┴──────────┐
//!               Immediate              Buffered
//!                    │                     │
//!            export([event])        EventStream.push
//!                                          │ (full, or explicit flush)
//!                                   export(batch)
//! ```
//!
//! ## Rules
//! - **Disabled is free**: with the gate off, `emit` returns immediately —
//!   no exporter call, no counters, no allocation beyond the event the
//!   caller already built. This is the core performance contract.
//! - **One delivery mode per recorder**: the mode is fixed at build time
//!   and never changes for the instance's lifetime.
//! - **Exporter errors propagate**: the recorder has no safe default
//!   action to take on the caller's behalf, so failures surface to the
//!   producer as [`TraceError::Exporter`].
//! - **No I/O under a lock**: the exporter handle is cloned out of its
//!   lock before any `export` call runs.
//!
//! ## Concurrency
//! The recorder never awaits, spawns, or blocks beyond the buffer/export
//! call itself. State is guarded by atomics and short critical sections,
//! so sharing one instance across threads is safe; strict global event
//! ordering across concurrent producers is the caller's discipline (one
//! recorder per worker, or an external serialization point).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::TraceError;
use crate::events::{Event, EventStream};
use crate::exporters::{Discard, Export};
use crate::gate::builder::RecorderBuilder;
use crate::gate::config::TraceConfig;
use crate::gate::sampler::Sampler;
use crate::gate::stats::{RecorderStats, StatsSnapshot};
use crate::ids::IdGen;

/// How an enabled recorder hands events to its exporter.
///
/// Fixed per [`Recorder`] instance at build time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Each event is exported synchronously as a single-element batch the
    /// instant it is emitted. Zero-latency visibility, no batching.
    #[default]
    Immediate,
    /// Events are pushed into a bounded [`EventStream`] and exported as a
    /// batch when the stream fills or [`Recorder::flush`] is called.
    /// Batching efficiency, bounded exporter call frequency, latency up
    /// to one buffer's worth of events.
    Buffered,
}

/// Delivery state backing the mode.
#[derive(Debug)]
enum Delivery {
    Immediate,
    Buffered(Mutex<EventStream>),
}

// Lock poisoning: the guarded state (a buffer, a handle, a snapshot) stays
// structurally valid after an unwinding panic elsewhere, and the recorder
// must never take the host down, so poisoned locks are recovered.
fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

fn mutex_lock<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    lock.lock().unwrap_or_else(|e| e.into_inner())
}

/// Runtime gate: enable flag, exporter binding, delivery, ids, stats.
///
/// Disabled by default with a [`Discard`] exporter bound, so an
/// unconfigured recorder costs nothing beyond the enabled check.
///
/// ## Example
/// ```rust
/// use fibertrace::{Event, EventKind, Recorder};
///
/// let recorder = Recorder::new();
/// assert!(!recorder.is_enabled());
///
/// // Disabled: accepted and dropped with zero side effects.
/// recorder.emit(Event::new(EventKind::LoopTick, 0)).unwrap();
///
/// recorder.enable();
/// let fiber = recorder.next_fiber_id();
/// recorder.emit(Event::new(EventKind::FiberCreated, fiber)).unwrap();
/// ```
pub struct Recorder {
    enabled: AtomicBool,
    exporter: RwLock<Arc<dyn Export>>,
    delivery: Delivery,
    config: RwLock<TraceConfig>,
    ids: IdGen,
    stats: RecorderStats,
}

impl Recorder {
    /// Creates a recorder with default config, immediate delivery and a
    /// [`Discard`] exporter, disabled.
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            exporter: RwLock::new(Arc::new(Discard)),
            delivery: Delivery::Immediate,
            config: RwLock::new(TraceConfig::default()),
            ids: IdGen::new(),
            stats: RecorderStats::new(),
        }
    }

    /// Starts a builder with the given configuration.
    pub fn builder(config: TraceConfig) -> RecorderBuilder {
        RecorderBuilder::new(config)
    }

    /// Internal constructor used by [`RecorderBuilder`].
    pub(crate) fn from_parts(
        config: TraceConfig,
        exporter: Arc<dyn Export>,
        mode: DeliveryMode,
    ) -> Result<Self, TraceError> {
        config.validate()?;
        let delivery = match mode {
            DeliveryMode::Immediate => Delivery::Immediate,
            DeliveryMode::Buffered => {
                Delivery::Buffered(Mutex::new(EventStream::new(config.buffer_size)?))
            }
        };
        Ok(Self {
            enabled: AtomicBool::new(false),
            exporter: RwLock::new(exporter),
            delivery,
            config: RwLock::new(config),
            ids: IdGen::new(),
            stats: RecorderStats::new(),
        })
    }

    // ---- Gate state ----

    /// Switches recording on. Idempotent.
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    /// Switches recording off. Idempotent.
    ///
    /// Events already accepted into a buffered stream stay there and are
    /// still delivered by the next [`Recorder::flush`].
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    /// True if events are currently being recorded.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Rebinds the active exporter immediately, in any gate state.
    ///
    /// Never fails and never drops accepted events: a buffered stream
    /// keeps its contents and drains to the new exporter on the next
    /// flush.
    pub fn set_exporter(&self, exporter: Arc<dyn Export>) {
        *write_lock(&self.exporter) = exporter;
    }

    /// Handle to the currently bound exporter.
    pub fn exporter(&self) -> Arc<dyn Export> {
        Arc::clone(&read_lock(&self.exporter))
    }

    /// The delivery mode fixed at build time.
    pub fn mode(&self) -> DeliveryMode {
        match self.delivery {
            Delivery::Immediate => DeliveryMode::Immediate,
            Delivery::Buffered(_) => DeliveryMode::Buffered,
        }
    }

    // ---- Configuration snapshot ----

    /// Copy of the current configuration snapshot.
    pub fn config(&self) -> TraceConfig {
        read_lock(&self.config).clone()
    }

    /// Replaces the configuration snapshot.
    ///
    /// Re-validates the input, so a config that passed construction-time
    /// validation can never fail here. Takes effect for subsequently
    /// constructed streams; an existing buffered stream keeps its size
    /// (replace the recorder to resize).
    pub fn update_config(&self, config: TraceConfig) -> Result<(), TraceError> {
        config.validate()?;
        *write_lock(&self.config) = config;
        Ok(())
    }

    // ---- Identity ----

    /// The recorder's correlation-id generator.
    pub fn ids(&self) -> &IdGen {
        &self.ids
    }

    /// Next fiber id from the owned generator.
    #[inline]
    pub fn next_fiber_id(&self) -> u64 {
        self.ids.next_fiber_id()
    }

    /// Next task id from the owned generator.
    #[inline]
    pub fn next_task_id(&self) -> u64 {
        self.ids.next_task_id()
    }

    // ---- Stats ----

    /// Point-in-time emit-outcome counters.
    ///
    /// Populated only while
    /// [`enable_performance_monitoring`](TraceConfig::enable_performance_monitoring)
    /// is set.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    // ---- Event pipeline ----

    /// Records one event.
    ///
    /// - Disabled gate: returns `Ok(())` with zero side effects.
    /// - Sampling (when configured) drops the event with no delivery.
    /// - Immediate mode: the event is exported synchronously as a
    ///   single-element batch.
    /// - Buffered mode: the event is pushed into the stream; a full stream
    ///   drains to the exporter before this call returns.
    ///
    /// Exporter failures propagate as [`TraceError::Exporter`]; the
    /// recorder takes no retry/drop/buffer action on the caller's behalf.
    pub fn emit(&self, event: Event) -> Result<(), TraceError> {
        if !self.is_enabled() {
            return Ok(());
        }

        let (sampling, rate, track) = {
            let cfg = read_lock(&self.config);
            (
                cfg.enable_sampling,
                cfg.sampling_rate,
                cfg.enable_performance_monitoring,
            )
        };

        if sampling && !Sampler::new(rate).keep() {
            if track {
                self.stats.record_sampled_out();
            }
            return Ok(());
        }
        if track {
            self.stats.record_emitted();
        }

        match &self.delivery {
            Delivery::Immediate => {
                let exporter = self.exporter();
                self.deliver(&*exporter, std::slice::from_ref(&event), track)
            }
            Delivery::Buffered(stream) => {
                let batch = {
                    let mut stream = mutex_lock(stream);
                    stream.push(event);
                    if stream.is_full() {
                        stream.flush()
                    } else {
                        Vec::new()
                    }
                };
                if batch.is_empty() {
                    return Ok(());
                }
                let exporter = self.exporter();
                self.deliver(&*exporter, &batch, track)
            }
        }
    }

    /// Drains a buffered stream to the bound exporter.
    ///
    /// No-op in immediate mode and for an empty stream. Runs in any gate
    /// state: events accepted while enabled are delivered even after a
    /// later `disable()`.
    pub fn flush(&self) -> Result<(), TraceError> {
        let Delivery::Buffered(stream) = &self.delivery else {
            return Ok(());
        };
        let batch = mutex_lock(stream).flush();
        if batch.is_empty() {
            return Ok(());
        }
        let track = read_lock(&self.config).enable_performance_monitoring;
        let exporter = self.exporter();
        self.deliver(&*exporter, &batch, track)
    }

    /// Drops all buffered events without exporting them.
    ///
    /// Returns how many were discarded; always 0 in immediate mode.
    pub fn discard_pending(&self) -> usize {
        let Delivery::Buffered(stream) = &self.delivery else {
            return 0;
        };
        let mut stream = mutex_lock(stream);
        let dropped = stream.len();
        stream.clear();
        dropped
    }

    /// Events currently waiting in the buffered stream (0 in immediate
    /// mode).
    pub fn pending(&self) -> usize {
        match &self.delivery {
            Delivery::Immediate => 0,
            Delivery::Buffered(stream) => mutex_lock(stream).len(),
        }
    }

    fn deliver(
        &self,
        exporter: &dyn Export,
        batch: &[Event],
        track: bool,
    ) -> Result<(), TraceError> {
        match exporter.export(batch) {
            Ok(()) => {
                if track {
                    self.stats.record_exported(batch.len() as u64);
                }
                Ok(())
            }
            Err(err) => {
                if track {
                    self.stats.record_export_failure();
                }
                Err(err)
            }
        }
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Recorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder")
            .field("enabled", &self.is_enabled())
            .field("mode", &self.mode())
            .field("exporter", &self.exporter().name())
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use std::sync::Mutex;

    /// Records every batch it receives.
    #[derive(Debug, Default)]
    struct Spy {
        batches: Mutex<Vec<Vec<Event>>>,
    }

    impl Spy {
        fn batches(&self) -> Vec<Vec<Event>> {
            self.batches.lock().unwrap().clone()
        }

        fn total_events(&self) -> usize {
            self.batches().iter().map(Vec::len).sum()
        }
    }

    impl Export for Spy {
        fn export(&self, batch: &[Event]) -> Result<(), TraceError> {
            self.batches.lock().unwrap().push(batch.to_vec());
            Ok(())
        }

        fn name(&self) -> &'static str {
            "spy"
        }
    }

    /// Always fails.
    #[derive(Debug)]
    struct Broken;

    impl Export for Broken {
        fn export(&self, _batch: &[Event]) -> Result<(), TraceError> {
            Err(TraceError::exporter("broken", "Forced", "always fails"))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    fn ev(fiber: u64) -> Event {
        Event::new(EventKind::FiberStarted, fiber)
    }

    fn immediate_with_spy() -> (Recorder, Arc<Spy>) {
        let spy = Arc::new(Spy::default());
        let recorder = Recorder::builder(TraceConfig::default())
            .with_exporter(Arc::clone(&spy) as Arc<dyn Export>)
            .build()
            .unwrap();
        (recorder, spy)
    }

    fn buffered_with_spy(buffer_size: usize) -> (Recorder, Arc<Spy>) {
        let spy = Arc::new(Spy::default());
        let recorder = Recorder::builder(TraceConfig {
            buffer_size,
            ..TraceConfig::default()
        })
        .with_exporter(Arc::clone(&spy) as Arc<dyn Export>)
        .with_mode(DeliveryMode::Buffered)
        .build()
        .unwrap();
        (recorder, spy)
    }

    #[test]
    fn test_disabled_by_default() {
        let recorder = Recorder::new();
        assert!(!recorder.is_enabled());
        assert_eq!(recorder.mode(), DeliveryMode::Immediate);
    }

    #[test]
    fn test_disabled_emits_never_reach_exporter() {
        let (recorder, spy) = immediate_with_spy();
        for fiber in 0..10 {
            recorder.emit(ev(fiber)).unwrap();
        }
        assert!(spy.batches().is_empty());
    }

    #[test]
    fn test_disabled_emits_touch_no_counters() {
        let recorder = Recorder::builder(TraceConfig {
            enable_performance_monitoring: true,
            ..TraceConfig::default()
        })
        .build()
        .unwrap();

        recorder.emit(ev(1)).unwrap();
        assert_eq!(recorder.stats(), StatsSnapshot::default());
    }

    #[test]
    fn test_enable_disable_idempotent() {
        let recorder = Recorder::new();
        recorder.enable();
        recorder.enable();
        assert!(recorder.is_enabled());
        recorder.disable();
        recorder.disable();
        assert!(!recorder.is_enabled());
    }

    #[test]
    fn test_immediate_mode_one_call_per_emit_in_order() {
        let (recorder, spy) = immediate_with_spy();
        recorder.enable();
        for fiber in 1..=4 {
            recorder.emit(ev(fiber)).unwrap();
        }

        let batches = spy.batches();
        assert_eq!(batches.len(), 4);
        for (i, batch) in batches.iter().enumerate() {
            assert_eq!(batch.len(), 1, "immediate batches hold one event");
            assert_eq!(batch[0].fiber, i as u64 + 1);
        }
    }

    #[test]
    fn test_buffered_mode_drains_on_capacity() {
        let (recorder, spy) = buffered_with_spy(3);
        recorder.enable();

        recorder.emit(ev(1)).unwrap();
        recorder.emit(ev(2)).unwrap();
        assert!(spy.batches().is_empty(), "below threshold, nothing exported");
        assert_eq!(recorder.pending(), 2);

        recorder.emit(ev(3)).unwrap();
        let batches = spy.batches();
        assert_eq!(batches.len(), 1);
        let fibers: Vec<u64> = batches[0].iter().map(|e| e.fiber).collect();
        assert_eq!(fibers, vec![1, 2, 3]);
        assert_eq!(recorder.pending(), 0);
    }

    #[test]
    fn test_buffered_mode_explicit_flush() {
        let (recorder, spy) = buffered_with_spy(10);
        recorder.enable();
        recorder.emit(ev(1)).unwrap();
        recorder.emit(ev(2)).unwrap();

        recorder.flush().unwrap();
        let batches = spy.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 2);

        // Nothing pending: a second flush exports nothing.
        recorder.flush().unwrap();
        assert_eq!(spy.batches().len(), 1);
    }

    #[test]
    fn test_buffered_every_emit_lands_in_exactly_one_batch() {
        let (recorder, spy) = buffered_with_spy(4);
        recorder.enable();
        for fiber in 1..=10 {
            recorder.emit(ev(fiber)).unwrap();
        }
        recorder.flush().unwrap();

        let all: Vec<u64> = spy
            .batches()
            .iter()
            .flatten()
            .map(|e| e.fiber)
            .collect();
        assert_eq!(all, (1..=10).collect::<Vec<u64>>());
    }

    #[test]
    fn test_flush_is_noop_in_immediate_mode() {
        let (recorder, spy) = immediate_with_spy();
        recorder.enable();
        recorder.flush().unwrap();
        assert!(spy.batches().is_empty());
    }

    #[test]
    fn test_flush_after_disable_delivers_accepted_events() {
        let (recorder, spy) = buffered_with_spy(10);
        recorder.enable();
        recorder.emit(ev(1)).unwrap();
        recorder.disable();

        recorder.emit(ev(2)).unwrap(); // dropped: gate is off
        recorder.flush().unwrap();

        assert_eq!(spy.total_events(), 1);
        assert_eq!(spy.batches()[0][0].fiber, 1);
    }

    #[test]
    fn test_discard_pending_drops_without_export() {
        let (recorder, spy) = buffered_with_spy(10);
        recorder.enable();
        recorder.emit(ev(1)).unwrap();
        recorder.emit(ev(2)).unwrap();

        assert_eq!(recorder.discard_pending(), 2);
        recorder.flush().unwrap();
        assert!(spy.batches().is_empty());
    }

    #[test]
    fn test_set_exporter_rebinds_immediately() {
        let (recorder, first) = immediate_with_spy();
        let second = Arc::new(Spy::default());
        recorder.enable();

        recorder.emit(ev(1)).unwrap();
        recorder.set_exporter(Arc::clone(&second) as Arc<dyn Export>);
        recorder.emit(ev(2)).unwrap();

        assert_eq!(first.total_events(), 1);
        assert_eq!(second.total_events(), 1);
    }

    #[test]
    fn test_rebind_keeps_buffered_events_for_new_exporter() {
        let (recorder, first) = buffered_with_spy(10);
        let second = Arc::new(Spy::default());
        recorder.enable();
        recorder.emit(ev(1)).unwrap();

        recorder.set_exporter(Arc::clone(&second) as Arc<dyn Export>);
        recorder.flush().unwrap();

        assert!(first.batches().is_empty());
        assert_eq!(second.total_events(), 1);
    }

    #[test]
    fn test_exporter_error_propagates() {
        let recorder = Recorder::builder(TraceConfig::default())
            .with_exporter(Arc::new(Broken))
            .build()
            .unwrap();
        recorder.enable();

        let err = recorder.emit(ev(1)).unwrap_err();
        assert_eq!(err.as_label(), "exporter_failed");
    }

    #[test]
    fn test_sampling_rate_zero_drops_everything() {
        let spy = Arc::new(Spy::default());
        let recorder = Recorder::builder(TraceConfig {
            enable_sampling: true,
            sampling_rate: 0.0,
            enable_performance_monitoring: true,
            ..TraceConfig::default()
        })
        .with_exporter(Arc::clone(&spy) as Arc<dyn Export>)
        .build()
        .unwrap();
        recorder.enable();

        for fiber in 1..=20 {
            recorder.emit(ev(fiber)).unwrap();
        }
        assert!(spy.batches().is_empty());
        assert_eq!(recorder.stats().sampled_out, 20);
        assert_eq!(recorder.stats().emitted, 0);
    }

    #[test]
    fn test_sampling_rate_one_keeps_everything() {
        let spy = Arc::new(Spy::default());
        let recorder = Recorder::builder(TraceConfig {
            enable_sampling: true,
            sampling_rate: 1.0,
            ..TraceConfig::default()
        })
        .with_exporter(Arc::clone(&spy) as Arc<dyn Export>)
        .build()
        .unwrap();
        recorder.enable();

        for fiber in 1..=5 {
            recorder.emit(ev(fiber)).unwrap();
        }
        assert_eq!(spy.total_events(), 5);
    }

    #[test]
    fn test_stats_track_emit_outcomes() {
        let spy = Arc::new(Spy::default());
        let recorder = Recorder::builder(TraceConfig {
            enable_performance_monitoring: true,
            ..TraceConfig::default()
        })
        .with_exporter(Arc::clone(&spy) as Arc<dyn Export>)
        .build()
        .unwrap();
        recorder.enable();

        recorder.emit(ev(1)).unwrap();
        recorder.emit(ev(2)).unwrap();

        let snap = recorder.stats();
        assert_eq!(snap.emitted, 2);
        assert_eq!(snap.exported, 2);
        assert_eq!(snap.export_failures, 0);
    }

    #[test]
    fn test_stats_count_export_failures() {
        let recorder = Recorder::builder(TraceConfig {
            enable_performance_monitoring: true,
            ..TraceConfig::default()
        })
        .with_exporter(Arc::new(Broken))
        .build()
        .unwrap();
        recorder.enable();

        assert!(recorder.emit(ev(1)).is_err());
        assert_eq!(recorder.stats().export_failures, 1);
    }

    #[test]
    fn test_update_config_swaps_snapshot_but_not_stream() {
        let (recorder, spy) = buffered_with_spy(2);
        recorder.enable();

        recorder
            .update_config(TraceConfig {
                buffer_size: 100,
                ..TraceConfig::default()
            })
            .unwrap();
        assert_eq!(recorder.config().buffer_size, 100);

        // The live stream keeps its original capacity of 2.
        recorder.emit(ev(1)).unwrap();
        recorder.emit(ev(2)).unwrap();
        assert_eq!(spy.total_events(), 2);
    }

    #[test]
    fn test_update_config_rejects_invalid_snapshot() {
        let recorder = Recorder::new();
        let err = recorder
            .update_config(TraceConfig {
                buffer_size: 0,
                ..TraceConfig::default()
            })
            .unwrap_err();
        assert_eq!(err.as_label(), "config_invalid");
        assert_eq!(recorder.config().buffer_size, 1000);
    }

    #[test]
    fn test_update_config_toggles_sampling_live() {
        let (recorder, spy) = immediate_with_spy();
        recorder.enable();
        recorder.emit(ev(1)).unwrap();

        recorder
            .update_config(TraceConfig {
                enable_sampling: true,
                sampling_rate: 0.0,
                ..TraceConfig::default()
            })
            .unwrap();
        recorder.emit(ev(2)).unwrap();

        assert_eq!(spy.total_events(), 1);
    }

    #[test]
    fn test_owned_id_generator_is_isolated() {
        let a = Recorder::new();
        let b = Recorder::new();
        assert_eq!(a.next_fiber_id(), 1);
        assert_eq!(a.next_fiber_id(), 2);
        assert_eq!(b.next_fiber_id(), 1, "recorders do not share id state");
        assert_eq!(a.next_task_id(), 1);
    }

    #[test]
    fn test_default_exporter_is_discard() {
        let recorder = Recorder::new();
        recorder.enable();
        // Discard accepts anything without failing.
        recorder.emit(ev(1)).unwrap();
        assert_eq!(recorder.exporter().name(), "discard");
    }
}
