//! # Lifecycle events recorded by fibertrace.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Fiber events**: fiber execution flow (created, started, suspended,
//!   resumed, terminated)
//! - **Task events**: task execution flow (submitted, started, completed,
//!   failed)
//! - **Runtime events**: await boundaries and loop ticks
//!
//! The [`Event`] struct carries a wall-clock timestamp, correlation ids and
//! a payload of primitive facts. Events are immutable once constructed:
//! producers build them at the moment a fact is known and hand them to the
//! recorder, which never mutates them.
//!
//! ## Compatibility
//! The kind set is a published contract: kinds are only ever added, never
//! removed or repurposed. Match with a wildcard arm to stay forward
//! compatible.
//!
//! ## Payload rules
//! Payloads map string keys to scalar facts ([`Fact`]). They can never hold
//! live runtime objects, so recording an event cannot extend the lifetime
//! of (or leak) a fiber, task, or closure in the observed system.
//!
//! ## Example
//! ```rust
//! use fibertrace::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TaskFailed, 3)
//!     .with_task(7)
//!     .with_fact("reason", "connection refused")
//!     .with_fact("attempt", 2i64);
//!
//! assert_eq!(ev.kind, EventKind::TaskFailed);
//! assert_eq!(ev.fiber, 3);
//! assert_eq!(ev.task, Some(7));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use serde::Serialize;

use crate::error::TraceError;

/// Fiber id reserved for system-level events that belong to no fiber
/// (loop ticks, runtime housekeeping).
pub const SYSTEM_FIBER: u64 = 0;

/// Classification of recorded lifecycle events.
///
/// Closed, versioned set: once published, a kind is never removed or
/// repurposed, only added to.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    // === Fiber lifecycle ===
    /// A fiber was created.
    FiberCreated,
    /// A fiber began executing.
    FiberStarted,
    /// A fiber yielded at a suspension point.
    FiberSuspended,
    /// A suspended fiber was resumed.
    FiberResumed,
    /// A fiber finished (normally or not; see payload facts).
    FiberTerminated,

    // === Task lifecycle ===
    /// A task was submitted to the runtime.
    TaskSubmitted,
    /// A task began executing.
    TaskStarted,
    /// A task completed successfully.
    TaskCompleted,
    /// A task failed; the payload usually carries a `reason` fact.
    TaskFailed,

    // === Runtime ===
    /// Execution entered an await point.
    AwaitEnter,
    /// Execution returned from an await point.
    AwaitExit,
    /// The event loop completed one tick.
    LoopTick,
}

impl EventKind {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use fibertrace::EventKind;
    ///
    /// assert_eq!(EventKind::FiberCreated.as_label(), "fiber_created");
    /// assert_eq!(EventKind::LoopTick.as_label(), "loop_tick");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::FiberCreated => "fiber_created",
            EventKind::FiberStarted => "fiber_started",
            EventKind::FiberSuspended => "fiber_suspended",
            EventKind::FiberResumed => "fiber_resumed",
            EventKind::FiberTerminated => "fiber_terminated",
            EventKind::TaskSubmitted => "task_submitted",
            EventKind::TaskStarted => "task_started",
            EventKind::TaskCompleted => "task_completed",
            EventKind::TaskFailed => "task_failed",
            EventKind::AwaitEnter => "await_enter",
            EventKind::AwaitExit => "await_exit",
            EventKind::LoopTick => "loop_tick",
        }
    }
}

/// A primitive fact stored in an event payload.
///
/// The set is closed to scalars so payloads can never carry references to
/// live runtime objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Fact {
    /// String fact.
    Str(Arc<str>),
    /// Signed integer fact.
    Int(i64),
    /// Unsigned integer fact.
    Uint(u64),
    /// Floating-point fact (must be finite).
    Float(f64),
    /// Boolean fact.
    Bool(bool),
}

impl Fact {
    /// True if the fact is a well-formed value (finite, for floats).
    fn is_well_formed(&self) -> bool {
        match self {
            Fact::Float(f) => f.is_finite(),
            _ => true,
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fact::Str(s) => write!(f, "{s:?}"),
            Fact::Int(v) => write!(f, "{v}"),
            Fact::Uint(v) => write!(f, "{v}"),
            Fact::Float(v) => write!(f, "{v}"),
            Fact::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Fact {
    fn from(v: &str) -> Self {
        Fact::Str(Arc::from(v))
    }
}

impl From<String> for Fact {
    fn from(v: String) -> Self {
        Fact::Str(Arc::from(v.as_str()))
    }
}

impl From<Arc<str>> for Fact {
    fn from(v: Arc<str>) -> Self {
        Fact::Str(v)
    }
}

impl From<i64> for Fact {
    fn from(v: i64) -> Self {
        Fact::Int(v)
    }
}

impl From<i32> for Fact {
    fn from(v: i32) -> Self {
        Fact::Int(v.into())
    }
}

impl From<u64> for Fact {
    fn from(v: u64) -> Self {
        Fact::Uint(v)
    }
}

impl From<u32> for Fact {
    fn from(v: u32) -> Self {
        Fact::Uint(v.into())
    }
}

impl From<f64> for Fact {
    fn from(v: f64) -> Self {
        Fact::Float(v)
    }
}

impl From<bool> for Fact {
    fn from(v: bool) -> Self {
        Fact::Bool(v)
    }
}

/// Ordered map of string keys to primitive facts.
///
/// Keys must be non-empty; float facts must be finite. Both rules are
/// enforced by [`Payload::try_insert`] and by [`Event::create`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Payload(BTreeMap<Arc<str>, Fact>);

impl Payload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fact after validating key and value.
    ///
    /// Rejects empty keys and non-finite float facts with
    /// [`TraceError::InvalidEvent`]. A later insert with the same key
    /// replaces the earlier fact.
    pub fn try_insert(
        &mut self,
        key: impl Into<Arc<str>>,
        value: impl Into<Fact>,
    ) -> Result<(), TraceError> {
        let key = key.into();
        if key.is_empty() {
            return Err(TraceError::InvalidEvent {
                field: "payload",
                reason: "fact key must be non-empty".into(),
            });
        }
        let value = value.into();
        if !value.is_well_formed() {
            return Err(TraceError::InvalidEvent {
                field: "payload",
                reason: format!("fact `{key}` must be a finite number"),
            });
        }
        self.0.insert(key, value);
        Ok(())
    }

    /// Returns the fact stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Fact> {
        self.0.get(key)
    }

    /// Number of facts in the payload.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the payload holds no facts.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates facts in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &Fact)> {
        self.0.iter()
    }
}

/// Immutable lifecycle fact record.
///
/// Created once by a producer at the moment a fact is known; never mutated;
/// becomes unreachable once evicted from a buffer or exported.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Event classification.
    pub kind: EventKind,
    /// Wall-clock timestamp, assigned at construction.
    pub at: SystemTime,
    /// Fiber correlation id; [`SYSTEM_FIBER`] for system-level events.
    pub fiber: u64,
    /// Task correlation id; absent for fiber-only events.
    pub task: Option<u64>,
    /// Primitive facts attached to the event.
    pub payload: Payload,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp.
    ///
    /// This is the trusted in-crate constructor: combine it with the
    /// `with_*` builders when the inputs are known good. Producer glue
    /// handling untrusted inputs should use [`Event::create`] instead.
    pub fn new(kind: EventKind, fiber: u64) -> Self {
        Self {
            kind,
            at: SystemTime::now(),
            fiber,
            task: None,
            payload: Payload::new(),
        }
    }

    /// Attaches a task correlation id.
    ///
    /// The id must be nonzero; zero is reserved.
    #[inline]
    pub fn with_task(mut self, task: u64) -> Self {
        debug_assert!(task != 0, "task id 0 is reserved");
        self.task = Some(task);
        self
    }

    /// Attaches a payload fact.
    ///
    /// The key must be non-empty and float facts must be finite; the
    /// checked path for untrusted inputs is [`Event::create`].
    #[inline]
    pub fn with_fact(mut self, key: impl Into<Arc<str>>, value: impl Into<Fact>) -> Self {
        let inserted = self.payload.try_insert(key, value);
        debug_assert!(inserted.is_ok(), "malformed fact: {inserted:?}");
        self
    }

    /// Validating constructor for the producer-facing surface.
    ///
    /// Checks every field before the event can reach a buffer or an
    /// exporter:
    /// - `task`, when present, must be nonzero (zero is reserved);
    /// - fact keys must be non-empty;
    /// - float facts must be finite.
    ///
    /// # Example
    /// ```
    /// use fibertrace::{Event, EventKind};
    ///
    /// let ev = Event::create(
    ///     EventKind::TaskStarted,
    ///     1,
    ///     Some(42),
    ///     [("queue_ms", 5i64.into())],
    /// )
    /// .unwrap();
    /// assert_eq!(ev.task, Some(42));
    ///
    /// let err = Event::create::<&str>(EventKind::TaskStarted, 1, Some(0), []).unwrap_err();
    /// assert_eq!(err.as_label(), "event_invalid");
    /// ```
    pub fn create<K>(
        kind: EventKind,
        fiber: u64,
        task: Option<u64>,
        facts: impl IntoIterator<Item = (K, Fact)>,
    ) -> Result<Self, TraceError>
    where
        K: Into<Arc<str>>,
    {
        if task == Some(0) {
            return Err(TraceError::InvalidEvent {
                field: "task",
                reason: "task id must be nonzero when present".into(),
            });
        }
        let mut payload = Payload::new();
        for (key, value) in facts {
            payload.try_insert(key, value)?;
        }
        Ok(Self {
            kind,
            at: SystemTime::now(),
            fiber,
            task,
            payload,
        })
    }

    /// True if this is a system-level event (no owning fiber).
    #[inline]
    pub fn is_system(&self) -> bool {
        self.fiber == SYSTEM_FIBER
    }
}
