//! # ExportSet: synchronous fan-out over multiple exporters.
//!
//! [`ExportSet`] delivers each batch to every member exporter, in
//! registration order, on the calling thread.
//!
//! ## What it guarantees
//! - Every member sees every batch, even when an earlier member fails.
//! - Per-member batch order equals emission order.
//!
//! ## What it does **not** guarantee
//! - Isolation in time: one slow member delays the rest (the core forbids
//!   worker tasks, so fan-out is sequential by construction).
//! - Error aggregation: when several members fail on one batch, only the
//!   first failure is reported.

use std::sync::Arc;

use crate::error::TraceError;
use crate::events::Event;
use crate::exporters::Export;

/// Composite exporter delivering each batch to every member.
#[derive(Default)]
pub struct ExportSet {
    members: Vec<Arc<dyn Export>>,
}

impl ExportSet {
    /// Creates a set from the given members.
    pub fn new(members: Vec<Arc<dyn Export>>) -> Self {
        Self { members }
    }

    /// Appends a member; it sees batches delivered after this call.
    pub fn push(&mut self, exporter: Arc<dyn Export>) {
        self.members.push(exporter);
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if there are no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Export for ExportSet {
    /// Delivers the batch to every member, then reports the first failure
    /// (if any).
    fn export(&self, batch: &[Event]) -> Result<(), TraceError> {
        let mut first_failure = None;
        for member in &self.members {
            if let Err(err) = member.export(batch) {
                first_failure.get_or_insert(err);
            }
        }
        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "set"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct Counting(AtomicUsize);

    impl Export for Counting {
        fn export(&self, batch: &[Event]) -> Result<(), TraceError> {
            self.0.fetch_add(batch.len(), Ordering::Relaxed);
            Ok(())
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    #[derive(Debug)]
    struct Broken(&'static str);

    impl Export for Broken {
        fn export(&self, _batch: &[Event]) -> Result<(), TraceError> {
            Err(TraceError::exporter(self.0, "Forced", "always fails"))
        }

        fn name(&self) -> &'static str {
            self.0
        }
    }

    fn batch(n: u64) -> Vec<Event> {
        (1..=n)
            .map(|fiber| Event::new(EventKind::FiberStarted, fiber))
            .collect()
    }

    #[test]
    fn test_every_member_sees_every_batch() {
        let a = Arc::new(Counting::default());
        let b = Arc::new(Counting::default());
        let set = ExportSet::new(vec![
            Arc::clone(&a) as Arc<dyn Export>,
            Arc::clone(&b) as Arc<dyn Export>,
        ]);

        set.export(&batch(3)).unwrap();
        set.export(&batch(2)).unwrap();

        assert_eq!(a.0.load(Ordering::Relaxed), 5);
        assert_eq!(b.0.load(Ordering::Relaxed), 5);
    }

    #[test]
    fn test_failure_does_not_stop_later_members() {
        let late = Arc::new(Counting::default());
        let set = ExportSet::new(vec![
            Arc::new(Broken("first")) as Arc<dyn Export>,
            Arc::clone(&late) as Arc<dyn Export>,
        ]);

        let err = set.export(&batch(2)).unwrap_err();
        assert_eq!(err.as_label(), "exporter_failed");
        assert_eq!(late.0.load(Ordering::Relaxed), 2, "later member still ran");
    }

    #[test]
    fn test_first_failure_wins() {
        let set = ExportSet::new(vec![
            Arc::new(Broken("alpha")) as Arc<dyn Export>,
            Arc::new(Broken("beta")) as Arc<dyn Export>,
        ]);

        match set.export(&batch(1)).unwrap_err() {
            TraceError::Exporter { exporter, .. } => assert_eq!(exporter, "alpha"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_set_accepts_batches() {
        let set = ExportSet::default();
        assert!(set.is_empty());
        set.export(&batch(3)).unwrap();
    }

    #[test]
    fn test_push_grows_the_set() {
        let mut set = ExportSet::default();
        set.push(Arc::new(Counting::default()));
        assert_eq!(set.len(), 1);
    }
}
