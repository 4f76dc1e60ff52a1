//! Null-object exporter: accepts any batch, does nothing, never fails.
//!
//! [`Discard`] is the default binding of every
//! [`Recorder`](crate::Recorder), so an enabled-but-unconfigured recorder
//! still costs nothing beyond the enabled check.

use crate::error::TraceError;
use crate::events::Event;
use crate::exporters::Export;

/// Exporter that drops every batch.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl Export for Discard {
    fn export(&self, _batch: &[Event]) -> Result<(), TraceError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "discard"
    }
}
