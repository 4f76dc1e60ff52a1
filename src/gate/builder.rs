//! Builder for constructing a [`Recorder`] with optional parts.

use std::sync::Arc;

use crate::error::TraceError;
use crate::exporters::{Discard, Export};
use crate::gate::config::TraceConfig;
use crate::gate::recorder::{DeliveryMode, Recorder};

/// Builder for a [`Recorder`].
///
/// Defaults: [`Discard`] exporter, [`DeliveryMode::Immediate`], gate
/// disabled. Configuration is validated once at [`RecorderBuilder::build`].
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use fibertrace::{DeliveryMode, LogWriter, Recorder, TraceConfig};
///
/// let recorder = Recorder::builder(TraceConfig::default())
///     .with_exporter(Arc::new(LogWriter::new()))
///     .with_mode(DeliveryMode::Buffered)
///     .build()
///     .unwrap();
/// assert_eq!(recorder.mode(), DeliveryMode::Buffered);
/// ```
pub struct RecorderBuilder {
    config: TraceConfig,
    exporter: Option<Arc<dyn Export>>,
    mode: DeliveryMode,
}

impl RecorderBuilder {
    /// Creates a builder with the given configuration.
    pub fn new(config: TraceConfig) -> Self {
        Self {
            config,
            exporter: None,
            mode: DeliveryMode::default(),
        }
    }

    /// Sets the exporter bound at construction.
    pub fn with_exporter(mut self, exporter: Arc<dyn Export>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    /// Sets the delivery mode, fixed for the recorder's lifetime.
    pub fn with_mode(mut self, mode: DeliveryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Validates the configuration and builds the recorder.
    ///
    /// Fails with [`TraceError::Config`] on an invalid field (buffered
    /// mode additionally requires a positive `buffer_size`, which config
    /// validation already guarantees).
    pub fn build(self) -> Result<Recorder, TraceError> {
        let exporter = self.exporter.unwrap_or_else(|| Arc::new(Discard));
        Recorder::from_parts(self.config, exporter, self.mode)
    }
}
