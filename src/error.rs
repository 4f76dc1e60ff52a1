//! Error types used by the fibertrace recorder and exporters.
//!
//! All failures in this crate surface as a single [`TraceError`] enum with
//! one variant per error kind:
//!
//! - [`TraceError::Config`] — invalid configuration field, raised at config
//!   validation, never deferred.
//! - [`TraceError::InvalidEvent`] — malformed event field, raised at event
//!   construction, before the event reaches a buffer or exporter.
//! - [`TraceError::Exporter`] — failure during export, carrying the original
//!   failure's identity and message instead of the underlying error type.
//! - [`TraceError::Capacity`] — zero-capacity buffer construction.
//!
//! Propagation is always synchronous to the immediate caller; there is no
//! background error channel and no retry loop. The one designed swallow is
//! `emit` on a disabled recorder, which is a no-op by contract, not a
//! suppressed failure.

use thiserror::Error;

/// # Errors produced by the fibertrace core.
///
/// Each variant corresponds to one error kind in the crate's taxonomy.
/// Helper methods (`as_label`, `as_message`) provide stable strings for
/// logs and metrics.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TraceError {
    /// A configuration field failed validation.
    #[error("invalid config field `{field}`: {reason}")]
    Config {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// An event field failed validation at construction.
    #[error("invalid event field `{field}`: {reason}")]
    InvalidEvent {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// An exporter failed while handling a batch.
    ///
    /// Carries the original failure's identity (`cause`) and message as
    /// structured context; the underlying error type is never exposed.
    #[error("exporter `{exporter}` failed ({cause}): {message}")]
    Exporter {
        /// Name of the failing exporter.
        exporter: &'static str,
        /// Identity of the original failure (e.g. an `io::ErrorKind`).
        cause: String,
        /// Message of the original failure.
        message: String,
    },

    /// Buffer construction was attempted with capacity zero.
    #[error("buffer capacity must be greater than zero")]
    Capacity,
}

impl TraceError {
    /// Builds an exporter error from any underlying failure.
    ///
    /// `cause` should identify the failure's class (for I/O errors, the
    /// [`std::io::ErrorKind`] debug form is a good fit).
    pub fn exporter(
        exporter: &'static str,
        cause: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        TraceError::Exporter {
            exporter,
            cause: cause.into(),
            message: message.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use fibertrace::TraceError;
    ///
    /// let err = TraceError::Capacity;
    /// assert_eq!(err.as_label(), "capacity_invalid");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TraceError::Config { .. } => "config_invalid",
            TraceError::InvalidEvent { .. } => "event_invalid",
            TraceError::Exporter { .. } => "exporter_failed",
            TraceError::Capacity => "capacity_invalid",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TraceError::Config { field, reason } => format!("config `{field}`: {reason}"),
            TraceError::InvalidEvent { field, reason } => format!("event `{field}`: {reason}"),
            TraceError::Exporter {
                exporter,
                cause,
                message,
            } => format!("exporter `{exporter}`: {cause}: {message}"),
            TraceError::Capacity => "capacity must be greater than zero".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        let config = TraceError::Config {
            field: "buffer_size",
            reason: "must be greater than zero".into(),
        };
        let event = TraceError::InvalidEvent {
            field: "task",
            reason: "must be nonzero when present".into(),
        };
        let exporter = TraceError::exporter("log", "BrokenPipe", "pipe closed");

        assert_eq!(config.as_label(), "config_invalid");
        assert_eq!(event.as_label(), "event_invalid");
        assert_eq!(exporter.as_label(), "exporter_failed");
        assert_eq!(TraceError::Capacity.as_label(), "capacity_invalid");
    }

    #[test]
    fn test_exporter_error_keeps_cause_and_message() {
        let err = TraceError::exporter("json", "Utf8Error", "invalid byte");
        match err {
            TraceError::Exporter {
                exporter,
                cause,
                message,
            } => {
                assert_eq!(exporter, "json");
                assert_eq!(cause, "Utf8Error");
                assert_eq!(message, "invalid byte");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_display_names_field() {
        let err = TraceError::Config {
            field: "sampling_rate",
            reason: "must be within [0.0, 1.0]".into(),
        };
        let text = err.to_string();
        assert!(text.contains("sampling_rate"), "missing field in: {text}");
    }
}
