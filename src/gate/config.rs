//! # Recorder configuration.
//!
//! Provides [`TraceConfig`], the validated settings snapshot consumed when
//! a [`Recorder`](crate::Recorder) and its stream are constructed.
//!
//! Config is used in two ways:
//! 1. **Recorder creation**: `Recorder::builder(config).build()`
//! 2. **Live snapshot**: `Recorder::config()` / `Recorder::update_config()`
//!
//! Validation is construction-time and fails fast with a
//! [`TraceError::Config`] naming the offending field; nothing is deferred
//! to emit time. An updated snapshot takes effect for subsequently
//! constructed streams — an already-sized buffer is never resized.
//!
//! ## Example
//! ```rust
//! use fibertrace::{LogLevel, TraceConfig};
//!
//! let cfg = TraceConfig {
//!     buffer_size: 500,
//!     log_level: LogLevel::Warning,
//!     ..TraceConfig::default()
//! };
//! assert!(cfg.validate().is_ok());
//!
//! let zero = TraceConfig { buffer_size: 0, ..TraceConfig::default() };
//! assert!(zero.validate().is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// Verbosity hint consumed by log-style exporters.
///
/// Ordered from least to most verbose: a writer configured at
/// [`LogLevel::Info`] emits `Error`, `Warning` and `Info` lines and skips
/// `Debug` and `Trace`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Failures only.
    Error,
    /// Failures and suspicious conditions.
    Warning,
    /// Coarse lifecycle milestones (default).
    #[default]
    Info,
    /// Fine-grained lifecycle flow.
    Debug,
    /// Everything, including loop ticks.
    Trace,
}

impl LogLevel {
    /// Returns a short stable label (lowercase) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Validated recorder configuration snapshot.
///
/// ## Field semantics
/// - `buffer_size`: capacity of a buffered-mode
///   [`EventStream`](crate::EventStream); must be positive.
/// - `log_level`: verbosity hint for log-style exporters.
/// - `enable_sampling` / `sampling_rate`: when sampling is on, an enabled
///   recorder keeps each event with probability `sampling_rate`.
/// - `enable_performance_monitoring`: when set, the recorder tracks emit
///   outcomes in its stats counters.
/// - `enable_verbose_error_reporting`: hint for exporters to include full
///   cause chains when rendering failures.
///
/// All fields are public; [`TraceConfig::validate`] is the single
/// validation gate, and the recorder re-checks on
/// [`update_config`](crate::Recorder::update_config), so a snapshot that
/// validated once can never fail later.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Event-stream capacity for buffered delivery. Must be positive.
    pub buffer_size: usize,
    /// Verbosity hint for log-style exporters.
    pub log_level: LogLevel,
    /// Whether probabilistic sampling is applied to enabled emits.
    pub enable_sampling: bool,
    /// Probability of keeping an event; must be within `[0.0, 1.0]`.
    pub sampling_rate: f64,
    /// Whether the recorder tracks emit outcomes in stats counters.
    pub enable_performance_monitoring: bool,
    /// Whether exporters should render full cause chains.
    pub enable_verbose_error_reporting: bool,
}

impl Default for TraceConfig {
    /// Default configuration:
    ///
    /// - `buffer_size = 1000`
    /// - `log_level = LogLevel::Info`
    /// - `enable_sampling = false`
    /// - `sampling_rate = 1.0` (keep everything)
    /// - `enable_performance_monitoring = false`
    /// - `enable_verbose_error_reporting = false`
    fn default() -> Self {
        Self {
            buffer_size: 1000,
            log_level: LogLevel::Info,
            enable_sampling: false,
            sampling_rate: 1.0,
            enable_performance_monitoring: false,
            enable_verbose_error_reporting: false,
        }
    }
}

impl TraceConfig {
    /// Checks every field invariant.
    ///
    /// - `buffer_size` must be greater than zero;
    /// - `sampling_rate` must be finite and within `[0.0, 1.0]`, whether or
    ///   not sampling is currently enabled.
    ///
    /// Fails with a [`TraceError::Config`] naming the invalid field.
    pub fn validate(&self) -> Result<(), TraceError> {
        if self.buffer_size == 0 {
            return Err(TraceError::Config {
                field: "buffer_size",
                reason: "must be greater than zero".into(),
            });
        }
        if !self.sampling_rate.is_finite()
            || !(0.0..=1.0).contains(&self.sampling_rate)
        {
            return Err(TraceError::Config {
                field: "sampling_rate",
                reason: format!("must be within [0.0, 1.0], got {}", self.sampling_rate),
            });
        }
        Ok(())
    }

    /// Consuming helper: returns the config if it validates.
    pub fn validated(self) -> Result<Self, TraceError> {
        self.validate()?;
        Ok(self)
    }
}
