//! # Control plane: recorder, configuration, sampling, stats.
//!
//! The [`Recorder`] is the runtime gate every producer calls through;
//! [`TraceConfig`] is the validated settings snapshot it carries;
//! [`Sampler`] makes the probabilistic keep/drop decision; and
//! [`RecorderStats`] counts emit outcomes when performance monitoring is
//! on.

mod builder;
mod config;
mod recorder;
mod sampler;
mod stats;

pub use builder::RecorderBuilder;
pub use config::{LogLevel, TraceConfig};
pub use recorder::{DeliveryMode, Recorder};
pub use sampler::Sampler;
pub use stats::{RecorderStats, StatsSnapshot};
