//! # Probabilistic sampling decision.
//!
//! [`Sampler`] decides whether an enabled recorder keeps an individual
//! event. The decision is memoryless: each event is kept with probability
//! `rate`, independently of every other event.
//!
//! Sampling runs after the enabled check (a disabled recorder never
//! reaches it) and before delivery, so a sampled-out event costs one
//! random draw and nothing else.

use rand::Rng;

/// Memoryless keep/drop decision with a fixed rate.
///
/// Rates at the boundaries short-circuit without drawing randomness:
/// `1.0` keeps everything, `0.0` keeps nothing.
#[derive(Clone, Copy, Debug)]
pub struct Sampler {
    rate: f64,
}

impl Sampler {
    /// Creates a sampler with the given keep probability.
    ///
    /// The rate is expected to come from a validated
    /// [`TraceConfig`](crate::TraceConfig) and therefore lie in
    /// `[0.0, 1.0]`; values outside the range are clamped.
    pub fn new(rate: f64) -> Self {
        Self {
            rate: rate.clamp(0.0, 1.0),
        }
    }

    /// The configured keep probability.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Decides whether to keep one event.
    pub fn keep(&self) -> bool {
        if self.rate >= 1.0 {
            return true;
        }
        if self.rate <= 0.0 {
            return false;
        }
        rand::rng().random::<f64>() < self.rate
    }
}
