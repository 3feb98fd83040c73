//! Seedable random-variate source.
//!
//! # Determinism strategy
//!
//! Every engine and agent owns one `SimRng` built from an explicit seed, so a
//! run is reproducible from `(inputs, seed)` alone.  Independent replications
//! draw their seeds from a master generator with [`SimRng::next_seed`].
//!
//! The variates here are the only randomness the simulation uses:
//!
//! - [`uniform`][SimRng::uniform] — `U[0, 1)`
//! - [`weighted_index`][SimRng::weighted_index] — categorical draw
//! - [`bounded_exponential`][SimRng::bounded_exponential] — exponential draw
//!   clamped to a multiple of its mean

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Smallest rate accepted by [`SimRng::bounded_exponential`]; keeps the mean
/// finite when callers pass zero.
pub const MIN_EXPONENTIAL_RATE: f64 = 0.0001;

/// Simulation RNG.
///
/// Used only in single-threaded contexts.  Parallel replications give each
/// worker its own engine, and with it its own generator.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Draw a fresh 64-bit seed, e.g. for a replication's engine.
    #[inline]
    pub fn next_seed(&mut self) -> u64 {
        self.0.r#gen::<u64>()
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Sample an index with probability proportional to `weights[i]`.
    ///
    /// Degenerate weight vectors (empty, all zero, negative, or non-finite)
    /// fall back to index `0` rather than failing.
    pub fn weighted_index(&mut self, weights: &[f64]) -> usize {
        match WeightedIndex::new(weights) {
            Ok(dist) => dist.sample(&mut self.0),
            Err(_) => 0,
        }
    }

    /// Exponential draw with the given `rate` (mean `1 / rate`), truncated at
    /// `max_multiplier` times the mean.
    ///
    /// `rate` is floored at [`MIN_EXPONENTIAL_RATE`].
    pub fn bounded_exponential(&mut self, rate: f64, max_multiplier: f64) -> f64 {
        let safe_rate = if rate.is_finite() { rate.max(MIN_EXPONENTIAL_RATE) } else { MIN_EXPONENTIAL_RATE };
        // 1 - U lies in (0, 1], so the log is finite.
        let value = -(1.0 - self.uniform()).ln() / safe_rate;
        let mean = 1.0 / safe_rate;
        value.min(mean * max_multiplier)
    }
}
