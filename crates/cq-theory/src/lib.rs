//! `cq-theory` — closed-form queueing math for the rust_cq framework.
//!
//! Everything here is a pure function of its arguments: no RNG, no state.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`mmc`]       | `mmc_metrics`, `optimal_servers`, `service_level`, `compare`, cost and arrival-pattern helpers |
//! | [`scoring`]   | satisfaction curves, score components, `overall_score`          |
//!
//! # Units
//!
//! The M/M/c functions are unit-agnostic: λ and μ must share a time unit and
//! the returned waits are in that unit.  The satisfaction and score curves
//! take seconds (waits) and customers per hour (throughput), the units the
//! engine publishes.

pub mod mmc;
pub mod scoring;


pub use mmc::{
    approximate_wait_time, arrival_pattern, compare, cost_efficiency, factorial, mmc_metrics,
    optimal_servers, service_level, Comparison, CostEfficiency, MmcMetrics,
};
pub use scoring::{
    overall_score, satisfaction_from_wait, throughput_score, utilization_score, wait_time_score,
    SatisfactionInputs, SatisfactionWeights, ScoreWeights,
};
