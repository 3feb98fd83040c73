//! Independent replications of one layout.
//!
//! Each replication is a fresh copy of an engine's configuration with its own
//! seed, derived from the master seed in `params.seed`, so the set of runs is reproducible while the
//! runs themselves are independent.  With the `parallel` feature the runs
//! execute on Rayon's thread pool; results are identical either way.

use cq_core::{CheckoutStation, Metrics, SimRng};

use crate::{Engine, EngineBuilder, EngineTuning, NoopObserver, SimParams, SimResult};

/// Mean and spread of final metrics across replications.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplicationSummary {
    pub runs:                   usize,
    pub mean_wait_time:         f64,
    /// Sample standard deviation of the average wait; 0 for fewer than 2 runs.
    pub wait_time_std_dev:      f64,
    pub mean_queue_length:      f64,
    pub mean_utilization:       f64,
    pub mean_throughput:        f64,
    pub mean_served:            f64,
    pub mean_abandoned:         f64,
    pub mean_satisfaction:      f64,
    pub mean_score:             f64,
    /// Final metrics of every run, in seed order.
    pub per_run:                Vec<Metrics>,
}

impl ReplicationSummary {
    fn from_runs(per_run: Vec<Metrics>) -> Self {
        let runs = per_run.len();
        let mean = |f: fn(&Metrics) -> f64| {
            if runs == 0 {
                0.0
            } else {
                per_run.iter().map(f).sum::<f64>() / runs as f64
            }
        };

        let mean_wait_time = mean(|m| m.average_wait_time);
        let wait_time_std_dev = if runs < 2 {
            0.0
        } else {
            let ss: f64 = per_run
                .iter()
                .map(|m| (m.average_wait_time - mean_wait_time).powi(2))
                .sum();
            (ss / (runs - 1) as f64).sqrt()
        };

        Self {
            runs,
            mean_wait_time,
            wait_time_std_dev,
            mean_queue_length: mean(|m| m.average_queue_length),
            mean_utilization:  mean(|m| m.utilization),
            mean_throughput:   mean(|m| m.throughput),
            mean_served:       mean(|m| m.total_customers_served as f64),
            mean_abandoned:    mean(|m| m.total_customers_abandoned as f64),
            mean_satisfaction: mean(|m| m.satisfaction),
            mean_score:        mean(|m| m.score),
            per_run,
        }
    }
}

// ── Replication ───────────────────────────────────────────────────────────────

impl Engine {
    /// Run `runs` fresh copies of this engine's configuration, each seeded
    /// from `params.seed`.
    ///
    /// Every copy shares the stations, tuning, store profile, and scoring
    /// weights; only the seed differs.  The engine's own state is untouched.
    pub fn replicate(&self, runs: usize) -> ReplicationSummary {
        let mut master = SimRng::new(self.params().seed);
        let seeds: Vec<u64> = (0..runs).map(|_| master.next_seed()).collect();

        let run_one = |seed: u64| -> Metrics {
            let mut engine = self.reseeded(seed);
            engine.run(&mut NoopObserver)
        };

        #[cfg(not(feature = "parallel"))]
        let per_run: Vec<Metrics> = seeds.into_iter().map(run_one).collect();

        #[cfg(feature = "parallel")]
        let per_run: Vec<Metrics> = {
            use rayon::prelude::*;
            seeds.into_par_iter().map(run_one).collect()
        };

        ReplicationSummary::from_runs(per_run)
    }
}

/// Validate the inputs with [`EngineBuilder`], then [`Engine::replicate`]
/// with the built-in profile for `params.day_type`.
pub fn replicate(
    stations: &[CheckoutStation],
    params:   &SimParams,
    tuning:   &EngineTuning,
    runs:     usize,
) -> SimResult<ReplicationSummary> {
    let engine = EngineBuilder::new(stations.to_vec(), params.clone())
        .tuning(tuning.clone())
        .build()?;
    Ok(engine.replicate(runs))
}
