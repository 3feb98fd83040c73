//! Reward for a simulated layout state.
//!
//! ```text
//! r = w_u · utilization − w_q · mean_queue + w_b · balance − w_c · active_stations
//!
//! utilization = non-empty queues / queues
//! balance     = 1 / (1 + variance(queue lengths))
//! ```
//!
//! With no queues, utilization, mean and variance are all 0.

use crate::QState;

/// Coefficients of the reward terms.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RewardWeights {
    pub utilization:  f64,
    pub queue_length: f64,
    pub balance:      f64,
    /// Cost per open station.
    pub station_cost: f64,
}

impl Default for RewardWeights {
    fn default() -> Self {
        Self { utilization: 5.0, queue_length: 0.5, balance: 3.0, station_cost: 0.1 }
    }
}

pub fn reward(state: &QState, weights: &RewardWeights) -> f64 {
    let lengths = &state.queue_lengths;
    let (utilization, mean, variance) = if lengths.is_empty() {
        (0.0, 0.0, 0.0)
    } else {
        let n = lengths.len() as f64;
        let mean = state.average_queue_length();
        let busy = lengths.iter().filter(|&&l| l > 0).count() as f64;
        let variance = lengths.iter().map(|&l| (l as f64 - mean).powi(2)).sum::<f64>() / n;
        (busy / n, mean, variance)
    };
    let balance = 1.0 / (1.0 + variance);

    weights.utilization * utilization - weights.queue_length * mean + weights.balance * balance
        - weights.station_cost * state.active_stations as f64
}
