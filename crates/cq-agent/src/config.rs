//! Learning hyper-parameters.

use std::time::Duration;

use crate::{AgentError, AgentResult, RewardWeights};

/// Hyper-parameters of the Q-learning agent and its training schedule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LearningConfig {
    // --- Update rule ---
    /// α in the Q-learning update.
    pub learning_rate:       f64,
    /// γ in the Q-learning update.
    pub discount_factor:     f64,

    // --- Exploration ---
    /// ε at construction.
    pub initial_exploration: f64,
    /// ε is multiplied by this after every batch...
    pub exploration_decay:   f64,
    /// ... but never drops below this.
    pub min_exploration:     f64,

    // --- Training schedule ---
    pub episodes_per_batch:  u32,
    pub steps_per_episode:   u32,
    /// Training halts once this many episodes have run.
    pub max_episodes:        u32,
    /// Wall-clock pause between batches of a background training task.
    pub batch_interval:      Duration,

    // --- Environment ---
    /// Adding stations is infeasible at this layout size.
    pub max_stations:        usize,
    /// Share of each queue kept by `optimize_layout`.
    pub layout_retention:    f64,
    pub reward:              RewardWeights,

    // --- Bookkeeping ---
    /// Most recent updates kept in the action history.
    pub history_limit:       usize,
    /// RNG seed for exploration and the training environment.
    pub seed:                u64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            learning_rate:       0.1,
            discount_factor:     0.9,
            initial_exploration: 0.3,
            exploration_decay:   0.995,
            min_exploration:     0.01,
            episodes_per_batch:  10,
            steps_per_episode:   10,
            max_episodes:        1_000,
            batch_interval:      Duration::from_millis(100),
            max_stations:        10,
            layout_retention:    0.8,
            reward:              RewardWeights::default(),
            history_limit:       100,
            seed:                42,
        }
    }
}

impl LearningConfig {
    /// Reject values that would make the update rule or schedule diverge.
    pub fn validate(&self) -> AgentResult<()> {
        let unit = |name: &str, v: f64| -> AgentResult<()> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(AgentError::Config(format!("{name} must lie in [0, 1], got {v}")))
            }
        };
        unit("learning rate", self.learning_rate)?;
        unit("discount factor", self.discount_factor)?;
        unit("initial exploration", self.initial_exploration)?;
        unit("exploration decay", self.exploration_decay)?;
        unit("minimum exploration", self.min_exploration)?;
        unit("layout retention", self.layout_retention)?;

        if self.max_episodes == 0 {
            return Err(AgentError::Config("max episodes must be positive".into()));
        }
        if self.episodes_per_batch == 0 {
            return Err(AgentError::Config("episodes per batch must be positive".into()));
        }
        Ok(())
    }
}

/// The tunable parameters as currently in effect.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LearningParameters {
    pub learning_rate:        f64,
    pub discount_factor:      f64,
    /// Current ε, after decay.
    pub exploration_rate:     f64,
    pub exploration_decay:    f64,
    pub min_exploration_rate: f64,
}
