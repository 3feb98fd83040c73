//! `QLearningAgent` — tabular Q-learning over a simplified checkout model.
//!
//! # Training
//!
//! [`start_learning`][QLearningAgent::start_learning] snapshots a state and
//! station layout; each [`train_batch`][QLearningAgent::train_batch] then
//! runs a batch of episodes from that snapshot:
//!
//! ```text
//! for each step in episode:
//!     s  = key(current)
//!     a  = ε-greedy over feasible(layout)
//!     s' = simulate(a, current)
//!     Q(s, a) ← Q(s, a) + α · (r(s') + γ · max Q(s', ·) − Q(s, a))
//!     current = s'
//! ```
//!
//! The layout used for feasibility stays fixed for the whole run; only the
//! observed queue state evolves.  After each batch ε decays toward its
//! floor, and learning halts once `max_episodes` have run.

use std::collections::VecDeque;

use cq_core::{CheckoutStation, SimRng};
use tracing::{debug, info};

use crate::config::{LearningConfig, LearningParameters};
use crate::{reward, simulate, Action, AgentResult, Layout, QState, QTable, QTableStats, Recommendation, StateKey};

/// Recommendations returned per call, at most.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Actions valued below this are never recommended.
pub const RECOMMENDATION_FLOOR: f64 = -5.0;

/// One Q-update, as kept in the action history.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    /// Display form of the state key.
    pub state:  String,
    pub action: Action,
    pub reward: f64,
}

/// Snapshot training restarts every episode from.
#[derive(Clone, Debug)]
struct Episode {
    start:  QState,
    layout: Layout,
}

#[derive(Debug)]
pub struct QLearningAgent {
    config:            LearningConfig,
    q_table:           QTable,
    rng:               SimRng,
    exploration_rate:  f64,
    episodes:          u32,
    /// 0–100.
    progress:          f64,
    learning:          bool,
    training:          Option<Episode>,
    last_reward:       f64,
    cumulative_reward: f64,
    history:           VecDeque<ActionRecord>,
}

impl Default for QLearningAgent {
    fn default() -> Self {
        Self::from_config(LearningConfig::default())
    }
}

impl QLearningAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Agent with custom hyper-parameters.
    pub fn with_config(config: LearningConfig) -> AgentResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: LearningConfig) -> Self {
        Self {
            rng:               SimRng::new(config.seed),
            exploration_rate:  config.initial_exploration,
            history:           VecDeque::with_capacity(config.history_limit),
            q_table:           QTable::new(),
            episodes:          0,
            progress:          0.0,
            learning:          false,
            training:          None,
            last_reward:       0.0,
            cumulative_reward: 0.0,
            config,
        }
    }

    // ── Training control ─────────────────────────────────────────────────

    /// Begin (or restart) training from `state` with the given layout.
    ///
    /// Resets the episode count, progress and cumulative reward.  The
    /// Q-table and exploration rate carry over.
    pub fn start_learning(&mut self, state: &QState, stations: &[CheckoutStation]) {
        self.training = Some(Episode { start: state.clone(), layout: Layout::from_stations(stations) });
        self.learning = true;
        self.progress = 0.0;
        self.episodes = 0;
        self.cumulative_reward = 0.0;
        info!(
            stations = stations.len(),
            hour = state.hour_of_day,
            max_episodes = self.config.max_episodes,
            "q-learning started"
        );
    }

    /// Run one batch of episodes.  Returns `false` once training is no
    /// longer in progress, either because it was never started, was
    /// stopped, or has just reached `max_episodes`.
    pub fn train_batch(&mut self) -> bool {
        if !self.learning {
            return false;
        }
        let Some(episode) = self.training.clone() else {
            self.learning = false;
            return false;
        };

        for _ in 0..self.config.episodes_per_batch {
            self.run_episode(&episode);
        }

        self.episodes += self.config.episodes_per_batch;
        self.progress = (self.episodes as f64 * 100.0 / self.config.max_episodes as f64).min(100.0);
        self.exploration_rate =
            (self.exploration_rate * self.config.exploration_decay).max(self.config.min_exploration);
        debug!(episodes = self.episodes, epsilon = self.exploration_rate, "training batch done");

        if self.episodes >= self.config.max_episodes {
            self.learning = false;
            self.progress = 100.0;
            info!(
                episodes = self.episodes,
                states = self.q_table.len(),
                cumulative_reward = self.cumulative_reward,
                "q-learning finished"
            );
            return false;
        }
        true
    }

    /// Train synchronously until halted.
    pub fn train_to_completion(&mut self) {
        while self.train_batch() {}
    }

    /// Stop training; learned values are kept.
    pub fn stop_learning(&mut self) {
        if self.learning {
            info!(episodes = self.episodes, "q-learning stopped");
        }
        self.learning = false;
    }

    fn run_episode(&mut self, episode: &Episode) {
        let feasible = episode.layout.feasible_actions(self.config.max_stations);
        let mut current = episode.start.clone();

        for _ in 0..self.config.steps_per_episode {
            let key = current.key();
            let action = self.choose_action(&key, &feasible);
            let next = simulate(action, &current, self.config.layout_retention, &mut self.rng);
            let r = reward(&next, &self.config.reward);
            self.update_q_value(&key, action, r, &next.key());
            current = next;
        }
    }

    // ── Q-learning core ──────────────────────────────────────────────────

    /// Apply one Q-learning update and return the new Q(s, a).
    ///
    /// An unvisited next state counts as max Q = 0.
    pub fn update_q_value(&mut self, state: &StateKey, action: Action, reward: f64, next: &StateKey) -> f64 {
        let current = self.q_table.get_or_init(state, action);
        let max_next = self.q_table.max_value(next).unwrap_or(0.0);
        let updated = current
            + self.config.learning_rate * (reward + self.config.discount_factor * max_next - current);
        self.q_table.set(state, action, updated);

        self.last_reward = reward;
        self.cumulative_reward += reward;
        if self.config.history_limit > 0 {
            if self.history.len() == self.config.history_limit {
                self.history.pop_front();
            }
            self.history.push_back(ActionRecord { state: state.to_string(), action, reward });
        }
        updated
    }

    /// ε-greedy choice among `actions`.  Ties go to the earliest action;
    /// every considered pair is initialized in the table.  Returns
    /// `no_change` for an empty slice.
    pub fn choose_action(&mut self, state: &StateKey, actions: &[Action]) -> Action {
        if actions.is_empty() {
            return Action::NoChange;
        }
        if self.rng.uniform() < self.exploration_rate {
            let idx = self.rng.gen_range(0..actions.len());
            return actions[idx];
        }

        let mut best = actions[0];
        let mut best_value = self.q_table.get_or_init(state, best);
        for &action in &actions[1..] {
            let value = self.q_table.get_or_init(state, action);
            if value > best_value {
                best = action;
                best_value = value;
            }
        }
        best
    }

    // ── Advice ───────────────────────────────────────────────────────────

    /// Up to three recommendations for `state`, best first.
    ///
    /// Every feasible action is valued (initializing unseen pairs to 0);
    /// actions below [`RECOMMENDATION_FLOOR`] among the top three are dropped
    /// without backfilling.
    pub fn generate_recommendations(&mut self, state: &QState, stations: &[CheckoutStation]) -> Vec<Recommendation> {
        let key = state.key();
        let mut valued: Vec<(Action, f64)> = Layout::from_stations(stations)
            .feasible_actions(self.config.max_stations)
            .into_iter()
            .map(|action| (action, self.q_table.get_or_init(&key, action)))
            .collect();
        // Stable: equal values keep feasibility order.
        valued.sort_by(|a, b| b.1.total_cmp(&a.1));

        valued
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .filter(|&(_, q)| q >= RECOMMENDATION_FLOOR)
            .filter_map(|(action, q)| Recommendation::from_action(action, q))
            .collect()
    }

    // ── Introspection ────────────────────────────────────────────────────

    /// Percent of `max_episodes` completed, 0–100.
    pub fn learning_progress(&self) -> f64 {
        self.progress
    }

    pub fn is_learning(&self) -> bool {
        self.learning
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    pub fn episode_count(&self) -> u32 {
        self.episodes
    }

    pub fn q_table_stats(&self) -> QTableStats {
        self.q_table.stats()
    }

    pub fn learning_parameters(&self) -> LearningParameters {
        LearningParameters {
            learning_rate:        self.config.learning_rate,
            discount_factor:      self.config.discount_factor,
            exploration_rate:     self.exploration_rate,
            exploration_decay:    self.config.exploration_decay,
            min_exploration_rate: self.config.min_exploration,
        }
    }

    pub fn last_reward(&self) -> f64 {
        self.last_reward
    }

    pub fn cumulative_reward(&self) -> f64 {
        self.cumulative_reward
    }

    /// Most recent updates, oldest first.
    pub fn action_history(&self) -> impl ExactSizeIterator<Item = &ActionRecord> + '_ {
        self.history.iter()
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }
}
